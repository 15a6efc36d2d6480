//! Pagination utilities for service layer
//!
//! Fixed-size offset pagination over an in-memory slice.

use crate::parse::leading_integer;

/// Records per page; not configurable by clients.
pub const PAGE_SIZE: usize = 20;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: usize,
}

impl Pagination {
    /// Build from the raw `page` query value. Missing, non-numeric and
    /// non-positive values all mean page 1.
    pub fn from_query(raw: Option<&str>) -> Self {
        let page = raw
            .and_then(leading_integer)
            .filter(|p| *p > 0)
            .map(|p| usize::try_from(p).unwrap_or(usize::MAX))
            .unwrap_or(1);
        Self { page }
    }

    /// Offset of the first record on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(PAGE_SIZE)
    }

    /// Slice of `items` on this page; empty when past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(PAGE_SIZE).min(items.len());
        &items[start..end]
    }

    /// `ceil(total / PAGE_SIZE)`, zero for an empty collection.
    pub fn total_pages(total: usize) -> usize {
        total.div_ceil(PAGE_SIZE)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1 } }
}
