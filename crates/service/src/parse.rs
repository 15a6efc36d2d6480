//! Lenient integer parsing for query and path parameters.

/// Parse the leading decimal digits of `raw`, ignoring surrounding
/// whitespace and an optional `+` sign. Anything after the digits is
/// dropped (`"12abc"` is 12). Returns `None` when no digit leads the input
/// or when a `-` sign is present. Values past `u64::MAX` saturate.
pub fn leading_integer(raw: &str) -> Option<u64> {
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: &str = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &s[..end],
        None => s,
    };
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
