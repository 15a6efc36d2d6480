//! Service layer for the Pokedex record store.
//! - `storage` holds the whole-collection load/save abstraction and its backends.
//! - `pokemon` holds the record model and the CRUD operations on top of a store.
//! - `pagination` and `parse` normalize raw request inputs.

pub mod errors;
pub mod storage;
pub mod pagination;
pub mod parse;
pub mod pokemon;
