//! Pokemon records and the CRUD operations over the stored collection.

pub mod model;
pub mod service;

pub use model::{DeletedPokemon, Pokemon, PokemonPage};
pub use service::PokemonService;
