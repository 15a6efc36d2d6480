use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Fields a create payload must carry (present and non-null).
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "type", "base"];

/// Sub-fields of `name` that name search looks at.
pub const NAME_LANGUAGES: [&str; 3] = ["english", "french", "japanese"];

/// A stored Pokemon entry.
///
/// Only `id` is typed. `name`, `type`, `base` and any other fields are kept
/// as raw JSON in their original key order and written back untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pokemon {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Pokemon {
    /// Build a record from a client payload; any `id` in the payload is dropped.
    pub fn from_payload(id: u64, mut payload: Map<String, Value>) -> Self {
        payload.remove("id");
        Self { id, fields: payload }
    }

    /// Localized display names that are present as strings.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let name = self.fields.get("name").and_then(Value::as_object);
        NAME_LANGUAGES
            .into_iter()
            .filter_map(move |lang| name.and_then(|n| n.get(lang)).and_then(Value::as_str))
    }

    /// Case-insensitive substring match against any localized name.
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.names().any(|n| n.to_lowercase().contains(needle))
    }

    /// Shallow merge: each payload field replaces the stored one wholesale.
    /// `id` in the payload is ignored.
    pub fn merge(&mut self, payload: Map<String, Value>) {
        for (key, value) in payload {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// Check a create payload carries every required field.
pub fn validate_new(payload: &Map<String, Value>) -> Result<(), ServiceError> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| payload.get(*f).map_or(true, Value::is_null))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!("missing required fields: {}", missing.join(", "))))
    }
}

/// One page of the collection as returned by the list endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PokemonPage {
    pub pokemons: Vec<Pokemon>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_pokemons: usize,
    pub limit: usize,
}

/// Body returned after a successful delete.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DeletedPokemon {
    pub message: String,
    pub pokemon: Pokemon,
}

impl DeletedPokemon {
    pub fn new(pokemon: Pokemon) -> Self {
        Self { message: "Pokemon deleted successfully".into(), pokemon }
    }
}
