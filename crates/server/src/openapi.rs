use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorBody { pub error: String }

#[derive(Serialize, ToSchema)]
pub struct PokemonNameDoc {
    pub english: String,
    pub french: String,
    pub japanese: String,
}

/// Request body for create/update. Extra fields are stored as-is.
#[derive(Serialize, ToSchema)]
pub struct NewPokemonDoc {
    pub name: PokemonNameDoc,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub base: BTreeMap<String, u32>,
}

#[derive(Serialize, ToSchema)]
pub struct PokemonDoc {
    pub id: u64,
    pub name: PokemonNameDoc,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub base: BTreeMap<String, u32>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PokemonPageDoc {
    pub pokemons: Vec<PokemonDoc>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_pokemons: usize,
    pub limit: usize,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedPokemonDoc {
    pub message: String,
    pub pokemon: PokemonDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::pokemons::list,
        crate::routes::pokemons::search,
        crate::routes::pokemons::get,
        crate::routes::pokemons::create,
        crate::routes::pokemons::update,
        crate::routes::pokemons::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            PokemonNameDoc,
            NewPokemonDoc,
            PokemonDoc,
            PokemonPageDoc,
            DeletedPokemonDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pokemons")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_pokemon_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/pokemons",
            "/api/pokemons/search/{name}",
            "/api/pokemons/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
