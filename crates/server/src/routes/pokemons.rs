use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use service::{
    pagination::Pagination,
    parse::leading_integer,
    pokemon::{DeletedPokemon, Pokemon, PokemonPage},
};
use tracing::debug;
use utoipa::IntoParams;

use crate::{errors::ApiError, routes::AppState};

/// Documents the list query. Extraction goes through [`page_param`] so a
/// malformed or repeated `page` never rejects the request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number; non-numeric values mean 1
    pub page: Option<String>,
}

/// First `page` value of the query string, if any.
pub fn page_param(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs.into_iter().find(|(key, _)| key == "page").map(|(_, value)| value)
}

/// Path ids that are not integers cannot match any record.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    leading_integer(raw).ok_or_else(ApiError::not_found)
}

/// An unreadable or missing JSON body is treated as an empty object.
fn body_or_empty(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(v)) => v,
        Err(e) => {
            debug!(error = %e, "request body is not JSON; treating as empty object");
            Value::Object(Default::default())
        }
    }
}

#[utoipa::path(
    get, path = "/api/pokemons", tag = "pokemons",
    params(ListQuery),
    responses((status = 200, description = "One page of pokemons", body = crate::openapi::PokemonPageDoc))
)]
pub async fn list(State(state): State<AppState>, uri: Uri) -> Json<PokemonPage> {
    let pagination = Pagination::from_query(page_param(&uri).as_deref());
    Json(state.pokemons.list(pagination).await)
}

#[utoipa::path(
    get, path = "/api/pokemons/search/{name}", tag = "pokemons",
    params(("name" = String, Path, description = "Case-insensitive substring of an english, french or japanese name")),
    responses(
        (status = 200, description = "First matching pokemon", body = crate::openapi::PokemonDoc),
        (status = 404, description = "Pokemon not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn search(State(state): State<AppState>, Path(name): Path<String>) -> Result<Json<Pokemon>, ApiError> {
    state
        .pokemons
        .search_by_name(&name)
        .await
        .map(Json)
        .map_err(|_| ApiError::not_found())
}

#[utoipa::path(
    get, path = "/api/pokemons/{id}", tag = "pokemons",
    params(("id" = u64, Path, description = "Pokemon id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PokemonDoc),
        (status = 404, description = "Pokemon not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<Pokemon>, ApiError> {
    let id = parse_id(&raw_id)?;
    state.pokemons.get(id).await.map(Json).map_err(|_| ApiError::not_found())
}

#[utoipa::path(
    post, path = "/api/pokemons", tag = "pokemons",
    request_body = crate::openapi::NewPokemonDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PokemonDoc),
        (status = 400, description = "Missing required fields", body = crate::openapi::ErrorBody),
        (status = 500, description = "Error saving pokemon", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Pokemon>), ApiError> {
    let created = state
        .pokemons
        .create(body_or_empty(body))
        .await
        .map_err(|e| ApiError::from_service(e, "Error saving pokemon"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/pokemons/{id}", tag = "pokemons",
    params(("id" = u64, Path, description = "Pokemon id")),
    request_body = crate::openapi::NewPokemonDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PokemonDoc),
        (status = 404, description = "Pokemon not found", body = crate::openapi::ErrorBody),
        (status = 500, description = "Error updating pokemon", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Pokemon>, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .pokemons
        .update(id, body_or_empty(body))
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Error updating pokemon"))
}

#[utoipa::path(
    delete, path = "/api/pokemons/{id}", tag = "pokemons",
    params(("id" = u64, Path, description = "Pokemon id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeletedPokemonDoc),
        (status = 404, description = "Pokemon not found", body = crate::openapi::ErrorBody),
        (status = 500, description = "Error deleting pokemon", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<DeletedPokemon>, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .pokemons
        .delete(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Error deleting pokemon"))
}
