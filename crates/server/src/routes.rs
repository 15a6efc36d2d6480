use axum::{routing::get, Json, Router};
use common::types::Health;
use service::pokemon::PokemonService;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

pub mod pokemons;

pub const BANNER: &str = "Pokedex API is running. Browse /api/pokemons or /swagger-ui.";

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pokemons: PokemonService,
}

impl AppState {
    pub fn new(pokemons: PokemonService) -> Self {
        Self { pokemons }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn banner() -> &'static str {
    BANNER
}

/// `/api/pokemons` routes.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/pokemons", get(pokemons::list).post(pokemons::create))
        .route("/pokemons/search/:name", get(pokemons::search))
        .route(
            "/pokemons/:id",
            get(pokemons::get).put(pokemons::update).delete(pokemons::delete),
        )
}

/// Build the full application router: banner, health, API, OpenAPI UI and
/// static files from `static_dir` for every other path.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .nest("/api", api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        // 响应返回时打点，包含状态码与耗时
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
