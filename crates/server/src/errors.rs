use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Pokemon not found";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Error body of every `/api` failure: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    /// Map a service failure to a response. `storage_message` is the
    /// operation-specific text reported for write failures.
    pub fn from_service(err: ServiceError, storage_message: &str) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE),
            ServiceError::Storage(detail) => {
                error!(error = %detail, "{storage_message}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, storage_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address `{0}`")]
    InvalidAddr(String),
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
