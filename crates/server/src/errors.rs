use std::io;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::AuthError;
use thiserror::Error;
use tracing::{debug, error};

pub const MSG_INVALID_INPUT: &str = "Invalid input";
pub const MSG_HASH_FAILED: &str = "Failed to hash password";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Request-level error rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn invalid_input() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_INPUT)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if e.is_internal() {
            error!(code = e.code(), error = %e, "auth request failed");
        }
        match e {
            AuthError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, AuthError::Unauthorized.to_string()),
            AuthError::HashError(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_HASH_FAILED),
            AuthError::Repository(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL),
        }
    }
}

/// Every body that does not decode (syntax, content type, field types) is the same 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(reason = %rejection.body_text(), "rejected request body");
        Self::invalid_input()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: String, #[source] source: io::Error },
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}
