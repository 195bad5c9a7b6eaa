use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use common::types::Message;
use service::auth::{AuthService, UserRepository};
use service::auth::domain::{LoginInput, RegisterInput};

use crate::errors::ApiError;

pub const MSG_REGISTERED: &str = "User registered successfully";
pub const MSG_LOGGED_IN: &str = "Login successful";

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { auth: Arc::new(AuthService::new(repo)) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginOutput { pub message: String, pub user: String }

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered", body = crate::openapi::MessageResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 500, description = "Hashing failed", body = crate::openapi::ErrorResponse)))]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(input) = payload?;
    state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(Message::new(MSG_REGISTERED))))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponse), (status = 400, description = "Bad Request", body = crate::openapi::ErrorResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    let Json(input) = payload?;
    let outcome = state.auth.login(input).await?;
    Ok(Json(LoginOutput { message: MSG_LOGGED_IN.into(), user: outcome.name }))
}
