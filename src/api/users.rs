use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{ApiError, AppState, MessageResponse, SignupRequest};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "User successfully registered!";

/// GET /users
/// Usernames of every registered account, oldest first.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let usernames = state.account_service().list_usernames().await?;
    Ok(Json(usernames))
}

/// POST /signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::validation(rejection.body_text()))?;

    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    state
        .account_service()
        .register(&username, &password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(SIGNUP_SUCCESS_MESSAGE)),
    ))
}
