//! Registration and session handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{IssuedToken, RegisteredLogin, ResponseEnvelope, removed};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseEnvelope<RegisteredLogin>>), ApiError> {
    let Json(req) = body?;
    let user = state
        .sessions
        .register(&req.login, &req.pswd, req.token.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseEnvelope::new(RegisteredLogin { login: user.login })),
    ))
}

/// POST /api/auth
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseEnvelope<IssuedToken>>), ApiError> {
    let Json(req) = body?;
    let token = state.sessions.login(&req.login, &req.pswd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseEnvelope::new(IssuedToken { token })),
    ))
}

/// DELETE /api/auth/{token}
pub async fn logout(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ResponseEnvelope<serde_json::Map<String, serde_json::Value>>>, ApiError> {
    state.sessions.logout(&token).await?;
    Ok(Json(ResponseEnvelope::new(removed(token))))
}
