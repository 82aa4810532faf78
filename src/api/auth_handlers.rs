use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::password::verify_password;
use crate::errors::AppError;
use crate::middleware::rate_limit::{client_identifier, RateLimitRule};
use crate::models::user::UserSummary;
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let client = client_identifier(&headers);
    state.limiter.enforce(&client, RateLimitRule::LOGIN)?;

    let body = body.map(|Json(b)| b).unwrap_or_default();
    let email = body.email.as_deref().map(str::trim).unwrap_or_default();
    let password = body.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let user = state
        .store
        .user_by_email(email)
        .await
        .map_err(|e| AppError::storage("Login failed", e))?;

    let Some(user) = user else {
        tracing::warn!(client = %client, "login failed: unknown email");
        return Err(AppError::AuthenticationFailed(INVALID_CREDENTIALS));
    };

    if !verify_password(password, &user.password_hash).await? {
        tracing::warn!(client = %client, user_id = %user.id, "login failed: wrong password");
        return Err(AppError::AuthenticationFailed(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        tracing::warn!(user_id = %user.id, "login refused: account deactivated");
        return Err(AppError::Forbidden("Account is deactivated"));
    }

    let token = state.sessions.issue(&user)?;
    let cookie = HeaderValue::from_str(&state.sessions.set_cookie(&token))
        .map_err(|e| AppError::Internal(e.into()))?;

    tracing::info!(user_id = %user.id, "admin logged in");

    let mut resp = Json(json!({
        "success": true,
        "user": UserSummary::from(&user),
    }))
    .into_response();
    resp.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(resp)
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    let mut resp = Json(json!({ "success": true })).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&state.sessions.clear_cookie()) {
        resp.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    resp
}

pub async fn session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let anonymous = || Json(json!({ "authenticated": false })).into_response();

    let Some(claims) = state.sessions.from_headers(&headers) else {
        return anonymous();
    };

    match state.store.user_by_id(claims.sub).await {
        Ok(Some(user)) if user.is_active => Json(json!({
            "authenticated": true,
            "user": UserSummary::from(&user),
        }))
        .into_response(),
        Ok(_) => anonymous(),
        Err(e) => {
            tracing::error!("session lookup failed: {:#}", e);
            anonymous()
        }
    }
}
