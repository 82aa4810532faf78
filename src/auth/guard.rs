use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::errors::AppError;
use crate::models::user::User;
use crate::AppState;

use super::LOGIN_PATH;

/// The authenticated admin, inserted as a request extension by `require_admin`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Middleware for `/api/admin/*`: requires a live session for an active admin.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(claims) = state.sessions.from_headers(req.headers()) else {
        tracing::warn!(path = %req.uri().path(), "admin API: no valid session");
        return Err(AppError::Unauthorized);
    };

    let user = state
        .store
        .user_by_id(claims.sub)
        .await
        .map_err(|e| AppError::storage("Internal server error", e))?;

    let user = match user {
        Some(u) if u.is_active => u,
        _ => {
            tracing::warn!(user_id = %claims.sub, "admin API: session user missing or inactive");
            return Err(AppError::Unauthorized);
        }
    };

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, role = %user.role, "admin API: role is not admin");
        return Err(AppError::Forbidden("Forbidden - Admin access required"));
    }

    req.extensions_mut().insert(AdminUser(user));
    Ok(next.run(req).await)
}

/// Middleware for page routes: keeps anonymous visitors out of `/admin`
/// and sends signed-in admins away from the login page.
pub async fn admin_page_gate(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();
    let is_admin_path = path == "/admin" || path.starts_with("/admin/");
    let is_login_path = path == LOGIN_PATH;

    if !is_admin_path && !is_login_path {
        return next.run(req).await;
    }

    let signed_in = state.sessions.from_headers(req.headers()).is_some();

    if is_admin_path && !signed_in {
        let target = format!("{}?redirect={}", LOGIN_PATH, urlencoding::encode(path));
        return Redirect::temporary(&target).into_response();
    }

    if is_login_path && signed_in {
        return Redirect::temporary("/admin").into_response();
    }

    next.run(req).await
}
