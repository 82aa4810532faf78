use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not implemented")]
    NotImplemented,

    #[error("{0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    /// Credentials were checked and rejected; the message is safe to show.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("csrf rejected: {0}")]
    CsrfRejected(&'static str),

    #[error("rate limit exceeded")]
    RateLimited {
        retry_after_secs: u64,
        reset_at: DateTime<Utc>,
    },

    /// A store call failed. `message` is the only text the client sees.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn storage(message: &'static str, source: anyhow::Error) -> Self {
        AppError::Storage { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::CsrfRejected(_) => StatusCode::FORBIDDEN,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotImplemented => json!({ "message": "Not implemented yet" }),
            AppError::NotFound(msg) => json!({ "message": msg }),
            AppError::BadRequest(msg) => json!({ "message": msg }),
            AppError::Unauthorized => json!({ "message": "Unauthorized" }),
            AppError::AuthenticationFailed(msg) => json!({ "message": msg }),
            AppError::Forbidden(msg) => json!({ "message": msg }),
            AppError::CsrfRejected(msg) => json!({ "error": "Forbidden", "message": msg }),
            AppError::RateLimited {
                retry_after_secs, ..
            } => json!({
                "error": "Too many requests",
                "message": format!(
                    "Rate limit exceeded. Try again in {} seconds.",
                    retry_after_secs
                ),
                "retryAfter": retry_after_secs,
            }),
            AppError::Storage { message, source } => {
                tracing::error!("{}: {:#}", message, source);
                json!({ "message": message })
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                json!({ "message": "Internal server error" })
            }
        };

        let mut response = (status, Json(body)).into_response();

        if let AppError::RateLimited {
            retry_after_secs,
            reset_at,
        } = &self
        {
            let headers = response.headers_mut();
            if let Ok(v) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                headers.insert("retry-after", v);
            }
            if let Ok(v) = HeaderValue::from_str(&reset_at.to_rfc3339()) {
                headers.insert("x-ratelimit-reset", v);
            }
        }

        response
    }
}
