//! Stateless CSRF tokens.
//!
//! A token is `<nonce>:<issued_ms>:<signature>` where the signature is
//! HMAC-SHA256 over `<nonce>:<issued_ms>` exactly as the text appears in the token. Nothing is stored server-side:
//! any token carrying a valid signature and a fresh timestamp is accepted.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::errors::AppError;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes in the nonce part (hex-encoded to 64 chars).
const NONCE_BYTES: usize = 32;

/// Tokens stamped further in the future than this are rejected.
const MAX_CLOCK_SKEW_MS: i64 = 60_000;

pub const CSRF_HEADER: &str = "x-csrf-token";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsrfError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

#[derive(Clone)]
pub struct CsrfTokens {
    secret: Vec<u8>,
    max_age_ms: i64,
}

impl CsrfTokens {
    pub fn new(secret: &str, max_age_secs: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            max_age_ms: i64::try_from(max_age_secs.saturating_mul(1000)).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        let mut nonce = [0u8; NONCE_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        let nonce = hex::encode(nonce);
        let issued_ms = now.timestamp_millis();
        let signature = self.sign(&nonce, &issued_ms.to_string());
        format!("{}:{}:{}", nonce, issued_ms, signature)
    }

    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), CsrfError> {
        let mut parts = token.split(':');
        let (nonce, issued, signature) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(t), Some(s), None) if !n.is_empty() && !t.is_empty() && !s.is_empty() => {
                (n, t, s)
            }
            _ => return Err(CsrfError::Malformed),
        };

        let issued_ms: i64 = issued.parse().map_err(|_| CsrfError::Malformed)?;

        // Signed over the received text, so `+<ts>` or `0<ts>` never match.
        let expected = self.sign(nonce, issued);
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(CsrfError::BadSignature);
        }

        let age_ms = now.timestamp_millis().saturating_sub(issued_ms);
        if age_ms > self.max_age_ms || age_ms < -MAX_CLOCK_SKEW_MS {
            return Err(CsrfError::Expired);
        }

        Ok(())
    }

    fn sign(&self, nonce: &str, issued: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(nonce.as_bytes());
        mac.update(b":");
        mac.update(issued.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Middleware: rejects state-changing requests without a valid `x-csrf-token`.
/// Safe methods (GET, HEAD, OPTIONS) pass through untouched.
pub async fn csrf_protection(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if [Method::GET, Method::HEAD, Method::OPTIONS].contains(req.method()) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), "csrf token missing");
        return Err(AppError::CsrfRejected("CSRF token missing"));
    };

    if let Err(e) = state.csrf.verify(token) {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), reason = %e, "csrf token rejected");
        return Err(AppError::CsrfRejected("Invalid or expired CSRF token"));
    }

    Ok(next.run(req).await)
}
