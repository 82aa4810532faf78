use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and checks the HS256 session token stored in the `admin_session` cookie.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: u64, secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: i64::try_from(ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX),
            secure,
        }
    }

    pub fn issue(&self, user: &User) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id,
            role: user.role.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// `None` for anything that is not a live token signed with our key.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "session token rejected");
                None
            }
        }
    }

    /// Reads and verifies the session cookie from request headers.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        let jar = CookieJar::from_headers(headers);
        let cookie = jar.get(SESSION_COOKIE)?;
        self.verify(cookie.value())
    }

    pub fn set_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
            SESSION_COOKIE,
            token,
            self.ttl_secs,
            if self.secure { "; Secure" } else { "" }
        )
    }

    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
            SESSION_COOKIE,
            if self.secure { "; Secure" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn user(role: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "beheer@bouwmeesters.nl".into(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            role: role.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = SessionKeys::new("k", 168, false);
        let u = user("admin");
        let token = keys.issue(&u).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 168 * 3600);
    }

    #[test]
    fn test_wrong_key_or_garbage_rejected() {
        let token = SessionKeys::new("k1", 1, false).issue(&user("admin")).unwrap();
        assert!(SessionKeys::new("k2", 1, false).verify(&token).is_none());
        assert!(SessionKeys::new("k1", 1, false).verify("not.a.jwt").is_none());
    }

    #[test]
    fn test_expired_rejected() {
        let keys = SessionKeys::new("k", 1, false);
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            role: "admin".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn test_reads_cookie_header() {
        let keys = SessionKeys::new("k", 1, false);
        let u = user("admin");
        let token = keys.issue(&u).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, token)).unwrap(),
        );
        assert_eq!(keys.from_headers(&headers).map(|c| c.sub), Some(u.id));
        assert!(keys.from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let dev = SessionKeys::new("k", 168, false);
        let cookie = dev.set_cookie("abc");
        assert!(cookie.starts_with("admin_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));

        let prod = SessionKeys::new("k", 168, true);
        assert!(prod.set_cookie("abc").ends_with("; Secure"));
        assert!(prod.clear_cookie().contains("Max-Age=0"));
    }
}
