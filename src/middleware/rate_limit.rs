use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use chrono::Utc;
use dashmap::DashMap;

use crate::errors::AppError;

/// A named fixed-window limit: at most `limit` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub name: &'static str,
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitRule {
    /// 5 attempts per 5 minutes.
    pub const LOGIN: RateLimitRule = RateLimitRule {
        name: "auth.login",
        limit: 5,
        window: Duration::from_secs(300),
    };

    /// 5 submissions per hour.
    pub const CONTACT: RateLimitRule = RateLimitRule {
        name: "public.contact",
        limit: 5,
        window: Duration::from_secs(3600),
    };

    pub const BLOG_READ: RateLimitRule = RateLimitRule {
        name: "public.blog",
        limit: 200,
        window: Duration::from_secs(60),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// In-process fixed-window limiter keyed by `<rule>:<client>`.
///
/// Expired windows are replaced lazily on the next hit; `evict_expired()`
/// bounds memory for clients that never come back.
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, client: &str, rule: RateLimitRule) -> RateLimitDecision {
        self.check_at(client, rule, Instant::now())
    }

    pub fn check_at(&self, client: &str, rule: RateLimitRule, now: Instant) -> RateLimitDecision {
        let key = format!("{}:{}", rule.name, client);
        let mut window = self.windows.entry(key).or_insert(Window {
            count: 0,
            reset_at: now + rule.window,
        });

        if now > window.reset_at {
            window.count = 0;
            window.reset_at = now + rule.window;
        }

        if window.count >= rule.limit {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at: window.reset_at,
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: rule.limit - window.count,
            reset_at: window.reset_at,
        }
    }

    /// Like `check`, but turns a rejection into `AppError::RateLimited`.
    pub fn enforce(&self, client: &str, rule: RateLimitRule) -> Result<RateLimitDecision, AppError> {
        let now = Instant::now();
        let decision = self.check_at(client, rule, now);
        if decision.allowed {
            return Ok(decision);
        }

        let wait = decision.reset_at.saturating_duration_since(now);
        let retry_after_secs = ceil_secs(wait).max(1);
        tracing::warn!(
            rate_limit = true,
            rule = rule.name,
            client = client,
            limit = rule.limit,
            retry_after_secs,
            "rate limit exceeded"
        );
        Err(AppError::RateLimited {
            retry_after_secs,
            reset_at: Utc::now()
                + chrono::Duration::from_std(wait).unwrap_or_else(|_| chrono::Duration::zero()),
        })
    }

    /// Remove all expired windows. Returns how many were dropped.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, w| now <= w.reset_at);
        before - self.windows.len()
    }

    /// Number of tracked windows (for metrics / debugging).
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

/// Client identity for rate limiting: first `x-forwarded-for` hop, then
/// `x-real-ip`, then `"unknown"`.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded.or(real_ip).unwrap_or("unknown").to_string()
}
