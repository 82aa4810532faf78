//! Background job: drop expired rate-limit windows.
//!
//! Runs every minute so clients that never return do not pin memory.

use std::time::Duration;

use tokio::time;

use crate::middleware::rate_limit::RateLimiter;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the background cleanup task. Call this once at startup.
pub fn spawn(limiter: RateLimiter) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweep(&limiter);
        }
    })
}

fn sweep(limiter: &RateLimiter) -> usize {
    let removed = limiter.evict_expired();
    if removed > 0 {
        tracing::info!(removed, remaining = limiter.len(), "evicted expired rate-limit windows");
    }
    removed
}
