//! Prometheus metrics for the HTTP surface.
//!
//! `track_requests` records every request; `/metrics` serves `encode_metrics()`.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;
use prometheus::{
    opts, register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec,
    TextEncoder,
};

/// Route label for requests no route matched (keeps cardinality bounded).
const UNMATCHED_ROUTE: &str = "unmatched";

static RECORDER: Lazy<PrometheusRecorder> = Lazy::new(PrometheusRecorder::new);

/// Prometheus metrics recorder.
/// All metrics are registered in the global default registry.
pub struct PrometheusRecorder {
    requests_total: CounterVec,
    request_duration_seconds: HistogramVec,
}

impl PrometheusRecorder {
    fn new() -> Self {
        let requests_total = register_counter_vec!(
            opts!("bouwsite_http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "status_code"]
        )
        .expect("failed to register bouwsite_http_requests_total");

        let request_duration_seconds = register_histogram_vec!(
            prometheus::histogram_opts!(
                "bouwsite_http_request_duration_seconds",
                "Request latency in seconds",
                vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
            ),
            &["method", "route"]
        )
        .expect("failed to register bouwsite_http_request_duration_seconds");

        Self {
            requests_total,
            request_duration_seconds,
        }
    }

    pub fn record(&self, method: &str, route: &str, status: u16, elapsed_secs: f64) {
        self.requests_total
            .with_label_values(&[method, route, &status.to_string()])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[method, route])
            .observe(elapsed_secs);
    }
}

pub fn recorder() -> &'static PrometheusRecorder {
    &RECORDER
}

/// Middleware: counts and times every request by matched route pattern.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let started = Instant::now();
    let resp = next.run(req).await;
    recorder().record(
        &method,
        &route,
        resp.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    resp
}

/// Encode all registered metrics as Prometheus text format.
/// Called by the `/metrics` HTTP handler.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap_or_default();
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_request_shows_up_in_output() {
        recorder().record("GET", "/api/services", 200, 0.012);
        let output = encode_metrics();
        assert!(output.contains("bouwsite_http_requests_total"));
        assert!(output.contains("route=\"/api/services\""));
        assert!(output.contains("bouwsite_http_request_duration_seconds_bucket"));
    }
}
