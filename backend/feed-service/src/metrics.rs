//! Prometheus metrics for the feed service.
//!
//! Exposes request collectors and an HTTP handler for the `/metrics`
//! endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::time::Duration;

lazy_static! {
    static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_http_requests_total",
        "Total HTTP requests handled",
        &["method", "status"]
    )
    .unwrap();
    static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_http_request_duration_seconds",
        "HTTP request latency",
        &["method"]
    )
    .unwrap();
}

/// Record one finished request. Labels stay low-cardinality: method and
/// status class only, never the raw path.
pub fn observe_request(method: &str, status: u16, elapsed: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method])
        .observe(elapsed.as_secs_f64());
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn metrics_endpoint_renders_text() {
        observe_request("GET", 200, Duration::from_millis(3));
        let resp = serve_metrics().await;
        assert!(resp.status().is_success());
    }
}
