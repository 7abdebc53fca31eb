use actix_web::HttpResponse;
use prometheus::{register_counter, register_histogram, Counter, Histogram};

// Prometheus metrics for request lookups
lazy_static::lazy_static! {
    // Counter for the total number of request lookups started
    pub static ref LOOKUPS: Counter = register_counter!(
        "oprequest_lookups_total",
        "Total request lookups"
    ).unwrap();

    // Counter for lookups that resolved to a transaction
    pub static ref MATCHES: Counter = register_counter!(
        "oprequest_matches_total",
        "Lookups that found a matching transaction"
    ).unwrap();

    // Counter for transactions fetched and examined
    pub static ref TXS_SCANNED: Counter = register_counter!(
        "oprequest_txs_scanned_total",
        "Transactions fetched and examined"
    ).unwrap();

    // Counter for transactions skipped because their hex did not decode
    pub static ref DECODE_FAILURES: Counter = register_counter!(
        "oprequest_decode_failures_total",
        "Transactions skipped because they failed to decode"
    ).unwrap();

    // Histogram for measuring lookup time in seconds
    pub static ref LOOKUP_TIME: Histogram = register_histogram!(
        "oprequest_lookup_seconds",
        "Request lookup time in seconds"
    ).unwrap();
}

// Handles GET /metrics requests to expose Prometheus metrics
pub async fn metrics() -> HttpResponse {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    // Encoding failures yield an empty body rather than an error response
    let encoded = encoder.encode_to_string(&metric_families).unwrap_or_default();
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(encoded)
}
