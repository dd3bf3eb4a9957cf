//! Prometheus counters for the booking workflows (default registry).
//! Every counter is labelled with the entity kind: `user`, `class` or `booking`.

use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

pub static ENTITIES_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "booking_entities_created_total",
        "Entities validated and persisted",
        &["entity"]
    )
    .expect("register entities_created_total")
});

pub static CONFLICTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "booking_conflicts_total",
        "Saves rejected because an entity with the same content exists",
        &["entity"]
    )
    .expect("register conflicts_total")
});

pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "booking_validation_failures_total",
        "Creation requests rejected by validation",
        &["entity"]
    )
    .expect("register validation_failures_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "booking_not_found_total",
        "Lookups by identifier that found nothing",
        &["entity"]
    )
    .expect("register not_found_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        ENTITIES_CREATED_TOTAL.with_label_values(&["user"]).inc();
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("booking_entities_created_total{entity=\"user\"}"));
    }
}
