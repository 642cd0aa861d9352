//! Health and metrics endpoints. No caller identity required.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

use crate::envelope::Envelope;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "case-workflow",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition.
pub async fn metrics() -> impl IntoResponse {
    match case_telemetry::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::<()>::failure("Failed to encode metrics")),
            )
                .into_response()
        }
    }
}
