//! Operational endpoints outside `/api`.

use std::fmt::Write;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::state::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the book store answers a round trip within its query timeout.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.books.ping().await {
        Ok(()) => (StatusCode::OK, "ready".to_string()),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e))
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    let mut body = String::new();
    for series in snapshot.series() {
        // Writing into a String cannot fail
        let _ = writeln!(body, "# HELP bookshelf_{} {}", series.name, series.help);
        let _ = writeln!(body, "# TYPE bookshelf_{} {}", series.name, series.kind);
        let _ = writeln!(body, "bookshelf_{} {}", series.name, series.value);
    }
    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body)
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
    }))
}
