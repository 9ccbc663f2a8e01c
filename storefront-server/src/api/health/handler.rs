//! Health check handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
    pub cached_orders: usize,
}

/// GET /healthz
pub async fn healthz(State(state): State<ServerState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        environment: state.config.environment.clone(),
        cached_orders: state.order_cache.len(),
    })
}
