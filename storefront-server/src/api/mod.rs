//! HTTP API
//!
//! One module per resource, each exposing a `router()` that nests its own
//! routes. [`router`] merges them all and attaches the shared state plus
//! the tracing and CORS layers.

pub mod cart;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod shirts;
pub mod webhooks;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(catalog::router())
        .merge(shirts::router())
        .merge(webhooks::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
