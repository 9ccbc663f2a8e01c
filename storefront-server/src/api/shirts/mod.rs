//! Shirt API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shirts", shirt_routes())
}

fn shirt_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_shirt))
        .route("/{id}", get(handler::get_shirt))
}
