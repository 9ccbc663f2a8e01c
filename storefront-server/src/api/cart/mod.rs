//! Cart API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).post(handler::set_quantity))
        .route("/add", post(handler::add_to_cart))
        .route("/{clerk_id}/{shirt_id}", delete(handler::remove_from_cart))
}
