//! Catalog API module

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::core::ServerState;

/// Image payloads come in as raw bytes, so the catalog routes carry a
/// larger body limit than the rest of the API
const MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", catalog_routes())
}

fn catalog_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/options",
            get(handler::list_options).post(handler::create_option),
        )
        .route("/options/{id}", get(handler::get_option))
        .route(
            "/upload",
            post(handler::upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
}
