//! Cart API Handlers
//!
//! All cart endpoints speak the same envelope: `{success, cart?, message?}`.
//! Expected outcomes (unknown user, shirt not in cart, bad quantity) come
//! back as `success: false` with a message rather than a transport error,
//! so the storefront can show them inline.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::cart::CartView;

use crate::carts::CartManager;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    pub clerk_id: String,
    pub product_id: String,
    pub new_qty: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub clerk_id: String,
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    pub clerk_id: String,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CartResponse {
    fn ok(cart: CartView) -> Json<Self> {
        Json(Self {
            success: true,
            cart: Some(cart),
            message: None,
        })
    }

    fn failed(message: String) -> Json<Self> {
        Json(Self {
            success: false,
            cart: None,
            message: Some(message),
        })
    }
}

/// Fold expected failures into the response envelope, let the rest
/// propagate as HTTP errors
fn respond(result: AppResult<CartView>) -> AppResult<Json<CartResponse>> {
    match result {
        Ok(cart) => Ok(CartResponse::ok(cart)),
        Err(e) if e.is_expected() => Ok(CartResponse::failed(e.to_string())),
        Err(e) => Err(e),
    }
}

/// POST /api/cart - set the quantity of a line (zero removes it)
pub async fn set_quantity(
    State(state): State<ServerState>,
    Json(req): Json<SetQuantityRequest>,
) -> AppResult<Json<CartResponse>> {
    let manager = CartManager::new(state.db.clone());
    respond(
        manager
            .set_quantity(&req.clerk_id, &req.product_id, req.new_qty)
            .await,
    )
}

/// POST /api/cart/add - add a shirt to the cart
pub async fn add_to_cart(
    State(state): State<ServerState>,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<Json<CartResponse>> {
    let manager = CartManager::new(state.db.clone());
    respond(
        manager
            .add_line(&req.clerk_id, &req.product_id, req.quantity)
            .await,
    )
}

/// GET /api/cart?clerkId=... - current cart with shirt summaries
pub async fn get_cart(
    State(state): State<ServerState>,
    Query(query): Query<CartQuery>,
) -> AppResult<Json<CartResponse>> {
    let manager = CartManager::new(state.db.clone());
    respond(manager.get_cart(&query.clerk_id).await)
}

/// DELETE /api/cart/:clerk_id/:shirt_id - remove a line (idempotent)
pub async fn remove_from_cart(
    State(state): State<ServerState>,
    Path((clerk_id, shirt_id)): Path<(String, String)>,
) -> AppResult<Json<CartResponse>> {
    if clerk_id.trim().is_empty() {
        return Err(AppError::validation("clerk id must not be empty"));
    }
    let manager = CartManager::new(state.db.clone());
    respond(manager.remove_line(&clerk_id, &shirt_id).await)
}
