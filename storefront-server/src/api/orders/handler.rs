//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::cart::DeliveryStatus;

use crate::checkout::{CheckoutService, PlaceOrder};
use crate::core::ServerState;
use crate::db::models::{Order, ShippingAddress};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub clerk_id: String,
    pub shipping_address: ShippingAddressBody,
    pub payment_method: String,
    pub total: f64,
    pub total_before_discount: f64,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub total_saved: f64,
    #[serde(default)]
    pub payment_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressBody {
    pub address: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub clerk_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: DeliveryStatus,
}

fn checkout(state: &ServerState) -> CheckoutService {
    CheckoutService::new(
        state.db.clone(),
        state.order_cache.clone(),
        state.notifier.clone(),
    )
}

/// POST /api/orders - place an order from the user's current cart
pub async fn place_order(
    State(state): State<ServerState>,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<Json<PlaceOrderResponse>> {
    let order = PlaceOrder {
        shipping_address: ShippingAddress {
            address: req.shipping_address.address,
            zip_code: req.shipping_address.zip_code,
            country: req.shipping_address.country,
            phone_number: req.shipping_address.phone_number,
        },
        payment_method: req.payment_method,
        total: req.total,
        total_before_discount: req.total_before_discount,
        coupon_code: req.coupon_code,
        total_saved: req.total_saved,
        payment_time: req.payment_time,
    };

    match checkout(&state).place_order(&req.clerk_id, order).await {
        Ok(order_id) => Ok(Json(PlaceOrderResponse {
            success: true,
            order_id: Some(order_id),
            message: None,
        })),
        Err(e) if e.is_expected() => Ok(Json(PlaceOrderResponse {
            success: false,
            order_id: None,
            message: Some(e.to_string()),
        })),
        Err(e) => Err(e),
    }
}

/// GET /api/orders/:id - single order, served through the read cache
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    match checkout(&state).get_order(&id).await? {
        Some(order) => Ok(Json(OrderResponse {
            success: true,
            order: Some(order),
            message: None,
        })),
        None => Ok(Json(OrderResponse {
            success: false,
            order: None,
            message: Some(format!("Order {id} not found")),
        })),
    }
}

/// GET /api/orders?clerkId=... - the user's orders, newest first
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = checkout(&state).list_orders(&query.clerk_id).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - advance the delivery status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<OrderResponse>> {
    match checkout(&state).update_delivery_status(&id, req.status).await {
        Ok(order) => Ok(Json(OrderResponse {
            success: true,
            order: Some(order),
            message: None,
        })),
        Err(e) if e.is_expected() => Ok(Json(OrderResponse {
            success: false,
            order: None,
            message: Some(e.to_string()),
        })),
        Err(e) => Err(e),
    }
}
