//! Order Model
//!
//! A point-in-time, by-value copy of cart contents plus checkout metadata.
//! Immutable after creation except for forward delivery-status transitions.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::cart::DeliveryStatus;
use surrealdb::RecordId;

/// Snapshotted order line (by value, not by reference)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineSnapshot {
    /// Shirt composition id at snapshot time ("shirt:xyz")
    pub shirt: String,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Shipping destination captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShippingAddress {
    pub address: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Placed order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Internal user id ("user:xyz")
    pub owner: String,
    pub line_items: Vec<OrderLineSnapshot>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub total: f64,
    pub total_before_discount: f64,
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub total_saved: f64,
    #[serde(default)]
    pub delivery_status: DeliveryStatus,
    pub created_at: String,
    pub payment_time: Option<String>,
    /// Reference to the rendered receipt document, if any
    pub receipt: Option<String>,
}
