//! Cart Aggregate Model
//!
//! One mutable cart per user. The invariant `cart_total == Σ unit_price ×
//! quantity` must hold after every persisted mutation; `version` backs the
//! compare-and-swap writes that keep concurrent mutations from losing
//! updates.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::cart::{CartLineView, CartView};
use surrealdb::RecordId;

/// One (shirt, quantity, price-at-add-time) line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Shirt composition id ("shirt:xyz")
    pub shirt: String,
    pub quantity: i32,
    /// Copied from the shirt's total price when the line was added
    pub unit_price: f64,
}

/// Cart aggregate entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Internal user id ("user:xyz"), unique per cart
    pub owner: String,
    #[serde(default)]
    pub line_items: Vec<CartLine>,
    #[serde(default)]
    pub cart_total: f64,
    pub total_after_discount: Option<f64>,
    /// Monotonic version, bumped by every successful write
    #[serde(default)]
    pub version: u64,
    pub updated_at: String,
}

impl Cart {
    /// Client-facing view; `owner` is reported as the external id the
    /// caller addressed the cart with.
    pub fn to_view(&self, clerk_id: &str) -> CartView {
        CartView {
            id: self.id.as_ref().map(|i| i.to_string()),
            owner: clerk_id.to_string(),
            line_items: self
                .line_items
                .iter()
                .map(|line| CartLineView {
                    shirt_id: line.shirt.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    shirt: None,
                })
                .collect(),
            cart_total: self.cart_total,
            total_after_discount: self.total_after_discount,
            version: self.version,
        }
    }
}
