//! Cart and order wire views
//!
//! These are the shapes exchanged with clients. Monetary fields are `f64`
//! on the wire; all arithmetic happens in `Decimal` (see [`crate::money`]).

use crate::catalog::PartSelection;
use serde::{Deserialize, Serialize};

/// Summary of a shirt composition, embedded when cart lines are resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShirtSummary {
    pub id: String,
    pub fabric_id: String,
    pub color_id: String,
    pub total_price: f64,
    #[serde(default)]
    pub parts: Vec<PartSelection>,
}

/// One line of a cart as seen by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    /// Shirt composition id ("shirt:xyz")
    pub shirt_id: String,
    pub quantity: i32,
    /// Price copied at add time; does not track later catalog changes
    pub unit_price: f64,
    /// Resolved composition details, present on `get_cart` reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shirt: Option<ShirtSummary>,
}

/// The per-user cart aggregate as seen by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub owner: String,
    #[serde(default)]
    pub line_items: Vec<CartLineView>,
    #[serde(default)]
    pub cart_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_after_discount: Option<f64>,
    /// Monotonic version used for compare-and-swap writes
    #[serde(default)]
    pub version: u64,
}

impl CartView {
    /// An empty cart for a user who has never added anything
    pub fn empty(owner: impl Into<String>) -> Self {
        Self {
            id: None,
            owner: owner.into(),
            line_items: Vec::new(),
            cart_total: 0.0,
            total_after_discount: None,
            version: 0,
        }
    }
}

/// Delivery lifecycle of a placed order
///
/// Transitions are forward-only: pending -> shipped -> delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl DeliveryStatus {
    fn rank(&self) -> u8 {
        match self {
            DeliveryStatus::Pending => 0,
            DeliveryStatus::Shipped => 1,
            DeliveryStatus::Delivered => 2,
        }
    }

    /// Whether moving to `next` is a legal forward transition
    pub fn can_transition_to(&self, next: DeliveryStatus) -> bool {
        next.rank() == self.rank() + 1
    }
}
