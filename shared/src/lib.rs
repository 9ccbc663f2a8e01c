//! Shared types for the storefront backend
//!
//! Common types used by the server and its clients: the catalog part
//! taxonomy, cart/order wire views, and decimal money helpers.

pub mod catalog;
pub mod cart;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{CartLineView, CartView, DeliveryStatus, ShirtSummary};
pub use catalog::{ImageRef, PartSelection, PartType};
