//! Checkout
//!
//! Order creation from cart state, cached order reads, and delivery-status
//! transitions.

pub mod cache;
pub mod service;

pub use cache::OrderCache;
pub use service::{CheckoutService, PlaceOrder};
