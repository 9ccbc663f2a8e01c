//! Cart Aggregate
//!
//! The single per-user mutable cart and its consistency invariant:
//! `cart_total == Σ unit_price × quantity` after every mutation.

pub mod manager;

pub use manager::CartManager;
