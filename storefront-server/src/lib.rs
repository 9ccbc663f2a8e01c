//! Storefront Server
//!
//! Backend for a made-to-order shirt storefront: catalog options and shirt
//! compositions, a per-user cart whose total always matches its lines,
//! checkout into immutable orders, and webhook-driven user sync from the
//! identity provider.
//!
//! # Module layout
//!
//! - [`core`] - configuration, shared state, HTTP server lifecycle
//! - [`db`] - embedded SurrealDB, models and repositories
//! - [`carts`] - the cart aggregate and its mutations
//! - [`checkout`] - order placement, cached reads, delivery transitions
//! - [`users`] - identity webhook sync
//! - [`services`] - notifier and asset-host seams
//! - [`api`] - axum routers and handlers

pub mod api;
pub mod carts;
pub mod checkout;
pub mod core;
pub mod db;
pub mod services;
pub mod users;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};
