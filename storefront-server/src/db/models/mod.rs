//! Database Models
//!
//! One module per persisted entity, plus shared serde helpers for record
//! ids.

pub mod cart;
pub mod catalog_option;
pub mod order;
pub mod serde_helpers;
pub mod shirt;
pub mod user;

pub use cart::{Cart, CartLine};
pub use catalog_option::{CatalogOption, CatalogOptionCreate};
pub use order::{Order, OrderLineSnapshot, ShippingAddress};
pub use shirt::{Shirt, ShirtCreate};
pub use user::{User, UserUpsert};
