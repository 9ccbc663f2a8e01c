//! Cart Repository
//!
//! The cart row is the only shared mutable resource in the system. All
//! writes go through `update_checked`, a compare-and-swap on the cart's
//! version field; a lost CAS returns None and the caller re-reads and
//! retries.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cart, CartLine};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CART_TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user's cart by internal owner id ("user:xyz")
    pub async fn find_by_owner(&self, owner: &str) -> RepoResult<Option<Cart>> {
        let carts: Vec<Cart> = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE owner = $owner")
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Create the user's cart (lazily, on first add). The unique index on
    /// `owner` turns a concurrent double-create into a Duplicate error,
    /// which callers treat as a CAS conflict and retry.
    pub async fn create_for_owner(
        &self,
        owner: &str,
        line_items: Vec<CartLine>,
        cart_total: f64,
    ) -> RepoResult<Cart> {
        let cart = Cart {
            id: None,
            owner: owner.to_string(),
            line_items,
            cart_total,
            total_after_discount: None,
            version: 1,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        let created: Option<Cart> = self.base.db().create(CART_TABLE).content(cart).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Compare-and-swap write: replaces lines and totals only if the
    /// stored version still matches `expected_version`. Returns None when
    /// the version moved (concurrent writer won).
    pub async fn update_checked(
        &self,
        owner: &str,
        expected_version: u64,
        line_items: Vec<CartLine>,
        cart_total: f64,
        total_after_discount: Option<f64>,
    ) -> RepoResult<Option<Cart>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE cart SET line_items = $lines, cart_total = $total, \
                 total_after_discount = $total_after_discount, \
                 version = version + 1, updated_at = $now \
                 WHERE owner = $owner AND version = $version RETURN AFTER",
            )
            .bind(("lines", line_items))
            .bind(("total", cart_total))
            .bind(("total_after_discount", total_after_discount))
            .bind(("now", chrono::Utc::now().to_rfc3339()))
            .bind(("owner", owner.to_string()))
            .bind(("version", expected_version))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }
}
