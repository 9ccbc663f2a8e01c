//! Cart Aggregate Manager
//!
//! Maintains the single mutable cart per user. Every mutation follows the
//! same shape: resolve the user, read the cart, rebuild the line set in
//! memory, recompute the total in `Decimal`, then write back with a
//! compare-and-swap on the cart's version. A lost CAS re-reads and
//! retries; exhausted retries surface as a Conflict.

use shared::cart::CartView;
use shared::money;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Cart, CartLine};
use crate::db::repository::{CartRepository, RepoError, ShirtRepository, UserRepository};
use crate::utils::{AppError, AppResult};

/// Bounded retries for CAS conflicts before giving up
const CAS_MAX_RETRIES: u32 = 5;

#[derive(Clone)]
pub struct CartManager {
    carts: CartRepository,
    shirts: ShirtRepository,
    users: UserRepository,
}

impl CartManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            shirts: ShirtRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    async fn resolve_owner(&self, clerk_id: &str) -> AppResult<String> {
        self.users
            .resolve_internal_user_id(clerk_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("User {clerk_id} not found")))
    }

    /// Add `quantity` of a shirt to the user's cart, creating the cart
    /// lazily on first use. An existing line for the same shirt is
    /// incremented; the unit price is copied from the shirt's total price
    /// at this moment and never re-read afterwards.
    pub async fn add_line(
        &self,
        clerk_id: &str,
        shirt_id: &str,
        quantity: i32,
    ) -> AppResult<CartView> {
        money::validate_quantity(quantity)?;

        let owner = self.resolve_owner(clerk_id).await?;
        let shirt = self
            .shirts
            .find_by_id(shirt_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Shirt {shirt_id} not found")))?;
        let shirt_key = shirt
            .id
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_else(|| shirt_id.to_string());
        money::validate_price(shirt.total_price, "unit price")?;

        for _ in 0..CAS_MAX_RETRIES {
            match self.carts.find_by_owner(&owner).await.map_err(AppError::from)? {
                None => {
                    let line = CartLine {
                        shirt: shirt_key.clone(),
                        quantity,
                        unit_price: shirt.total_price,
                    };
                    let total = money::to_f64(money::line_total(line.unit_price, line.quantity));
                    match self.carts.create_for_owner(&owner, vec![line], total).await {
                        Ok(cart) => return Ok(cart.to_view(clerk_id)),
                        // Concurrent first-add won the unique owner index
                        Err(RepoError::Duplicate(_)) => continue,
                        Err(e) => return Err(e.into()),
                    }
                }
                Some(cart) => {
                    let mut lines = cart.line_items.clone();
                    match lines.iter_mut().find(|l| l.shirt == shirt_key) {
                        Some(line) => {
                            // Quantities are unbounded above, so the sum can
                            // exceed i32
                            line.quantity =
                                line.quantity.checked_add(quantity).ok_or_else(|| {
                                    AppError::validation(
                                        "Quantity exceeds the representable range",
                                    )
                                })?;
                        }
                        None => lines.push(CartLine {
                            shirt: shirt_key.clone(),
                            quantity,
                            unit_price: shirt.total_price,
                        }),
                    }
                    if let Some(updated) = self.write_back(&cart, lines).await? {
                        return Ok(updated.to_view(clerk_id));
                    }
                }
            }
        }

        Err(AppError::conflict(format!(
            "Cart for {clerk_id} is being modified concurrently"
        )))
    }

    /// Set the quantity of an existing line. Zero or negative removes the
    /// line (never an error); a positive quantity for a shirt that is not
    /// a current line is a distinct LineNotFound failure.
    pub async fn set_quantity(
        &self,
        clerk_id: &str,
        shirt_id: &str,
        new_quantity: i32,
    ) -> AppResult<CartView> {
        let owner = self.resolve_owner(clerk_id).await?;
        let shirt_key = normalize_shirt_key(shirt_id);

        for _ in 0..CAS_MAX_RETRIES {
            let cart = self
                .carts
                .find_by_owner(&owner)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::not_found(format!("No cart for user {clerk_id}")))?;

            let mut lines = cart.line_items.clone();
            if new_quantity <= 0 {
                // Removal path: absent lines are fine
                lines.retain(|l| l.shirt != shirt_key);
            } else {
                let line = lines
                    .iter_mut()
                    .find(|l| l.shirt == shirt_key)
                    .ok_or_else(|| {
                        AppError::line_not_found(format!("Shirt {shirt_id} is not in the cart"))
                    })?;
                line.quantity = new_quantity;
            }

            if let Some(updated) = self.write_back(&cart, lines).await? {
                return Ok(updated.to_view(clerk_id));
            }
        }

        Err(AppError::conflict(format!(
            "Cart for {clerk_id} is being modified concurrently"
        )))
    }

    /// Remove a line unconditionally. An absent line, or no cart at all,
    /// is a no-op, not an error.
    pub async fn remove_line(&self, clerk_id: &str, shirt_id: &str) -> AppResult<CartView> {
        let owner = self.resolve_owner(clerk_id).await?;
        let shirt_key = normalize_shirt_key(shirt_id);

        for _ in 0..CAS_MAX_RETRIES {
            let Some(cart) = self.carts.find_by_owner(&owner).await.map_err(AppError::from)?
            else {
                return Ok(CartView::empty(clerk_id));
            };

            let mut lines = cart.line_items.clone();
            lines.retain(|l| l.shirt != shirt_key);

            if let Some(updated) = self.write_back(&cart, lines).await? {
                return Ok(updated.to_view(clerk_id));
            }
        }

        Err(AppError::conflict(format!(
            "Cart for {clerk_id} is being modified concurrently"
        )))
    }

    /// Current cart with line shirts resolved to composition summaries.
    /// A user who never added anything gets an empty view, not an error.
    pub async fn get_cart(&self, clerk_id: &str) -> AppResult<CartView> {
        let owner = self.resolve_owner(clerk_id).await?;

        let Some(cart) = self.carts.find_by_owner(&owner).await.map_err(AppError::from)? else {
            return Ok(CartView::empty(clerk_id));
        };

        let shirt_ids: Vec<String> = cart.line_items.iter().map(|l| l.shirt.clone()).collect();
        let shirts = self.shirts.find_by_ids(&shirt_ids).await.map_err(AppError::from)?;

        let mut view = cart.to_view(clerk_id);
        for line in &mut view.line_items {
            line.shirt = shirts
                .iter()
                .find(|s| {
                    s.id.as_ref().map(|i| i.to_string()).as_deref() == Some(line.shirt_id.as_str())
                })
                .map(|s| s.summary());
        }
        Ok(view)
    }

    /// Empty the cart: no lines, zero totals, no discount carry-over.
    pub async fn clear_cart(&self, clerk_id: &str) -> AppResult<CartView> {
        let owner = self.resolve_owner(clerk_id).await?;
        self.clear_cart_for_owner(&owner).await?;
        Ok(CartView::empty(clerk_id))
    }

    /// Internal-id variant used by checkout, which has already resolved
    /// the user.
    pub async fn clear_cart_for_owner(&self, owner: &str) -> AppResult<()> {
        for _ in 0..CAS_MAX_RETRIES {
            let Some(cart) = self.carts.find_by_owner(owner).await.map_err(AppError::from)?
            else {
                return Ok(());
            };
            let updated = self
                .carts
                .update_checked(owner, cart.version, Vec::new(), 0.0, None)
                .await
                .map_err(AppError::from)?;
            if updated.is_some() {
                return Ok(());
            }
        }
        Err(AppError::conflict(format!(
            "Cart for {owner} is being modified concurrently"
        )))
    }

    /// Recompute the total over the final line set and CAS-write it.
    /// Returns None when the CAS lost and the caller should retry.
    async fn write_back(&self, cart: &Cart, lines: Vec<CartLine>) -> AppResult<Option<Cart>> {
        let total = money::cart_total(lines.iter().map(|l| (l.unit_price, l.quantity)));
        let updated = self
            .carts
            .update_checked(
                &cart.owner,
                cart.version,
                lines,
                money::to_f64(total),
                cart.total_after_discount,
            )
            .await
            .map_err(AppError::from)?;
        if updated.is_none() {
            tracing::debug!(owner = %cart.owner, version = cart.version, "Cart CAS lost, retrying");
        }
        Ok(updated)
    }
}

/// Cart lines store shirts in "shirt:key" form; accept bare keys at the API
fn normalize_shirt_key(raw: &str) -> String {
    if raw.contains(':') {
        raw.to_string()
    } else {
        format!("shirt:{raw}")
    }
}
