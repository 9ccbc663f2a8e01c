//! Checkout Service
//!
//! Converts a cart's current state into an immutable order, independent of
//! later cart or catalog changes, and serves order reads through the TTL
//! cache.

use std::sync::Arc;

use shared::cart::DeliveryStatus;
use shared::money;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::carts::CartManager;
use crate::checkout::OrderCache;
use crate::db::models::{Order, OrderLineSnapshot, ShippingAddress};
use crate::db::repository::order::ORDER_TABLE;
use crate::db::repository::{CartRepository, OrderRepository, UserRepository, parse_record_id};
use crate::services::OrderNotifier;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Checkout request, as received from the storefront
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub total: f64,
    pub total_before_discount: f64,
    pub coupon_code: Option<String>,
    pub total_saved: f64,
    pub payment_time: Option<String>,
}

#[derive(Clone)]
pub struct CheckoutService {
    orders: OrderRepository,
    carts: CartRepository,
    users: UserRepository,
    cart_manager: CartManager,
    cache: Arc<OrderCache>,
    notifier: Arc<dyn OrderNotifier>,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>, cache: Arc<OrderCache>, notifier: Arc<dyn OrderNotifier>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            cart_manager: CartManager::new(db),
            cache,
            notifier,
        }
    }

    /// Place an order from the user's current cart.
    ///
    /// Cart lines are copied by value into the order, so later cart or
    /// catalog changes cannot alter it. On success the originating cart is
    /// cleared, and the confirmation notification is dispatched on a
    /// detached task. A failed notification is logged, never propagated
    /// into the committed order.
    pub async fn place_order(&self, clerk_id: &str, req: PlaceOrder) -> AppResult<String> {
        money::validate_price(req.total, "total")?;
        money::validate_price(req.total_before_discount, "total before discount")?;
        validate_required_text(&req.shipping_address.address, "address", MAX_ADDRESS_LEN)?;
        validate_required_text(&req.shipping_address.zip_code, "zip code", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.shipping_address.country, "country", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(
            &req.shipping_address.phone_number,
            "phone number",
            MAX_SHORT_TEXT_LEN,
        )?;

        let user = self
            .users
            .find_by_clerk_id(clerk_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("User {clerk_id} not found")))?;
        let owner = user
            .id
            .as_ref()
            .map(|i| i.to_string())
            .ok_or_else(|| AppError::internal("User record has no id"))?;

        let cart = self
            .carts
            .find_by_owner(&owner)
            .await
            .map_err(AppError::from)?
            .filter(|c| !c.line_items.is_empty())
            .ok_or_else(|| AppError::validation("Cart is empty"))?;

        // Snapshot by value
        let line_items: Vec<OrderLineSnapshot> = cart
            .line_items
            .iter()
            .map(|l| OrderLineSnapshot {
                shirt: l.shirt.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();

        if !money::money_eq(req.total_before_discount, cart.cart_total) {
            tracing::warn!(
                clerk_id,
                client_total = req.total_before_discount,
                cart_total = cart.cart_total,
                "Client-reported total disagrees with cart total"
            );
        }

        let order = Order {
            id: None,
            owner: owner.clone(),
            line_items,
            shipping_address: req.shipping_address,
            payment_method: req.payment_method,
            total: req.total,
            total_before_discount: req.total_before_discount,
            coupon_code: req.coupon_code,
            total_saved: req.total_saved,
            delivery_status: DeliveryStatus::Pending,
            created_at: chrono::Utc::now().to_rfc3339(),
            payment_time: req.payment_time,
            receipt: None,
        };

        let created = self.orders.create(order).await.map_err(AppError::from)?;
        let order_id = created
            .id
            .as_ref()
            .map(|i| i.to_string())
            .ok_or_else(|| AppError::internal("Created order has no id"))?;

        // The order is committed; a failed clear must not fail the checkout
        // or invite a retry that duplicates the order
        if let Err(e) = self.cart_manager.clear_cart_for_owner(&owner).await {
            tracing::warn!(error = %e, order_id, clerk_id, "Cart not cleared after checkout");
        }

        // Fire-and-forget: the order is committed whatever happens here
        let notifier = self.notifier.clone();
        let recipient = user.email.clone();
        let snapshot = created.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_confirmation(&recipient, &snapshot).await {
                tracing::warn!(error = %e, recipient, "Order confirmation failed to send");
            }
        });

        tracing::info!(order_id, clerk_id, "Order placed");
        Ok(order_id)
    }

    /// Orders may be addressed by bare key or by the canonical
    /// "shop_order:key" form; the cache must treat both as one entry.
    fn cache_key(&self, order_id: &str) -> Option<String> {
        parse_record_id(ORDER_TABLE, order_id).map(|id| id.to_string())
    }

    /// Order by id, through the cache. Malformed and unknown ids both
    /// resolve to None; callers report a not-found result, never a hard
    /// failure.
    pub async fn get_order(&self, order_id: &str) -> AppResult<Option<Order>> {
        let Some(key) = self.cache_key(order_id) else {
            return Ok(None);
        };
        if let Some(order) = self.cache.get(&key) {
            return Ok(Some(order));
        }
        let Some(order) = self.orders.find_by_id(order_id).await.map_err(AppError::from)? else {
            return Ok(None);
        };
        self.cache.insert(&key, order.clone());
        Ok(Some(order))
    }

    /// All of a user's orders, newest first
    pub async fn list_orders(&self, clerk_id: &str) -> AppResult<Vec<Order>> {
        let owner = self
            .users
            .resolve_internal_user_id(clerk_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("User {clerk_id} not found")))?;
        self.orders.find_by_owner(&owner).await.map_err(AppError::from)
    }

    /// Advance the delivery status. Transitions are forward-only, and the
    /// cache entry is invalidated so status reads are never stale.
    pub async fn update_delivery_status(
        &self,
        order_id: &str,
        next: DeliveryStatus,
    ) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if !order.delivery_status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Illegal delivery transition: {:?} -> {:?}",
                order.delivery_status, next
            )));
        }

        let updated = self
            .orders
            .set_delivery_status(order_id, next)
            .await
            .map_err(AppError::from)?;
        if let Some(key) = self.cache_key(order_id) {
            self.cache.invalidate(&key);
        }

        tracing::info!(order_id, status = ?next, "Delivery status updated");
        Ok(updated)
    }
}
