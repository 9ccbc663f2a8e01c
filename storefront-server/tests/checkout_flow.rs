//! Checkout and order lifecycle integration tests

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{seed_shirt, seed_user, test_db};
use shared::cart::DeliveryStatus;
use storefront_server::carts::CartManager;
use storefront_server::checkout::{CheckoutService, OrderCache, PlaceOrder};
use storefront_server::db::models::ShippingAddress;
use storefront_server::services::NoopNotifier;
use storefront_server::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

fn checkout_service(db: &Surreal<Db>) -> CheckoutService {
    CheckoutService::new(
        db.clone(),
        Arc::new(OrderCache::new(Duration::from_secs(300))),
        Arc::new(NoopNotifier),
    )
}

fn place_request(total: f64) -> PlaceOrder {
    PlaceOrder {
        shipping_address: ShippingAddress {
            address: "1 Test Street".to_string(),
            zip_code: "12345".to_string(),
            country: "PT".to_string(),
            phone_number: None,
        },
        payment_method: "card".to_string(),
        total,
        total_before_discount: total,
        coupon_code: None,
        total_saved: 0.0,
        payment_time: None,
    }
}

#[tokio::test]
async fn test_checkout_snapshots_cart_and_clears_it() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 50.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 2).await.unwrap();
    let order_id = checkout
        .place_order("clerk_a", place_request(100.0))
        .await
        .unwrap();

    let order = checkout.get_order(&order_id).await.unwrap().unwrap();
    assert_eq!(order.line_items.len(), 1);
    assert_eq!(order.line_items[0].quantity, 2);
    assert_eq!(order.line_items[0].unit_price, 50.0);
    assert_eq!(order.total, 100.0);
    assert_eq!(order.delivery_status, DeliveryStatus::Pending);

    // Checkout consumed the cart
    let cart = manager.get_cart("clerk_a").await.unwrap();
    assert!(cart.line_items.is_empty());
    assert_eq!(cart.cart_total, 0.0);
}

#[tokio::test]
async fn test_order_is_unaffected_by_later_cart_mutations() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 50.0).await;
    let other = seed_shirt(&db, &owner, 99.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 1).await.unwrap();
    let order_id = checkout
        .place_order("clerk_a", place_request(50.0))
        .await
        .unwrap();

    // Rebuild the cart after checkout
    manager.add_line("clerk_a", &other, 3).await.unwrap();

    let order = checkout.get_order(&order_id).await.unwrap().unwrap();
    assert_eq!(order.line_items.len(), 1);
    assert_eq!(order.line_items[0].shirt, shirt);
    assert_eq!(order.line_items[0].quantity, 1);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let db = test_db().await;
    seed_user(&db, "clerk_a").await;
    let checkout = checkout_service(&db);

    let err = checkout
        .place_order("clerk_a", place_request(0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_checkout_for_unknown_user_is_not_found() {
    let db = test_db().await;
    let checkout = checkout_service(&db);

    let err = checkout
        .place_order("clerk_ghost", place_request(10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_get_order_with_malformed_id_is_none() {
    let db = test_db().await;
    let checkout = checkout_service(&db);

    assert!(checkout.get_order("").await.unwrap().is_none());
    assert!(
        checkout
            .get_order("shop_order:abc; DELETE user")
            .await
            .unwrap()
            .is_none()
    );
    assert!(checkout.get_order("not an id").await.unwrap().is_none());
}

#[tokio::test]
async fn test_orders_list_newest_first() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 10.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 1).await.unwrap();
    let first = checkout
        .place_order("clerk_a", place_request(10.0))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    manager.add_line("clerk_a", &shirt, 2).await.unwrap();
    let second = checkout
        .place_order("clerk_a", place_request(20.0))
        .await
        .unwrap();

    let orders = checkout.list_orders("clerk_a").await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id.as_ref().unwrap().to_string(), second);
    assert_eq!(orders[1].id.as_ref().unwrap().to_string(), first);
}

#[tokio::test]
async fn test_delivery_status_moves_forward_only() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 10.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 1).await.unwrap();
    let order_id = checkout
        .place_order("clerk_a", place_request(10.0))
        .await
        .unwrap();

    // Skipping a stage is rejected
    let err = checkout
        .update_delivery_status(&order_id, DeliveryStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let order = checkout
        .update_delivery_status(&order_id, DeliveryStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::Shipped);

    // Going backwards is rejected
    let err = checkout
        .update_delivery_status(&order_id, DeliveryStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let order = checkout
        .update_delivery_status(&order_id, DeliveryStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(order.delivery_status, DeliveryStatus::Delivered);
}

#[tokio::test]
async fn test_status_update_invalidates_cached_read() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 10.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 1).await.unwrap();
    let order_id = checkout
        .place_order("clerk_a", place_request(10.0))
        .await
        .unwrap();

    // Warm the cache, then transition
    let cached = checkout.get_order(&order_id).await.unwrap().unwrap();
    assert_eq!(cached.delivery_status, DeliveryStatus::Pending);

    checkout
        .update_delivery_status(&order_id, DeliveryStatus::Shipped)
        .await
        .unwrap();

    // The next read must see the new status, not the cached one
    let fresh = checkout.get_order(&order_id).await.unwrap().unwrap();
    assert_eq!(fresh.delivery_status, DeliveryStatus::Shipped);
}

#[tokio::test]
async fn test_cached_read_by_bare_key_sees_status_transition() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 10.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 1).await.unwrap();
    let order_id = checkout
        .place_order("clerk_a", place_request(10.0))
        .await
        .unwrap();
    let bare_key = order_id.strip_prefix("shop_order:").unwrap().to_string();

    // Warm the cache through the bare-key alias, transition through the
    // canonical id
    let cached = checkout.get_order(&bare_key).await.unwrap().unwrap();
    assert_eq!(cached.delivery_status, DeliveryStatus::Pending);

    checkout
        .update_delivery_status(&order_id, DeliveryStatus::Shipped)
        .await
        .unwrap();

    let fresh = checkout.get_order(&bare_key).await.unwrap().unwrap();
    assert_eq!(fresh.delivery_status, DeliveryStatus::Shipped);
}

#[tokio::test]
async fn test_checkout_survives_failed_cart_clear() {
    let db = test_db().await;
    let owner = seed_user(&db, "clerk_a").await;
    let shirt = seed_shirt(&db, &owner, 25.0).await;
    let manager = CartManager::new(db.clone());
    let checkout = checkout_service(&db);

    manager.add_line("clerk_a", &shirt, 2).await.unwrap();

    // Make the post-checkout clear fail: an empty line set now violates a
    // field assertion
    db.query("DEFINE FIELD line_items ON cart ASSERT array::len($value) > 0")
        .await
        .unwrap();

    // The order is committed, so checkout must still succeed
    let order_id = checkout
        .place_order("clerk_a", place_request(50.0))
        .await
        .unwrap();

    let order = checkout.get_order(&order_id).await.unwrap().unwrap();
    assert_eq!(order.total, 50.0);

    // The clear itself failed; the cart still holds its lines
    let cart = manager.get_cart("clerk_a").await.unwrap();
    assert_eq!(cart.line_items.len(), 1);
}

#[tokio::test]
async fn test_status_update_for_unknown_order_is_not_found() {
    let db = test_db().await;
    let checkout = checkout_service(&db);

    let err = checkout
        .update_delivery_status("shop_order:ghost", DeliveryStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}
