//! Identity webhook sync integration tests

mod common;

use common::test_db;
use storefront_server::db::repository::UserRepository;
use storefront_server::users::{IdentityEvent, UserSyncService};

fn event(kind: &str, id: &str, email: Option<&str>) -> IdentityEvent {
    let mut data = serde_json::json!({ "id": id });
    if let Some(email) = email {
        data["email_addresses"] = serde_json::json!([{ "email_address": email }]);
        data["first_name"] = serde_json::json!("Jo");
        data["last_name"] = serde_json::json!("Doe");
    }
    serde_json::from_value(serde_json::json!({ "type": kind, "data": data })).unwrap()
}

#[tokio::test]
async fn test_created_event_materializes_user() {
    let db = test_db().await;
    let sync = UserSyncService::new(db.clone());
    let users = UserRepository::new(db);

    sync.handle_event(event("user.created", "clerk_a", Some("jo@example.com")))
        .await
        .unwrap();

    let user = users.find_by_clerk_id("clerk_a").await.unwrap().unwrap();
    assert_eq!(user.email, "jo@example.com");
    assert_eq!(user.first_name, "Jo");
    assert_eq!(user.role, "customer");
}

#[tokio::test]
async fn test_updated_event_converges_on_latest_profile() {
    let db = test_db().await;
    let sync = UserSyncService::new(db.clone());
    let users = UserRepository::new(db);

    sync.handle_event(event("user.created", "clerk_a", Some("old@example.com")))
        .await
        .unwrap();
    sync.handle_event(event("user.updated", "clerk_a", Some("new@example.com")))
        .await
        .unwrap();

    let user = users.find_by_clerk_id("clerk_a").await.unwrap().unwrap();
    assert_eq!(user.email, "new@example.com");

    // Replaying an update keeps a single record
    sync.handle_event(event("user.updated", "clerk_a", Some("new@example.com")))
        .await
        .unwrap();
    assert!(users.find_by_clerk_id("clerk_a").await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleted_event_removes_user_and_replays_safely() {
    let db = test_db().await;
    let sync = UserSyncService::new(db.clone());
    let users = UserRepository::new(db);

    sync.handle_event(event("user.created", "clerk_a", Some("jo@example.com")))
        .await
        .unwrap();
    sync.handle_event(event("user.deleted", "clerk_a", None))
        .await
        .unwrap();
    assert!(users.find_by_clerk_id("clerk_a").await.unwrap().is_none());

    // The provider may replay deletions
    sync.handle_event(event("user.deleted", "clerk_a", None))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_overlong_email_is_rejected() {
    let db = test_db().await;
    let sync = UserSyncService::new(db.clone());
    let users = UserRepository::new(db);

    let email = format!("{}@example.com", "x".repeat(300));
    let err = sync
        .handle_event(event("user.created", "clerk_a", Some(email.as_str())))
        .await
        .unwrap_err();
    assert!(
        matches!(err, storefront_server::utils::AppError::Validation(_)),
        "got {err:?}"
    );
    assert!(users.find_by_clerk_id("clerk_a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_event_type_is_acknowledged() {
    let db = test_db().await;
    let sync = UserSyncService::new(db);

    sync.handle_event(event("session.created", "sess_1", None))
        .await
        .unwrap();
}
