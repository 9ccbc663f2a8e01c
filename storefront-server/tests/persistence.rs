//! On-disk engine smoke test
//!
//! The other suites run on the in-memory engine; this one opens the
//! RocksDB engine the production server uses and checks the schema
//! (unique cart owner index included) behaves the same way.

use storefront_server::db::DbService;
use storefront_server::db::models::{Cart, UserUpsert};
use storefront_server::db::repository::{CartRepository, RepoError, UserRepository};

#[tokio::test]
async fn test_rocksdb_engine_enforces_schema() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("storefront.db");
    let service = DbService::open(&db_path.to_string_lossy())
        .await
        .expect("on-disk database should open");

    let users = UserRepository::new(service.db.clone());
    let user = users
        .upsert(UserUpsert {
            clerk_id: "clerk_disk".to_string(),
            email: "disk@example.com".to_string(),
            first_name: "Disk".to_string(),
            last_name: "User".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let owner = user.id.unwrap().to_string();

    let carts = CartRepository::new(service.db.clone());
    carts
        .create_for_owner(&owner, Vec::new(), 0.0)
        .await
        .unwrap();

    // Second cart for the same owner must hit the unique index
    let err = carts
        .create_for_owner(&owner, Vec::new(), 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");

    let found: Option<Cart> = carts.find_by_owner(&owner).await.unwrap();
    assert!(found.is_some());
}
