//! Shared helpers for integration tests

use storefront_server::db::DbService;
use storefront_server::db::models::{Shirt, UserUpsert};
use storefront_server::db::repository::{ShirtRepository, UserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fresh in-memory database with the schema defined
pub async fn test_db() -> Surreal<Db> {
    DbService::memory()
        .await
        .expect("in-memory database should open")
        .db
}

/// Seed a user and return the internal id ("user:xyz")
pub async fn seed_user(db: &Surreal<Db>, clerk_id: &str) -> String {
    let users = UserRepository::new(db.clone());
    let user = users
        .upsert(UserUpsert {
            clerk_id: clerk_id.to_string(),
            email: format!("{clerk_id}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            ..Default::default()
        })
        .await
        .expect("user seed should succeed");
    user.id.expect("seeded user has an id").to_string()
}

/// Seed a shirt composition priced at `total_price`, returning its id
/// ("shirt:xyz")
pub async fn seed_shirt(db: &Surreal<Db>, owner: &str, total_price: f64) -> String {
    let shirts = ShirtRepository::new(db.clone());
    let shirt = shirts
        .create(Shirt {
            id: None,
            owner: owner.to_string(),
            fabric_id: "fab-oxford".to_string(),
            color_id: "col-white".to_string(),
            parts: Vec::new(),
            total_price,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
        .await
        .expect("shirt seed should succeed");
    shirt.id.expect("seeded shirt has an id").to_string()
}
