//! Database Module
//!
//! Embedded SurrealDB storage. Tables are SCHEMALESS with unique indexes
//! on the natural keys; the schema is small and fixed, so it is defined at
//! startup rather than through a migration tool.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

const NAMESPACE: &str = "storefront";
const DATABASE: &str = "storefront";

impl DbService {
    /// Open the on-disk database at `db_path` (RocksDB engine)
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// Open a throwaway in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);
        Ok(Self { db })
    }
}

/// Define tables and indexes. Idempotent (`IF NOT EXISTS`).
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS user_clerk_id ON user FIELDS clerk_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;

        DEFINE TABLE IF NOT EXISTS catalog_option SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS catalog_fabric_color ON catalog_option FIELDS fabric_id, color_id;

        DEFINE TABLE IF NOT EXISTS shirt SCHEMALESS;

        DEFINE TABLE IF NOT EXISTS cart SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS cart_owner ON cart FIELDS owner UNIQUE;

        DEFINE TABLE IF NOT EXISTS shop_order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS shop_order_owner ON shop_order FIELDS owner;
        ",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

    Ok(())
}
