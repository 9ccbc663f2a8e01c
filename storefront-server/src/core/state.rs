//! Server state
//!
//! `ServerState` holds the shared handles every request handler needs: the
//! embedded database, the order read cache and the external collaborator
//! seams. Cloning is shallow (Arc everywhere).

use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::checkout::OrderCache;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{AssetStore, HttpAssetStore, HttpNotifier, NoopNotifier, OrderNotifier};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// TTL cache for order-by-id reads
    pub order_cache: Arc<OrderCache>,
    /// Order-confirmation sender (fire-and-forget)
    pub notifier: Arc<dyn OrderNotifier>,
    /// Catalog image asset host
    pub assets: Arc<dyn AssetStore>,
}

impl ServerState {
    /// Initialize state for production use: open the on-disk database and
    /// wire collaborators from the config.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(config.database_dir())
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::with_db(config.clone(), db_service.db))
    }

    /// Build state around an already-opened database. Tests use this with
    /// the in-memory engine.
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let notifier: Arc<dyn OrderNotifier> = match &config.notify_endpoint {
            Some(endpoint) => Arc::new(HttpNotifier::new(endpoint.clone())),
            None => Arc::new(NoopNotifier),
        };
        let assets: Arc<dyn AssetStore> = Arc::new(HttpAssetStore::new(
            config.asset_endpoint.clone(),
        ));
        let order_cache = Arc::new(OrderCache::new(Duration::from_secs(
            config.order_cache_ttl_secs,
        )));

        Self {
            config,
            db,
            order_cache,
            notifier,
            assets,
        }
    }
}
