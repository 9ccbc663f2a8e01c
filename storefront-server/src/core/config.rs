//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/storefront | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development / staging / production |
//! | ORDER_CACHE_TTL_SECS | 300 | order read-cache time to live |
//! | NOTIFY_ENDPOINT | (unset) | order-confirmation sink; unset = no-op |
//! | ASSET_ENDPOINT | (unset) | image asset host; unset = uploads rejected |
//! | WEBHOOK_SECRET | (unset) | shared secret for identity webhooks |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory, stores the embedded database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// TTL for the order read cache, in seconds
    pub order_cache_ttl_secs: u64,
    /// Order-confirmation notification endpoint; None disables sending
    pub notify_endpoint: Option<String>,
    /// Asset host endpoint for catalog image uploads
    pub asset_endpoint: Option<String>,
    /// Shared secret expected on identity webhook requests
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            order_cache_ttl_secs: std::env::var("ORDER_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            notify_endpoint: std::env::var("NOTIFY_ENDPOINT").ok().filter(|v| !v.is_empty()),
            asset_endpoint: std::env::var("ASSET_ENDPOINT").ok().filter(|v| !v.is_empty()),
            webhook_secret: std::env::var("WEBHOOK_SECRET").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Directory holding the embedded database files
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
