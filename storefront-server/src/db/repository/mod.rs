//! Repository Module
//!
//! One repository per SurrealDB table. Ids follow the "table:id"
//! convention end to end; helpers below normalize raw ids coming from API
//! paths.

pub mod cart;
pub mod catalog_option;
pub mod order;
pub mod shirt;
pub mod user;

pub use cart::CartRepository;
pub use catalog_option::CatalogOptionRepository;
pub use order::OrderRepository;
pub use shirt::ShirtRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as plain database errors; keep
        // them distinguishable for the CAS/create retry paths.
        if msg.contains("already contains") || msg.contains("index") && msg.contains("unique") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Normalize a raw id ("key" or "table:key") into a RecordId for `table`.
/// Returns None for malformed input or a mismatched table prefix.
pub fn parse_record_id(table: &str, raw: &str) -> Option<RecordId> {
    if !crate::utils::validation::is_well_formed_id(raw) {
        return None;
    }
    match raw.split_once(':') {
        Some((t, key)) => {
            if t != table {
                return None;
            }
            Some(RecordId::from_table_key(table, key))
        }
        None => Some(RecordId::from_table_key(table, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id_bare_key() {
        let id = parse_record_id("shirt", "abc123").unwrap();
        assert_eq!(id.to_string(), "shirt:abc123");
    }

    #[test]
    fn test_parse_record_id_prefixed() {
        let id = parse_record_id("shirt", "shirt:abc123").unwrap();
        assert_eq!(id.to_string(), "shirt:abc123");
    }

    #[test]
    fn test_parse_record_id_rejects_wrong_table() {
        assert!(parse_record_id("shirt", "cart:abc123").is_none());
    }

    #[test]
    fn test_parse_record_id_rejects_malformed() {
        assert!(parse_record_id("shirt", "").is_none());
        assert!(parse_record_id("shirt", "shirt:").is_none());
        assert!(parse_record_id("shirt", "shirt:a b c").is_none());
    }
}
