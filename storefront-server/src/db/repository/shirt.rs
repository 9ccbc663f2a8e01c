//! Shirt Composition Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Shirt;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SHIRT_TABLE: &str = "shirt";

#[derive(Clone)]
pub struct ShirtRepository {
    base: BaseRepository,
}

impl ShirtRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, shirt: Shirt) -> RepoResult<Shirt> {
        let created: Option<Shirt> = self.base.db().create(SHIRT_TABLE).content(shirt).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create shirt".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Shirt>> {
        let Some(record_id) = parse_record_id(SHIRT_TABLE, id) else {
            return Ok(None);
        };
        let shirt: Option<Shirt> = self.base.db().select(record_id).await?;
        Ok(shirt)
    }

    /// Batch lookup for cart-line resolution. Unknown ids are skipped, not
    /// errors; a line can outlive its composition only if data was removed
    /// out of band.
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Shirt>> {
        let mut shirts = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(shirt) = self.find_by_id(id).await? {
                shirts.push(shirt);
            }
        }
        Ok(shirts)
    }
}
