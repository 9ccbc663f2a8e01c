//! Catalog Option Repository
//!
//! Options are scoped to a (fabric, color) pair; every read path requires
//! both keys, and querying with either missing yields no results.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::CatalogOption;
use shared::catalog::PartType;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CATALOG_TABLE: &str = "catalog_option";

#[derive(Clone)]
pub struct CatalogOptionRepository {
    base: BaseRepository,
}

impl CatalogOptionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All options for a fabric/color pair, optionally narrowed to a part
    pub async fn find_by_fabric_color(
        &self,
        fabric_id: &str,
        color_id: &str,
        part: Option<PartType>,
    ) -> RepoResult<Vec<CatalogOption>> {
        let mut result = match part {
            Some(part) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM catalog_option \
                         WHERE fabric_id = $fabric AND color_id = $color AND part = $part \
                         ORDER BY name",
                    )
                    .bind(("fabric", fabric_id.to_string()))
                    .bind(("color", color_id.to_string()))
                    .bind(("part", part))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM catalog_option \
                         WHERE fabric_id = $fabric AND color_id = $color ORDER BY name",
                    )
                    .bind(("fabric", fabric_id.to_string()))
                    .bind(("color", color_id.to_string()))
                    .await?
            }
        };
        let options: Vec<CatalogOption> = result.take(0)?;
        Ok(options)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CatalogOption>> {
        let Some(record_id) = parse_record_id(CATALOG_TABLE, id) else {
            return Ok(None);
        };
        let option: Option<CatalogOption> = self.base.db().select(record_id).await?;
        Ok(option)
    }

    pub async fn create(&self, option: CatalogOption) -> RepoResult<CatalogOption> {
        let created: Option<CatalogOption> = self
            .base
            .db()
            .create(CATALOG_TABLE)
            .content(option)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create catalog option".to_string()))
    }
}
