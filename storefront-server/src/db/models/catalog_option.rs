//! Catalog Option Model
//!
//! One selectable, priced shirt part scoped to a (fabric, color) pair.
//! Options are immutable once created; repricing means creating a new
//! option, which is why cart lines can safely copy prices.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::catalog::{ImageRef, PartType};
use surrealdb::RecordId;

/// Catalog option entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOption {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub part: PartType,
    pub fabric_id: String,
    pub color_id: String,
    pub price: f64,
    #[serde(default)]
    pub image: ImageRef,
    pub created_at: String,
}

/// Create payload (catalog authoring)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptionCreate {
    pub name: String,
    pub part: PartType,
    pub fabric_id: String,
    pub color_id: String,
    pub price: f64,
    pub image: Option<ImageRef>,
}
