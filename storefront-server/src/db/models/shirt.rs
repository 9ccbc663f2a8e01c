//! Shirt Composition Model
//!
//! A shirt is an immutable-after-creation snapshot of chosen catalog
//! options. `total_price` is the decimal sum of part prices at creation
//! time and is never recomputed afterwards.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::cart::ShirtSummary;
use shared::catalog::PartSelection;
use surrealdb::RecordId;

/// Shirt composition entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shirt {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Internal user id ("user:xyz")
    pub owner: String,
    pub fabric_id: String,
    pub color_id: String,
    pub parts: Vec<PartSelection>,
    /// Sum of part prices at creation time
    pub total_price: f64,
    pub created_at: String,
}

impl Shirt {
    /// Client-facing summary for resolved cart lines
    pub fn summary(&self) -> ShirtSummary {
        ShirtSummary {
            id: self.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            fabric_id: self.fabric_id.clone(),
            color_id: self.color_id.clone(),
            total_price: self.total_price,
            parts: self.parts.clone(),
        }
    }
}

/// Create payload from the customizer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShirtCreate {
    pub clerk_id: String,
    pub fabric_id: String,
    pub color_id: String,
    /// Catalog option ids, one per selected part
    pub option_ids: Vec<String>,
}
