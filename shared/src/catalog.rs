//! Catalog part taxonomy
//!
//! Shirt parts are a closed set of variants. Every selection carries a
//! mandatory price, so composition totals are exhaustive over variants
//! instead of relying on optional-field presence checks.

use serde::{Deserialize, Serialize};

/// Configurable shirt part kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartType {
    Collar,
    Cuff,
    Back,
    Pocket,
    Placket,
    Sleeve,
    Fit,
    Monogram,
    Bottom,
}

impl PartType {
    /// All part kinds, in display order
    pub const ALL: [PartType; 9] = [
        PartType::Collar,
        PartType::Cuff,
        PartType::Back,
        PartType::Pocket,
        PartType::Placket,
        PartType::Sleeve,
        PartType::Fit,
        PartType::Monogram,
        PartType::Bottom,
    ];

    /// Table-friendly name ("collar", "cuff", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Collar => "collar",
            PartType::Cuff => "cuff",
            PartType::Back => "back",
            PartType::Pocket => "pocket",
            PartType::Placket => "placket",
            PartType::Sleeve => "sleeve",
            PartType::Fit => "fit",
            PartType::Monogram => "monogram",
            PartType::Bottom => "bottom",
        }
    }
}

/// Reference to an uploaded asset on the external image host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    pub public_id: String,
}

/// One chosen catalog option inside a shirt composition
///
/// The price is copied from the catalog option at selection time and is
/// never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartSelection {
    pub part: PartType,
    /// Catalog option id this selection was made from ("catalog_option:xyz")
    pub option_id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}
