//! Catalog API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use shared::catalog::{ImageRef, PartType};
use shared::money;

use crate::core::ServerState;
use crate::db::models::{CatalogOption, CatalogOptionCreate};
use crate::db::repository::CatalogOptionRepository;
use crate::utils::validation::{self, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsQuery {
    pub fabric_id: String,
    pub color_id: String,
    #[serde(default)]
    pub part: Option<PartType>,
}

/// GET /api/catalog/options?fabricId=...&colorId=... - options for a
/// fabric/color pair, optionally narrowed to one part
pub async fn list_options(
    State(state): State<ServerState>,
    Query(query): Query<OptionsQuery>,
) -> AppResult<Json<Vec<CatalogOption>>> {
    validate_required_text(&query.fabric_id, "fabricId", validation::MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&query.color_id, "colorId", validation::MAX_SHORT_TEXT_LEN)?;

    let repo = CatalogOptionRepository::new(state.db.clone());
    let options = repo
        .find_by_fabric_color(&query.fabric_id, &query.color_id, query.part)
        .await?;
    Ok(Json(options))
}

/// GET /api/catalog/options/:id
pub async fn get_option(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogOption>> {
    let repo = CatalogOptionRepository::new(state.db.clone());
    let option = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Catalog option {id} not found")))?;
    Ok(Json(option))
}

/// POST /api/catalog/options - catalog authoring
pub async fn create_option(
    State(state): State<ServerState>,
    Json(req): Json<CatalogOptionCreate>,
) -> AppResult<Json<CatalogOption>> {
    validate_required_text(&req.name, "name", validation::MAX_NAME_LEN)?;
    validate_required_text(&req.fabric_id, "fabricId", validation::MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.color_id, "colorId", validation::MAX_SHORT_TEXT_LEN)?;
    money::validate_price(req.price, "price")?;

    let option = CatalogOption {
        id: None,
        name: req.name,
        part: req.part,
        fabric_id: req.fabric_id,
        color_id: req.color_id,
        price: req.price,
        image: req.image.unwrap_or_default(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let repo = CatalogOptionRepository::new(state.db.clone());
    let created = repo.create(option).await?;
    Ok(Json(created))
}

/// POST /api/catalog/upload - push raw image bytes to the asset host
pub async fn upload_image(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ImageRef>> {
    if body.is_empty() {
        return Err(AppError::validation("Image payload is empty"));
    }
    let filename = headers
        .get("x-filename")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("upload.bin");

    let image = state.assets.upload(body.to_vec(), filename).await?;
    Ok(Json(image))
}
