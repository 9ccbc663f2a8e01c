//! Shirt API Handlers
//!
//! Composing a shirt resolves the selected catalog options, copies their
//! names and prices into part selections, and prices the whole in
//! `Decimal` before the single rounding step. The stored shirt never
//! changes when the catalog does.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::catalog::PartSelection;
use shared::money;

use crate::core::ServerState;
use crate::db::models::{Shirt, ShirtCreate};
use crate::db::repository::{CatalogOptionRepository, ShirtRepository, UserRepository};
use crate::utils::{AppError, AppResult};

/// POST /api/shirts - create a composition from selected options
pub async fn create_shirt(
    State(state): State<ServerState>,
    Json(req): Json<ShirtCreate>,
) -> AppResult<Json<Shirt>> {
    if req.option_ids.is_empty() {
        return Err(AppError::validation("A shirt needs at least one option"));
    }

    let users = UserRepository::new(state.db.clone());
    let owner = users
        .resolve_internal_user_id(&req.clerk_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", req.clerk_id)))?;

    let options = CatalogOptionRepository::new(state.db.clone());
    let mut parts: Vec<PartSelection> = Vec::with_capacity(req.option_ids.len());
    let mut total = Decimal::ZERO;
    for option_id in &req.option_ids {
        let option = options
            .find_by_id(option_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Catalog option {option_id} not found")))?;
        if option.fabric_id != req.fabric_id || option.color_id != req.color_id {
            return Err(AppError::validation(format!(
                "Option {option_id} does not belong to fabric {} / color {}",
                req.fabric_id, req.color_id
            )));
        }
        total += money::to_decimal(option.price);
        parts.push(PartSelection {
            part: option.part,
            option_id: option.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            name: option.name,
            price: option.price,
            image: Some(option.image),
        });
    }

    let shirt = Shirt {
        id: None,
        owner,
        fabric_id: req.fabric_id,
        color_id: req.color_id,
        parts,
        total_price: money::to_f64(total),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let repo = ShirtRepository::new(state.db.clone());
    let created = repo.create(shirt).await?;
    Ok(Json(created))
}

/// GET /api/shirts/:id
pub async fn get_shirt(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Shirt>> {
    let repo = ShirtRepository::new(state.db.clone());
    let shirt = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shirt {id} not found")))?;
    Ok(Json(shirt))
}
