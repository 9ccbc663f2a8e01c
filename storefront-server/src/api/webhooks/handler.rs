//! Webhook Handlers
//!
//! The identity provider authenticates with a shared secret carried in the
//! `x-webhook-secret` header. With no secret configured the endpoint is
//! open in development and rejected outright in production.

use axum::{Json, extract::State, http::HeaderMap};

use crate::core::ServerState;
use crate::users::{IdentityEvent, UserSyncService};
use crate::utils::{ApiStatus, AppError, AppResult};

fn verify_secret(state: &ServerState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = &state.config.webhook_secret else {
        if state.config.is_production() {
            tracing::warn!("Rejecting identity webhook: no secret configured in production");
            return Err(AppError::Unauthorized);
        }
        return Ok(());
    };
    let presented = headers
        .get("x-webhook-secret")
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// POST /api/webhooks/identity - user lifecycle events from the identity
/// provider
pub async fn identity_event(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(event): Json<IdentityEvent>,
) -> AppResult<Json<ApiStatus>> {
    verify_secret(&state, &headers)?;

    let sync = UserSyncService::new(state.db.clone());
    sync.handle_event(event).await?;
    Ok(Json(ApiStatus::ok()))
}
