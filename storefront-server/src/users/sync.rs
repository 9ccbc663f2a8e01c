//! Webhook-driven user synchronization
//!
//! The identity provider posts `user.created`, `user.updated` and
//! `user.deleted` events. Created and updated are both handled as an
//! upsert keyed by the provider id, so replays and out-of-order delivery
//! converge on the latest profile.

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::UserUpsert;
use crate::db::repository::UserRepository;
use crate::utils::validation::{MAX_EMAIL_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Envelope of an identity-provider webhook event
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityEventData,
}

#[derive(Debug, Deserialize)]
pub struct IdentityEventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

#[derive(Debug, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct PhoneNumber {
    pub phone_number: String,
}

#[derive(Clone)]
pub struct UserSyncService {
    users: UserRepository,
}

impl UserSyncService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Apply a webhook event. Unrecognized event types are acknowledged
    /// and ignored so the provider does not retry them forever.
    pub async fn handle_event(&self, event: IdentityEvent) -> AppResult<()> {
        match event.event_type.as_str() {
            "user.created" | "user.updated" => self.upsert_from(event.data).await,
            "user.deleted" => {
                self.users
                    .delete_by_clerk_id(&event.data.id)
                    .await
                    .map_err(AppError::from)?;
                tracing::info!(clerk_id = %event.data.id, "User deleted via webhook");
                Ok(())
            }
            other => {
                tracing::debug!(event_type = other, "Ignoring unhandled identity event");
                Ok(())
            }
        }
    }

    async fn upsert_from(&self, data: IdentityEventData) -> AppResult<()> {
        let email = data
            .email_addresses
            .first()
            .map(|e| e.email_address.clone())
            .ok_or_else(|| AppError::validation("Identity event carries no email address"))?;
        validate_required_text(&email, "email", MAX_EMAIL_LEN)?;

        let upsert = UserUpsert {
            clerk_id: data.id.clone(),
            email,
            first_name: data.first_name.unwrap_or_default(),
            last_name: data.last_name.unwrap_or_default(),
            phone_number: data.phone_numbers.first().map(|p| p.phone_number.clone()),
            ..Default::default()
        };

        let user = self.users.upsert(upsert).await.map_err(AppError::from)?;
        tracing::info!(clerk_id = %user.clerk_id, "User synced via webhook");
        Ok(())
    }
}
