//! User Model
//!
//! Users are written exclusively by the identity-provider webhook; the
//! cart/order subsystem only ever resolves `clerk_id` to the internal id.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Internal user record, synced from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// External identity-provider id (unique)
    pub clerk_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub whatsapp: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

/// Profile fields accepted from webhook events
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserUpsert {
    pub clerk_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub whatsapp: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
}

impl UserUpsert {
    pub fn into_user(self) -> User {
        User {
            id: None,
            clerk_id: self.clerk_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            whatsapp: self.whatsapp,
            zip_code: self.zip_code,
            country: self.country,
            address: self.address,
            role: "customer".to_string(),
        }
    }
}
