//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{User, UserUpsert};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by the identity provider's external id
    pub async fn find_by_clerk_id(&self, clerk_id: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE clerk_id = $clerk_id")
            .bind(("clerk_id", clerk_id.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Resolve the identity provider's external id to the internal id
    /// ("user:xyz"). The cart/order core depends only on this lookup.
    pub async fn resolve_internal_user_id(&self, clerk_id: &str) -> RepoResult<Option<String>> {
        let user = self.find_by_clerk_id(clerk_id).await?;
        Ok(user.and_then(|u| u.id.map(|id| id.to_string())))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let Some(record_id) = parse_record_id(USER_TABLE, id) else {
            return Ok(None);
        };
        let user: Option<User> = self.base.db().select(record_id).await?;
        Ok(user)
    }

    /// Create or update a user from a webhook event, keyed by clerk_id
    pub async fn upsert(&self, data: UserUpsert) -> RepoResult<User> {
        if let Some(existing) = self.find_by_clerk_id(&data.clerk_id).await? {
            let mut result = self
                .base
                .db()
                .query(
                    "UPDATE user SET email = $email, first_name = $first_name, \
                     last_name = $last_name, phone_number = $phone_number, \
                     whatsapp = $whatsapp, zip_code = $zip_code, country = $country, \
                     address = $address WHERE clerk_id = $clerk_id RETURN AFTER",
                )
                .bind(("email", data.email))
                .bind(("first_name", data.first_name))
                .bind(("last_name", data.last_name))
                .bind(("phone_number", data.phone_number))
                .bind(("whatsapp", data.whatsapp))
                .bind(("zip_code", data.zip_code))
                .bind(("country", data.country))
                .bind(("address", data.address))
                .bind(("clerk_id", data.clerk_id))
                .await?;
            let users: Vec<User> = result.take(0)?;
            return users.into_iter().next().ok_or_else(|| {
                RepoError::NotFound(format!(
                    "User {} disappeared during update",
                    existing.clerk_id
                ))
            });
        }

        let created: Option<User> = self
            .base
            .db()
            .create(USER_TABLE)
            .content(data.into_user())
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Delete a user in reaction to a `user.deleted` event. Unknown ids
    /// are a no-op (the provider may replay deletions).
    pub async fn delete_by_clerk_id(&self, clerk_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE user WHERE clerk_id = $clerk_id")
            .bind(("clerk_id", clerk_id.to_string()))
            .await?;
        Ok(())
    }
}
