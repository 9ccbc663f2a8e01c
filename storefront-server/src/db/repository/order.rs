//! Order Repository
//!
//! Orders are write-once; the only mutable field is `delivery_status`.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Order;
use shared::cart::DeliveryStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const ORDER_TABLE: &str = "shop_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find by id. Malformed ids resolve to None, not an error.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let Some(record_id) = parse_record_id(ORDER_TABLE, id) else {
            return Ok(None);
        };
        let order: Option<Order> = self.base.db().select(record_id).await?;
        Ok(order)
    }

    /// All orders for an owner, newest first
    pub async fn find_by_owner(&self, owner: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM shop_order WHERE owner = $owner ORDER BY created_at DESC")
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Persist a delivery-status transition. Legality of the transition is
    /// the caller's concern; this just writes the field.
    pub async fn set_delivery_status(
        &self,
        id: &str,
        status: DeliveryStatus,
    ) -> RepoResult<Order> {
        let record_id = parse_record_id(ORDER_TABLE, id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET delivery_status = $status RETURN AFTER")
            .bind(("id", record_id))
            .bind(("status", status))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }
}
