//! Order read cache
//!
//! Orders are immutable after creation except for delivery-status
//! transitions, so by-id reads are cached with a TTL. Every status
//! transition must call [`OrderCache::invalidate`]; the TTL alone is not
//! enough to keep status reads fresh.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::db::models::Order;

struct CacheEntry {
    order: Order,
    stored_at: Instant,
}

pub struct OrderCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl OrderCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Cached order, if present and not expired. Expired entries are
    /// dropped on access.
    pub fn get(&self, order_id: &str) -> Option<Order> {
        let hit = self.entries.get(order_id)?;
        if hit.stored_at.elapsed() > self.ttl {
            drop(hit);
            self.entries.remove(order_id);
            return None;
        }
        Some(hit.order.clone())
    }

    pub fn insert(&self, order_id: &str, order: Order) {
        self.entries.insert(
            order_id.to_string(),
            CacheEntry {
                order,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop an entry after a delivery-status transition
    pub fn invalidate(&self, order_id: &str) {
        self.entries.remove(order_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
