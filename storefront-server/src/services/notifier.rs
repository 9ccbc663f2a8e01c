//! Order confirmation notifications
//!
//! Checkout dispatches confirmations on a detached task, so failures here
//! never affect the committed order. The trait seam keeps the transport
//! swappable; the default HTTP implementation posts a JSON payload to the
//! configured endpoint.

use async_trait::async_trait;
use serde::Serialize;

use crate::db::models::Order;
use crate::utils::{AppError, AppResult};

#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn send_confirmation(&self, recipient: &str, order: &Order) -> AppResult<()>;
}

#[derive(Serialize)]
struct ConfirmationPayload<'a> {
    recipient: &'a str,
    order: &'a Order,
}

/// Posts the confirmation to an external notification endpoint
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl OrderNotifier for HttpNotifier {
    async fn send_confirmation(&self, recipient: &str, order: &Order) -> AppResult<()> {
        let payload = ConfirmationPayload { recipient, order };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Notification request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Notification endpoint returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Used when no notification endpoint is configured, and in tests
pub struct NoopNotifier;

#[async_trait]
impl OrderNotifier for NoopNotifier {
    async fn send_confirmation(&self, recipient: &str, _order: &Order) -> AppResult<()> {
        tracing::debug!(recipient, "Notification endpoint not configured, skipping");
        Ok(())
    }
}
