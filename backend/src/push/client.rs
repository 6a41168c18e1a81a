use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::warn;

use crate::domain::models::push::PushSubscription;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The endpoint no longer exists; the subscription should be pruned
    Gone,
    /// Transient or unknown failure; the subscription is kept
    Failed,
}

/// One delivery attempt to one endpoint.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, sub: &PushSubscription, payload: &str) -> DeliveryOutcome;
}

/// Delivers payloads as JSON POSTs to the subscription endpoint. Every send
/// runs under the configured timeout.
#[derive(Clone)]
pub struct HttpPushClient {
    http: reqwest::Client,
}

impl HttpPushClient {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PushSender for HttpPushClient {
    async fn send(&self, sub: &PushSubscription, payload: &str) -> DeliveryOutcome {
        let result = self
            .http
            .post(&sub.endpoint)
            .header("content-type", "application/json")
            .body(payload.to_string())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => DeliveryOutcome::Delivered,
            Ok(response)
                if response.status() == StatusCode::GONE
                    || response.status() == StatusCode::NOT_FOUND =>
            {
                DeliveryOutcome::Gone
            }
            Ok(response) => {
                warn!(
                    "Push delivery to {} failed with status {}",
                    sub.endpoint,
                    response.status()
                );
                DeliveryOutcome::Failed
            }
            Err(e) => {
                warn!("Push delivery to {} failed: {}", sub.endpoint, e);
                DeliveryOutcome::Failed
            }
        }
    }
}
