use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::push::PushSubscription;
use crate::error::DomainError;
use crate::push::client::{DeliveryOutcome, PushSender};
use crate::storage::PushSubscriptionStorage;

/// Outcome of a broadcast: per-endpoint successes and failures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BroadcastOutcome {
    pub success_count: u32,
    pub fail_count: u32,
}

#[derive(Clone)]
pub struct PushService {
    subscriptions: Arc<dyn PushSubscriptionStorage>,
    sender: Arc<dyn PushSender>,
}

impl PushService {
    pub fn new(
        subscriptions: Arc<dyn PushSubscriptionStorage>,
        sender: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            subscriptions,
            sender,
        }
    }

    /// Register a push endpoint for the owner. Idempotent by endpoint.
    pub async fn subscribe(
        &self,
        owner_id: &str,
        subscription: shared::PushSubscription,
    ) -> Result<(), DomainError> {
        if subscription.endpoint.trim().is_empty() {
            return Err(DomainError::Validation(
                "Subscription endpoint is required".into(),
            ));
        }

        let sub = PushSubscription {
            owner_id: owner_id.to_string(),
            endpoint: subscription.endpoint,
            p256dh: subscription.keys.p256dh,
            auth: subscription.keys.auth,
        };
        self.subscriptions.upsert_subscription(&sub).await?;
        info!("Registered push endpoint for {}", owner_id);
        Ok(())
    }

    /// Send a notification to every stored subscription, best-effort.
    ///
    /// A failing endpoint never aborts delivery to the others. Endpoints
    /// reporting themselves gone are pruned; everything else is left alone
    /// (no retries, no delivery guarantee).
    pub async fn broadcast(
        &self,
        title: &str,
        body: &str,
    ) -> Result<BroadcastOutcome, DomainError> {
        let payload = json!({ "title": title, "body": body }).to_string();
        let subscriptions = self.subscriptions.list_all_subscriptions().await?;

        let mut outcome = BroadcastOutcome::default();
        for sub in subscriptions {
            match self.sender.send(&sub, &payload).await {
                DeliveryOutcome::Delivered => outcome.success_count += 1,
                DeliveryOutcome::Gone => {
                    outcome.fail_count += 1;
                    warn!(
                        "Pruning gone push endpoint {} for {}",
                        sub.endpoint, sub.owner_id
                    );
                    self.subscriptions
                        .delete_subscription(&sub.owner_id, &sub.endpoint)
                        .await?;
                }
                DeliveryOutcome::Failed => outcome.fail_count += 1,
            }
        }

        info!(
            "Push broadcast done: {} delivered, {} failed",
            outcome.success_count, outcome.fail_count
        );
        Ok(outcome)
    }
}
