//! Ledger service: the append-only record of earning and spending events.
//!
//! Earnings referencing an activity snapshot the activity's current name and
//! value server-side; the activity is the source of truth for points.
//! Explicit name/points are honored only for ad-hoc entries. Redemptions are
//! gated on the folded balance, atomically per owner.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::ledger::{LogEntry, Redemption};
use crate::error::DomainError;
use crate::storage::{ActivityStorage, LedgerStorage};
use shared::RecordEarningRequest;

#[derive(Clone)]
pub struct LedgerService {
    ledger: Arc<dyn LedgerStorage>,
    activities: Arc<dyn ActivityStorage>,
}

impl LedgerService {
    pub fn new(ledger: Arc<dyn LedgerStorage>, activities: Arc<dyn ActivityStorage>) -> Self {
        Self { ledger, activities }
    }

    /// Record an earning event for the owner.
    pub async fn record_earning(
        &self,
        owner_id: &str,
        request: RecordEarningRequest,
    ) -> Result<LogEntry, DomainError> {
        let (activity_id, activity_name, points) = match request.activity_id {
            Some(activity_id) => {
                // Owner-scoped resolution; the stored value is authoritative
                let activity = self
                    .activities
                    .get_activity(owner_id, &activity_id)
                    .await?
                    .ok_or(DomainError::NotFound("Activity"))?;
                (Some(activity.id), activity.name, activity.value)
            }
            None => {
                let name = request
                    .activity_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        DomainError::Validation(
                            "An activity name is required for ad-hoc entries".into(),
                        )
                    })?;
                let points = request.points.ok_or_else(|| {
                    DomainError::Validation("Points are required for ad-hoc entries".into())
                })?;
                (None, name, points)
            }
        };

        let entry = LogEntry {
            id: shared::LogEntry::generate_id(),
            owner_id: owner_id.to_string(),
            activity_id,
            activity_name,
            points,
            timestamp: Utc::now().to_rfc3339(),
        };
        self.ledger.store_log_entry(&entry).await?;
        info!(
            "Recorded earning {} (+{} points) for {}",
            entry.id, entry.points, owner_id
        );

        Ok(entry)
    }

    /// Record a redemption, rejecting it when the cost exceeds the balance.
    ///
    /// The check and the insert are a single atomic unit in storage, so
    /// concurrent redemptions from the same owner cannot jointly overdraw.
    pub async fn record_redemption(
        &self,
        owner_id: &str,
        reward_name: &str,
        cost: i64,
    ) -> Result<Redemption, DomainError> {
        let reward_name = reward_name.trim();
        if reward_name.is_empty() {
            return Err(DomainError::Validation("Reward name is required".into()));
        }
        if cost <= 0 {
            return Err(DomainError::Validation(
                "Redemption cost must be a positive integer".into(),
            ));
        }

        let redemption = Redemption {
            id: shared::Redemption::generate_id(),
            owner_id: owner_id.to_string(),
            reward_name: reward_name.to_string(),
            cost,
            timestamp: Utc::now().to_rfc3339(),
        };

        if !self.ledger.try_store_redemption(&redemption).await? {
            let balance = self.ledger.totals_for(owner_id).await?.balance();
            return Err(DomainError::InsufficientBalance { cost, balance });
        }
        info!(
            "Recorded redemption {} (-{} points) for {}",
            redemption.id, cost, owner_id
        );

        Ok(redemption)
    }

    /// The owner's earning history, newest first.
    pub async fn list_earnings(&self, owner_id: &str) -> Result<Vec<LogEntry>, DomainError> {
        self.ledger.list_log_entries(owner_id).await
    }

    /// The owner's redemption history, newest first.
    pub async fn list_redemptions(&self, owner_id: &str) -> Result<Vec<Redemption>, DomainError> {
        self.ledger.list_redemptions(owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity_service::ActivityService;
    use crate::storage::sqlite::{ActivityRepository, DbConnection, LedgerRepository};

    async fn test_services() -> (LedgerService, ActivityService) {
        let db = DbConnection::init_test().await.unwrap();
        let activities = Arc::new(ActivityRepository::new(db.clone()));
        let ledger = Arc::new(LedgerRepository::new(db));
        (
            LedgerService::new(ledger, activities.clone()),
            ActivityService::new(activities),
        )
    }

    fn ad_hoc(name: &str, points: i64) -> RecordEarningRequest {
        RecordEarningRequest {
            activity_id: None,
            activity_name: Some(name.to_string()),
            points: Some(points),
        }
    }

    #[tokio::test]
    async fn test_earning_from_activity_snapshots_stored_value() {
        let (ledger, activities) = test_services().await;
        let activity = activities
            .create("user::1", "Workout", 50, None)
            .await
            .unwrap();

        // The caller's numbers are ignored when an activity is referenced
        let entry = ledger
            .record_earning(
                "user::1",
                RecordEarningRequest {
                    activity_id: Some(activity.id.clone()),
                    activity_name: Some("Spoofed".to_string()),
                    points: Some(9999),
                },
            )
            .await
            .unwrap();

        assert_eq!(entry.activity_name, "Workout");
        assert_eq!(entry.points, 50);
        assert_eq!(entry.activity_id.as_deref(), Some(activity.id.as_str()));
    }

    #[tokio::test]
    async fn test_earning_from_foreign_activity_is_not_found() {
        let (ledger, activities) = test_services().await;
        let activity = activities
            .create("user::owner", "Workout", 50, None)
            .await
            .unwrap();

        let err = ledger
            .record_earning(
                "user::intruder",
                RecordEarningRequest {
                    activity_id: Some(activity.id),
                    activity_name: None,
                    points: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Activity")));
    }

    #[tokio::test]
    async fn test_ad_hoc_earning_requires_name_and_points() {
        let (ledger, _) = test_services().await;

        let missing_name = RecordEarningRequest {
            activity_id: None,
            activity_name: None,
            points: Some(10),
        };
        assert!(matches!(
            ledger.record_earning("user::1", missing_name).await,
            Err(DomainError::Validation(_))
        ));

        let missing_points = RecordEarningRequest {
            activity_id: None,
            activity_name: Some("Chores".to_string()),
            points: None,
        };
        assert!(matches!(
            ledger.record_earning("user::1", missing_points).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_scenario_earn_redeem_sequence() {
        let (ledger, _) = test_services().await;
        let totals = |l: &LedgerService| {
            let l = l.clone();
            async move { l.ledger.totals_for("user::1").await.unwrap().balance() }
        };

        // Start at 0, earn 50
        ledger
            .record_earning("user::1", ad_hoc("Workout", 50))
            .await
            .unwrap();
        assert_eq!(totals(&ledger).await, 50);

        // Redemption of 80 rejected, balance untouched
        let err = ledger
            .record_redemption("user::1", "Movie night", 80)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientBalance {
                cost: 80,
                balance: 50
            }
        ));
        assert_eq!(totals(&ledger).await, 50);

        // Earn 40 more, the same redemption now goes through
        ledger
            .record_earning("user::1", ad_hoc("Reading", 40))
            .await
            .unwrap();
        assert_eq!(totals(&ledger).await, 90);

        ledger
            .record_redemption("user::1", "Movie night", 80)
            .await
            .unwrap();
        assert_eq!(totals(&ledger).await, 10);
    }

    #[tokio::test]
    async fn test_redemption_validation() {
        let (ledger, _) = test_services().await;
        assert!(matches!(
            ledger.record_redemption("user::1", "", 10).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ledger.record_redemption("user::1", "Reward", 0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ledger.record_redemption("user::1", "Reward", -5).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_activity_preserves_log_history() {
        let (ledger, activities) = test_services().await;
        let activity = activities
            .create("user::1", "Workout", 50, None)
            .await
            .unwrap();

        ledger
            .record_earning(
                "user::1",
                RecordEarningRequest {
                    activity_id: Some(activity.id.clone()),
                    activity_name: None,
                    points: None,
                },
            )
            .await
            .unwrap();

        activities.delete("user::1", &activity.id).await.unwrap();

        // The snapshot survives with its original name and points
        let entries = ledger.list_earnings("user::1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].activity_name, "Workout");
        assert_eq!(entries[0].points, 50);
        assert_eq!(entries[0].activity_id.as_deref(), Some(activity.id.as_str()));
    }
}
