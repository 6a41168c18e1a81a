//! Balance views derived from the ledger.
//!
//! Nothing here is stored: every number is recomputed from the append-only
//! history on demand. Day bucketing is UTC-fixed.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::ledger::{DailyBucket, LedgerTotals};
use crate::domain::models::user::User;
use crate::error::DomainError;
use crate::storage::{LedgerStorage, UserStorage};

/// Daily admin stats cover the most recent 30 buckets.
const MAX_DAILY_BUCKETS: u32 = 30;

#[derive(Clone)]
pub struct BalanceService {
    ledger: Arc<dyn LedgerStorage>,
    users: Arc<dyn UserStorage>,
}

impl BalanceService {
    pub fn new(ledger: Arc<dyn LedgerStorage>, users: Arc<dyn UserStorage>) -> Self {
        Self { ledger, users }
    }

    /// The owner's current balance: Σ earned − Σ spent.
    ///
    /// A negative result means the ledger was corrupted outside the public
    /// contract; it is logged but still returned for auditability.
    pub async fn balance_of(&self, owner_id: &str) -> Result<i64, DomainError> {
        let balance = self.ledger.totals_for(owner_id).await?.balance();
        if balance < 0 {
            warn!("Negative balance {} for {}", balance, owner_id);
        }
        Ok(balance)
    }

    /// Points earned on the same UTC calendar day as `reference`.
    pub async fn today_earnings_of(
        &self,
        owner_id: &str,
        reference: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        let day = reference.format("%Y-%m-%d").to_string();
        self.ledger.earned_on_day(owner_id, &day).await
    }

    /// Every account (newest first) with its lifetime ledger totals.
    pub async fn admin_summary(&self) -> Result<Vec<(User, LedgerTotals)>, DomainError> {
        let users = self.users.list_users().await?;
        let mut summary = Vec::with_capacity(users.len());
        for user in users {
            let totals = self.ledger.totals_for(&user.id).await?;
            summary.push((user, totals));
        }
        Ok(summary)
    }

    /// Day-bucketed earning and redemption totals across all users, most
    /// recent 30 days of activity each, newest first.
    pub async fn daily_stats(
        &self,
    ) -> Result<(Vec<DailyBucket>, Vec<DailyBucket>), DomainError> {
        let logs = self.ledger.daily_log_buckets(MAX_DAILY_BUCKETS).await?;
        let redemptions = self
            .ledger
            .daily_redemption_buckets(MAX_DAILY_BUCKETS)
            .await?;
        Ok((logs, redemptions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger_service::LedgerService;
    use crate::storage::sqlite::{
        ActivityRepository, DbConnection, LedgerRepository, UserRepository,
    };
    use shared::RecordEarningRequest;

    async fn test_setup() -> (BalanceService, LedgerService, Arc<UserRepository>) {
        let db = DbConnection::init_test().await.unwrap();
        let users = Arc::new(UserRepository::new(db.clone()));
        let ledger = Arc::new(LedgerRepository::new(db.clone()));
        let activities = Arc::new(ActivityRepository::new(db));
        (
            BalanceService::new(ledger.clone(), users.clone()),
            LedgerService::new(ledger, activities),
            users,
        )
    }

    fn ad_hoc(name: &str, points: i64) -> RecordEarningRequest {
        RecordEarningRequest {
            activity_id: None,
            activity_name: Some(name.to_string()),
            points: Some(points),
        }
    }

    async fn store_user(users: &UserRepository, email: &str) -> String {
        let user = crate::domain::models::user::User {
            id: shared::User::generate_id(),
            email: email.to_string(),
            password_hash: "$argon2$stub".to_string(),
            name: None,
            is_admin: false,
            created_at: Utc::now().to_rfc3339(),
        };
        users.store_user(&user).await.unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_balance_tracks_every_ledger_event() {
        let (balance, ledger, _) = test_setup().await;
        assert_eq!(balance.balance_of("user::1").await.unwrap(), 0);

        ledger
            .record_earning("user::1", ad_hoc("Workout", 50))
            .await
            .unwrap();
        assert_eq!(balance.balance_of("user::1").await.unwrap(), 50);

        ledger
            .record_earning("user::1", ad_hoc("Reading", 40))
            .await
            .unwrap();
        assert_eq!(balance.balance_of("user::1").await.unwrap(), 90);

        ledger
            .record_redemption("user::1", "Movie night", 80)
            .await
            .unwrap();
        assert_eq!(balance.balance_of("user::1").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_today_earnings_only_counts_reference_day() {
        let (balance, ledger, _) = test_setup().await;
        ledger
            .record_earning("user::1", ad_hoc("Workout", 30))
            .await
            .unwrap();

        let now = Utc::now();
        assert_eq!(balance.today_earnings_of("user::1", now).await.unwrap(), 30);

        let long_ago = now - chrono::Duration::days(400);
        assert_eq!(
            balance.today_earnings_of("user::1", long_ago).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_admin_summary_totals_per_user() {
        let (balance, ledger, users) = test_setup().await;
        let alice = store_user(&users, "alice@example.com").await;
        let bob = store_user(&users, "bob@example.com").await;

        ledger.record_earning(&alice, ad_hoc("Workout", 100)).await.unwrap();
        ledger.record_redemption(&alice, "Treat", 30).await.unwrap();
        ledger.record_earning(&bob, ad_hoc("Chores", 5)).await.unwrap();

        let summary = balance.admin_summary().await.unwrap();
        assert_eq!(summary.len(), 2);

        let find = |id: &str| {
            summary
                .iter()
                .find(|(u, _)| u.id == id)
                .map(|(_, t)| *t)
                .unwrap()
        };
        assert_eq!(find(&alice).total_earned, 100);
        assert_eq!(find(&alice).total_spent, 30);
        assert_eq!(find(&bob).total_earned, 5);
        assert_eq!(find(&bob).total_spent, 0);
    }
}
