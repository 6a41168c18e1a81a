//! SQLite adapter for the append-only points ledger.
//!
//! The one piece of real concurrency discipline in the system lives here:
//! `try_store_redemption` folds the balance check into the INSERT itself, so
//! SQLite's single-statement atomicity linearizes redemptions per owner.

use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::ledger::{DailyBucket, LedgerTotals, LogEntry, Redemption};
use crate::error::DomainError;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::LedgerStorage;

#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
}

impl LedgerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_log_entry(row: &sqlx::sqlite::SqliteRow) -> LogEntry {
    LogEntry {
        id: row.get("id"),
        owner_id: row.get("user_id"),
        activity_id: row.get("activity_id"),
        activity_name: row.get("activity_name"),
        points: row.get("points"),
        timestamp: row.get("timestamp"),
    }
}

fn row_to_redemption(row: &sqlx::sqlite::SqliteRow) -> Redemption {
    Redemption {
        id: row.get("id"),
        owner_id: row.get("user_id"),
        reward_name: row.get("reward_name"),
        cost: row.get("cost"),
        timestamp: row.get("timestamp"),
    }
}

#[async_trait]
impl LedgerStorage for LedgerRepository {
    async fn store_log_entry(&self, entry: &LogEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO logs (id, user_id, activity_id, activity_name, points, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.owner_id)
        .bind(&entry.activity_id)
        .bind(&entry.activity_name)
        .bind(entry.points)
        .bind(&entry.timestamp)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_log_entries(&self, owner_id: &str) -> Result<Vec<LogEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, activity_id, activity_name, points, timestamp
            FROM logs
            WHERE user_id = ?
            ORDER BY timestamp DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_log_entry).collect())
    }

    async fn try_store_redemption(&self, redemption: &Redemption) -> Result<bool, DomainError> {
        // Check-then-act as one statement: the row only materializes when the
        // owner's folded balance covers the cost. Two concurrent redemptions
        // cannot both pass a stale check, because each INSERT re-evaluates the
        // fold against committed state.
        let result = sqlx::query(
            r#"
            INSERT INTO redemptions (id, user_id, reward_name, cost, timestamp)
            SELECT ?1, ?2, ?3, ?4, ?5
            WHERE (SELECT COALESCE(SUM(points), 0) FROM logs WHERE user_id = ?2)
                - (SELECT COALESCE(SUM(cost), 0) FROM redemptions WHERE user_id = ?2)
                >= ?4
            "#,
        )
        .bind(&redemption.id)
        .bind(&redemption.owner_id)
        .bind(&redemption.reward_name)
        .bind(redemption.cost)
        .bind(&redemption.timestamp)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_redemptions(&self, owner_id: &str) -> Result<Vec<Redemption>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, reward_name, cost, timestamp
            FROM redemptions
            WHERE user_id = ?
            ORDER BY timestamp DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_redemption).collect())
    }

    async fn totals_for(&self, owner_id: &str) -> Result<LedgerTotals, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COALESCE(SUM(points), 0) FROM logs WHERE user_id = ?1) AS total_earned,
                (SELECT COALESCE(SUM(cost), 0) FROM redemptions WHERE user_id = ?1) AS total_spent
            "#,
        )
        .bind(owner_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(LedgerTotals {
            total_earned: row.get("total_earned"),
            total_spent: row.get("total_spent"),
        })
    }

    async fn earned_on_day(&self, owner_id: &str, day: &str) -> Result<i64, DomainError> {
        // Timestamps are RFC 3339 UTC strings, so the day is a prefix
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(points), 0) AS points
            FROM logs
            WHERE user_id = ? AND substr(timestamp, 1, 10) = ?
            "#,
        )
        .bind(owner_id)
        .bind(day)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("points"))
    }

    async fn daily_log_buckets(&self, limit: u32) -> Result<Vec<DailyBucket>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT substr(timestamp, 1, 10) AS day,
                   COUNT(*) AS count,
                   SUM(points) AS total
            FROM logs
            GROUP BY day
            ORDER BY day DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| DailyBucket {
                day: row.get("day"),
                count: row.get("count"),
                total: row.get("total"),
            })
            .collect())
    }

    async fn daily_redemption_buckets(
        &self,
        limit: u32,
    ) -> Result<Vec<DailyBucket>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT substr(timestamp, 1, 10) AS day,
                   COUNT(*) AS count,
                   SUM(cost) AS total
            FROM redemptions
            GROUP BY day
            ORDER BY day DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| DailyBucket {
                day: row.get("day"),
                count: row.get("count"),
                total: row.get("total"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_repo() -> LedgerRepository {
        LedgerRepository::new(DbConnection::init_test().await.unwrap())
    }

    fn earning(owner: &str, points: i64) -> LogEntry {
        LogEntry {
            id: shared::LogEntry::generate_id(),
            owner_id: owner.to_string(),
            activity_id: None,
            activity_name: "Workout".to_string(),
            points,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn redemption(owner: &str, cost: i64) -> Redemption {
        Redemption {
            id: shared::Redemption::generate_id(),
            owner_id: owner.to_string(),
            reward_name: "Movie night".to_string(),
            cost,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_balance_is_fold_of_ledger() {
        let repo = test_repo().await;
        repo.store_log_entry(&earning("user::1", 50)).await.unwrap();
        repo.store_log_entry(&earning("user::1", 40)).await.unwrap();
        assert!(repo
            .try_store_redemption(&redemption("user::1", 30))
            .await
            .unwrap());

        let totals = repo.totals_for("user::1").await.unwrap();
        assert_eq!(totals.total_earned, 90);
        assert_eq!(totals.total_spent, 30);
        assert_eq!(totals.balance(), 60);
    }

    #[tokio::test]
    async fn test_totals_isolated_per_owner() {
        let repo = test_repo().await;
        repo.store_log_entry(&earning("user::1", 50)).await.unwrap();
        repo.store_log_entry(&earning("user::2", 10)).await.unwrap();

        assert_eq!(repo.totals_for("user::1").await.unwrap().balance(), 50);
        assert_eq!(repo.totals_for("user::2").await.unwrap().balance(), 10);
        assert_eq!(repo.totals_for("user::3").await.unwrap().balance(), 0);
    }

    #[tokio::test]
    async fn test_overdraft_rejected_without_state_change() {
        let repo = test_repo().await;
        repo.store_log_entry(&earning("user::1", 50)).await.unwrap();

        assert!(!repo
            .try_store_redemption(&redemption("user::1", 80))
            .await
            .unwrap());

        // Rejection is a no-op on stored state
        assert!(repo.list_redemptions("user::1").await.unwrap().is_empty());
        assert_eq!(repo.totals_for("user::1").await.unwrap().balance(), 50);
    }

    #[tokio::test]
    async fn test_redemption_up_to_exact_balance_accepted() {
        let repo = test_repo().await;
        repo.store_log_entry(&earning("user::1", 50)).await.unwrap();

        assert!(repo
            .try_store_redemption(&redemption("user::1", 50))
            .await
            .unwrap());
        assert_eq!(repo.totals_for("user::1").await.unwrap().balance(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_cannot_overdraw() {
        let repo = test_repo().await;
        repo.store_log_entry(&earning("user::1", 100)).await.unwrap();

        // Two cost-60 redemptions against a balance of 100: exactly one may win
        let red1 = redemption("user::1", 60);
        let red2 = redemption("user::1", 60);
        let r1 = repo.try_store_redemption(&red1);
        let r2 = repo.try_store_redemption(&red2);
        let (ok1, ok2) = tokio::join!(r1, r2);
        let successes = [ok1.unwrap(), ok2.unwrap()]
            .iter()
            .filter(|s| **s)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(repo.totals_for("user::1").await.unwrap().balance(), 40);
    }

    #[tokio::test]
    async fn test_listings_newest_first() {
        let repo = test_repo().await;
        let mut first = earning("user::1", 10);
        first.timestamp = "2026-02-01T08:00:00+00:00".to_string();
        let mut second = earning("user::1", 20);
        second.timestamp = "2026-02-03T08:00:00+00:00".to_string();
        repo.store_log_entry(&first).await.unwrap();
        repo.store_log_entry(&second).await.unwrap();

        let entries = repo.list_log_entries("user::1").await.unwrap();
        assert_eq!(entries[0].points, 20);
        assert_eq!(entries[1].points, 10);
    }

    #[tokio::test]
    async fn test_earned_on_day_uses_utc_prefix() {
        let repo = test_repo().await;
        let mut today = earning("user::1", 30);
        today.timestamp = "2026-02-03T23:59:59+00:00".to_string();
        let mut other_day = earning("user::1", 99);
        other_day.timestamp = "2026-02-02T00:00:01+00:00".to_string();
        repo.store_log_entry(&today).await.unwrap();
        repo.store_log_entry(&other_day).await.unwrap();

        assert_eq!(
            repo.earned_on_day("user::1", "2026-02-03").await.unwrap(),
            30
        );
        assert_eq!(
            repo.earned_on_day("user::1", "2026-01-01").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_daily_buckets_grouped_and_limited() {
        let repo = test_repo().await;
        for (day, points) in [("2026-02-01", 10), ("2026-02-01", 15), ("2026-02-02", 5)] {
            let mut entry = earning("user::1", points);
            entry.timestamp = format!("{}T12:00:00+00:00", day);
            repo.store_log_entry(&entry).await.unwrap();
        }

        let buckets = repo.daily_log_buckets(30).await.unwrap();
        assert_eq!(buckets.len(), 2);
        // Newest day first
        assert_eq!(buckets[0].day, "2026-02-02");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].total, 5);
        assert_eq!(buckets[1].day, "2026-02-01");
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].total, 25);

        let limited = repo.daily_log_buckets(1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].day, "2026-02-02");
    }
}
