use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::domain::models::push::PushSubscription;
use crate::error::DomainError;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::PushSubscriptionStorage;

/// Repository for browser push subscriptions.
#[derive(Clone)]
pub struct PushRepository {
    db: DbConnection,
}

impl PushRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PushSubscriptionStorage for PushRepository {
    async fn upsert_subscription(&self, sub: &PushSubscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions (user_id, endpoint, p256dh, auth, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, endpoint) DO NOTHING
            "#,
        )
        .bind(&sub.owner_id)
        .bind(&sub.endpoint)
        .bind(&sub.p256dh)
        .bind(&sub.auth)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_all_subscriptions(&self) -> Result<Vec<PushSubscription>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, endpoint, p256dh, auth
            FROM push_subscriptions
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| PushSubscription {
                owner_id: row.get("user_id"),
                endpoint: row.get("endpoint"),
                p256dh: row.get("p256dh"),
                auth: row.get("auth"),
            })
            .collect())
    }

    async fn delete_subscription(
        &self,
        owner_id: &str,
        endpoint: &str,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM push_subscriptions WHERE user_id = ? AND endpoint = ?")
            .bind(owner_id)
            .bind(endpoint)
            .execute(self.db.pool())
            .await?;
        Ok(())
    }
}
