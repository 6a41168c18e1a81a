use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::activity::Activity;
use crate::error::DomainError;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::ActivityStorage;

/// Repository for the per-user activity catalog.
///
/// Every query is scoped by owner, so a foreign id and a missing id are
/// indistinguishable to callers.
#[derive(Clone)]
pub struct ActivityRepository {
    db: DbConnection,
}

impl ActivityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> Activity {
    Activity {
        id: row.get("id"),
        owner_id: row.get("user_id"),
        name: row.get("name"),
        value: row.get("value"),
        icon: row.get("icon"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn store_activity(&self, activity: &Activity) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, user_id, name, value, icon, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&activity.id)
        .bind(&activity.owner_id)
        .bind(&activity.name)
        .bind(activity.value)
        .bind(&activity.icon)
        .bind(&activity.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_activity(
        &self,
        owner_id: &str,
        activity_id: &str,
    ) -> Result<Option<Activity>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, value, icon, created_at
            FROM activities
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(owner_id)
        .bind(activity_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_activity))
    }

    async fn list_activities(&self, owner_id: &str) -> Result<Vec<Activity>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, value, icon, created_at
            FROM activities
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_activity).collect())
    }

    async fn update_activity(&self, activity: &Activity) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET name = ?, value = ?, icon = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&activity.name)
        .bind(activity.value)
        .bind(&activity.icon)
        .bind(&activity.owner_id)
        .bind(&activity.id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_activity(
        &self,
        owner_id: &str,
        activity_id: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM activities WHERE user_id = ? AND id = ?")
            .bind(owner_id)
            .bind(activity_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
