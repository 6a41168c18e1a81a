use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::user::User;
use crate::error::DomainError;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::UserStorage;

/// Repository for account storage.
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        name: row.get("name"),
        is_admin: row.get::<i64, _>("is_admin") != 0,
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, name, is_admin, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.is_admin as i64)
        .bind(&user.created_at)
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                // The unique email constraint is the one expected violation;
                // it must surface distinctly from other storage failures
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return Err(DomainError::DuplicateEmail);
                    }
                }
                Err(DomainError::Store(e))
            }
        }
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, is_admin, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, is_admin, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, is_admin, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    async fn set_admin(&self, user_id: &str, is_admin: bool) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin as i64)
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
