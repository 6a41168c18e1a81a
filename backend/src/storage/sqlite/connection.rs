use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// DbConnection manages the SQLite pool and schema bootstrap.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create users table; email uniqueness is enforced here so duplicate
        // signups fail distinctly at the constraint
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                name TEXT,
                is_admin INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create activities table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                value INTEGER NOT NULL,
                icon TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_activities_user_id
            ON activities(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create logs table. No foreign key on activity_id: entries must
        // survive activity deletion with their snapshots intact
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                activity_id TEXT,
                activity_name TEXT NOT NULL,
                points INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_logs_user_id
            ON logs(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_logs_timestamp
            ON logs(timestamp DESC);
            "#,
        )
        .execute(pool)
        .await?;

        // Create redemptions table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS redemptions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                reward_name TEXT NOT NULL,
                cost INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_redemptions_user_id
            ON redemptions(user_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create push_subscriptions table (unique per owner and endpoint so
        // subscribing twice is a no-op)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS push_subscriptions (
                user_id TEXT NOT NULL,
                endpoint TEXT NOT NULL,
                p256dh TEXT NOT NULL,
                auth TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, endpoint),
                FOREIGN KEY (user_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
