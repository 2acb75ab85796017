use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const SQLITE_FILE_NAME: &str = "birthdays.db";

/// DbConnection owns the SQLite pool for `birthdays.db`
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (creating if needed) the database file inside `data_dir`
    pub async fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create directory {}", data_dir.display()))?;

        let db_path = data_dir.join(SQLITE_FILE_NAME);
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open {}", db_path.display()))?;

        Self::setup_schema(&pool).await?;
        debug!("SQLite database ready at {}", db_path.display());

        Ok(Self { pool })
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS birthdays (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                nickname TEXT,
                email TEXT,
                date_of_birth TEXT NOT NULL,
                phone TEXT,
                address TEXT,
                relationship TEXT,
                interests TEXT,
                gender TEXT
            );
            "#,
        )
        .execute(pool)
        .await
        .context("failed to create birthdays table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_birthdays_email ON birthdays (email)")
            .execute(pool)
            .await
            .context("failed to create email index")?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
