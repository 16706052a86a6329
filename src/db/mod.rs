//! SQLite-backed storage for events, students, registrations and feedback.
//!
//! [`Database`] wraps a `sqlx::SqlitePool`. Every query binds its parameters
//! and borrows a pooled connection only for the duration of the statement;
//! the connection goes back to the pool when the guard drops, including on
//! error paths. Foreign keys are switched on for every connection so the
//! `ON DELETE CASCADE` clauses of the schema apply.
//!
//! Methods are grouped by table in the submodules and return plain
//! `sqlx::Result`; classifying constraint failures is left to
//! [`crate::utils::error::AppError`].

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;

mod events;
mod participation;
mod reports;
mod students;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database named by `config.url`.
    pub async fn connect(config: &DatabaseConfig) -> sqlx::Result<Self> {
        let in_memory = config.url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Each connection to `:memory:` is its own database, so keep exactly
        // one connection alive for the lifetime of the pool.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url = %config.url, in_memory, "Database opened");

        Ok(Self { pool })
    }

    /// Private in-memory database with the schema applied.
    pub async fn in_memory() -> Result<Self, MigrateError> {
        let db = Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await?;
        db.migrate().await?;
        Ok(db)
    }

    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
