//! Connection pool and schema migrations.

use std::str::FromStr;
use std::time::Duration;

use sqlx::error::DatabaseError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::config::DatabaseConfig;
use crate::error::{SchedulerError, SchedulerResult};

// Primary result codes; extended codes carry these in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Handle to the scheduler's SQLite database.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens a pool for the configured database, creating the file if needed.
    ///
    /// The database runs in WAL mode so readers never block the single
    /// writer, and writers queue on the lock for `busy_timeout_ms`.
    pub async fn connect(config: &DatabaseConfig) -> SchedulerResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(
            url = %config.url,
            max_connections = config.max_connections,
            busy_timeout_ms = config.busy_timeout_ms,
            "Database pool opened"
        );

        Ok(Self { pool })
    }

    /// Opens a private in-memory database with migrations applied.
    ///
    /// Every SQLite memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> SchedulerResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// Applies pending migrations from `./migrations`.
    pub async fn migrate(&self) -> SchedulerResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Starts a write transaction.
    ///
    /// The write lock is taken up front with `BEGIN IMMEDIATE`. A deferred
    /// transaction that reads first cannot later upgrade to a writer while
    /// another connection holds the lock; SQLite fails that upgrade at once
    /// instead of waiting. A lock still held after the busy timeout comes
    /// back as `StorageConflict`.
    pub async fn begin(&self) -> SchedulerResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(conflict_or_database)
    }

    /// Checks out a connection for reads outside a transaction.
    pub async fn acquire(&self) -> SchedulerResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Turns unique-constraint violations and lock contention into
/// `StorageConflict`; everything else stays a database error.
pub(crate) fn conflict_or_database(err: sqlx::Error) -> SchedulerError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() || is_lock_contention(&**db_err) {
            return SchedulerError::StorageConflict {
                message: db_err.message().to_string(),
            };
        }
    }
    SchedulerError::Database(err)
}

fn is_lock_contention(db_err: &dyn DatabaseError) -> bool {
    db_err
        .code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}
