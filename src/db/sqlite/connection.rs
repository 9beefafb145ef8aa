//! SQLite connection management and schema upgrade.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::db::schema::{REGISTRY, SCHEMA_VERSION};
use crate::db::{DbError, DbResult};

/// SQLite-backed workspace store.
///
/// Construction is cheap and does no I/O. The pool is opened, and the schema
/// upgraded, on the first call that needs it; every later call reuses it.
pub struct SqliteStore {
    options: SqliteConnectOptions,
    max_connections: u32,
    location: Location,
    pool: OnceCell<SqlitePool>,
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

impl SqliteStore {
    /// Store backed by the database file at `path`, created if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        Self {
            options,
            max_connections: 4,
            location: Location::File(path),
            pool: OnceCell::new(),
        }
    }

    /// Private in-memory store (useful for testing).
    ///
    /// An in-memory database lives exactly as long as its connection, so the
    /// pool is pinned to one connection that never expires.
    pub fn in_memory() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap_or_else(|_| SqliteConnectOptions::new());
        Self {
            options,
            max_connections: 1,
            location: Location::Memory,
            pool: OnceCell::new(),
        }
    }

    /// Path of the database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// The shared connection pool, opening it on first use.
    pub async fn connection(&self) -> DbResult<&SqlitePool> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    /// Whether the pool has been opened yet.
    pub fn is_open(&self) -> bool {
        self.pool.initialized()
    }

    /// Schema version recorded in the database header.
    pub async fn schema_version(&self) -> DbResult<i64> {
        let pool = self.connection().await?;
        sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })
    }

    /// Close the pool if it was opened. Later calls fail.
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
        }
    }

    async fn connect(&self) -> DbResult<SqlitePool> {
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(self.options.clone())
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        migrate(&pool).await?;

        match &self.location {
            Location::File(path) => info!(path = %path.display(), "opened workspace database"),
            Location::Memory => debug!("opened in-memory workspace database"),
        }

        Ok(pool)
    }
}

/// Create every collection and index, once per database.
///
/// Runs in a single transaction and records [`SCHEMA_VERSION`] in
/// `PRAGMA user_version`. A database already at the current version is left
/// untouched; one from a newer build is rejected.
pub(crate) async fn migrate(pool: &SqlitePool) -> DbResult<()> {
    let mut tx = pool.begin().await.map_err(|e| DbError::Migration {
        message: e.to_string(),
    })?;

    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::Migration {
            message: e.to_string(),
        })?;

    if version > SCHEMA_VERSION {
        return Err(DbError::Migration {
            message: format!(
                "database version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            ),
        });
    }

    if version == SCHEMA_VERSION {
        debug!(version, "schema up to date");
        return Ok(());
    }

    for schema in &REGISTRY {
        for statement in schema.ddl() {
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::Migration {
                    message: format!("{}: {}", schema.collection, e),
                })?;
        }
    }

    sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::Migration {
            message: e.to_string(),
        })?;

    tx.commit().await.map_err(|e| DbError::Migration {
        message: e.to_string(),
    })?;

    info!(from = version, to = SCHEMA_VERSION, "upgraded workspace schema");
    Ok(())
}
