//! Database initialization
//!
//! Opens the SQLite pool behind the tag store. File-backed databases are
//! created on first run along with any missing parent directories.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Milliseconds a connection waits on a locked database before failing
const BUSY_TIMEOUT_MS: u64 = 5000;

/// Open a connection pool for `database_url`
///
/// Only `sqlite:` URLs are supported.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    if !database_url.starts_with("sqlite:") {
        return Err(Error::Config(format!(
            "Unsupported database URL (expected sqlite:...): {}",
            database_url
        )));
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS));

    let Some(path) = database_file(database_url) else {
        info!("Opening in-memory database");
        return single_connection_pool(options).await;
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if path.exists() {
        info!("Opening existing database: {}", path.display());
    } else {
        info!("Initializing new database: {}", path.display());
    }

    // WAL lets list/get readers proceed while a create is writing
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options.journal_mode(SqliteJournalMode::Wal))
        .await?;

    Ok(pool)
}

/// Open a private in-memory database
///
/// The pool holds exactly one connection that is never recycled, so the
/// database lives as long as the pool does.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    single_connection_pool(SqliteConnectOptions::from_str("sqlite::memory:")?).await
}

async fn single_connection_pool(options: SqliteConnectOptions) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Extract the on-disk path from a sqlite URL, if it names a file
fn database_file(database_url: &str) -> Option<PathBuf> {
    if database_url.contains("mode=memory") {
        return None;
    }

    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
