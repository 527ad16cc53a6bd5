//! Errors shared by the Eden tag tools
//!
//! Only startup and storage plumbing fails here; request-level failures are
//! owned by each service's API error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Tag store connection could not be opened or queried
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database directory or config file could not be read or created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad TOML, unsupported database URL or unparseable listen address
    #[error("Configuration error: {0}")]
    Config(String),
}
