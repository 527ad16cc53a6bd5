//! Configuration loading and resolution
//!
//! Every setting follows the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A blank value at any tier counts as "not set" and falls through to the
//! next tier.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the tag store connection string
pub const DATABASE_URL_ENV: &str = "EMOTION_DB_URL";

/// Environment variable holding the service listen address
pub const LISTEN_ADDR_ENV: &str = "EMOTION_LISTEN_ADDR";

/// Connection string used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://emotion_tags.db?mode=rwc";

/// Listen address used when nothing else is configured
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Contents of `eden-tags.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database_url: Option<String>,
    pub listen_addr: Option<String>,
    pub logging: LoggingConfig,
}

/// `[logging]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Get the platform config file path
///
/// Linux checks `~/.config/eden/eden-tags.toml` first, then
/// `/etc/eden/eden-tags.toml`.
pub fn default_config_path() -> PathBuf {
    let user_config = dirs::config_dir().map(|d| d.join("eden").join("eden-tags.toml"));

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/eden/eden-tags.toml");
        match user_config {
            Some(path) if path.exists() => path,
            _ if system_config.exists() => system_config,
            Some(path) => path,
            None => system_config,
        }
    } else {
        user_config.unwrap_or_else(|| PathBuf::from("eden-tags.toml"))
    }
}

/// Read TOML configuration without logging
///
/// Returns `None` when the file does not exist. Callers that read config
/// before a tracing subscriber is installed use this and report the outcome
/// themselves once logging is up.
pub fn read_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Load TOML configuration
///
/// A missing file is not an error: defaults are returned and a warning is
/// logged. A file that exists but does not parse is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    match read_toml_config(path)? {
        Some(config) => {
            info!("Loaded config file: {}", path.display());
            Ok(config)
        }
        None => {
            warn!("Config file not found: {} (using defaults)", path.display());
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve the tag store connection string
pub fn resolve_database_url(cli_arg: Option<&str>, toml_config: &TomlConfig) -> String {
    if let Some(url) = non_blank(cli_arg) {
        return url;
    }

    if let Ok(raw) = std::env::var(DATABASE_URL_ENV) {
        match non_blank(Some(&raw)) {
            Some(url) => return url,
            None => warn!(
                "{} is empty (value: {:?}); defaulting to SQLite storage",
                DATABASE_URL_ENV, raw
            ),
        }
    }

    if let Some(url) = non_blank(toml_config.database_url.as_deref()) {
        return url;
    }

    DEFAULT_DATABASE_URL.to_string()
}

/// Resolve the address the HTTP service binds to
pub fn resolve_listen_addr(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Result<SocketAddr> {
    let raw = non_blank(cli_arg)
        .or_else(|| non_blank(std::env::var(LISTEN_ADDR_ENV).ok().as_deref()))
        .or_else(|| non_blank(toml_config.listen_addr.as_deref()))
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid listen address {:?}: {}", raw, e)))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
