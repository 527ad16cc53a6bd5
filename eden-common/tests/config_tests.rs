//! Unit tests for configuration resolution
//!
//! Tests that manipulate EMOTION_DB_URL or EMOTION_LISTEN_ADDR are marked
//! with #[serial] so they never race on the process environment.

use eden_common::config::{
    load_toml_config, read_toml_config, resolve_database_url, resolve_listen_addr, TomlConfig,
    DATABASE_URL_ENV, DEFAULT_DATABASE_URL, DEFAULT_LISTEN_ADDR, LISTEN_ADDR_ENV,
};
use eden_common::Error;
use serial_test::serial;
use std::env;
use std::net::SocketAddr;

fn toml_with(database_url: Option<&str>, listen_addr: Option<&str>) -> TomlConfig {
    TomlConfig {
        database_url: database_url.map(str::to_string),
        listen_addr: listen_addr.map(str::to_string),
        ..TomlConfig::default()
    }
}

#[test]
#[serial]
fn test_database_url_defaults_to_sqlite() {
    env::remove_var(DATABASE_URL_ENV);

    let url = resolve_database_url(None, &TomlConfig::default());
    assert_eq!(url, DEFAULT_DATABASE_URL);
}

#[test]
#[serial]
fn test_database_url_blank_env_falls_back() {
    for blank in ["", "   "] {
        env::set_var(DATABASE_URL_ENV, blank);
        let url = resolve_database_url(None, &TomlConfig::default());
        assert_eq!(url, DEFAULT_DATABASE_URL, "blank value {:?}", blank);
    }
    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_database_url_priority_order() {
    let toml = toml_with(Some("sqlite://from-toml.db"), None);

    env::remove_var(DATABASE_URL_ENV);
    assert_eq!(resolve_database_url(None, &toml), "sqlite://from-toml.db");

    env::set_var(DATABASE_URL_ENV, "  sqlite://from-env.db  ");
    assert_eq!(resolve_database_url(None, &toml), "sqlite://from-env.db");

    assert_eq!(
        resolve_database_url(Some("sqlite://from-cli.db"), &toml),
        "sqlite://from-cli.db"
    );

    // Blank CLI argument does not shadow the environment
    assert_eq!(resolve_database_url(Some(" "), &toml), "sqlite://from-env.db");

    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_listen_addr_default_and_overrides() {
    env::remove_var(LISTEN_ADDR_ENV);

    let default: SocketAddr = DEFAULT_LISTEN_ADDR.parse().unwrap();
    assert_eq!(resolve_listen_addr(None, &TomlConfig::default()).unwrap(), default);

    let toml = toml_with(None, Some("0.0.0.0:9000"));
    assert_eq!(
        resolve_listen_addr(None, &toml).unwrap(),
        "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
    );

    env::set_var(LISTEN_ADDR_ENV, "127.0.0.1:9100");
    assert_eq!(
        resolve_listen_addr(None, &toml).unwrap(),
        "127.0.0.1:9100".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(
        resolve_listen_addr(Some("127.0.0.1:9200"), &toml).unwrap(),
        "127.0.0.1:9200".parse::<SocketAddr>().unwrap()
    );

    env::remove_var(LISTEN_ADDR_ENV);
}

#[test]
#[serial]
fn test_listen_addr_rejects_garbage() {
    env::remove_var(LISTEN_ADDR_ENV);

    let result = resolve_listen_addr(Some("not-an-address"), &TomlConfig::default());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_toml_file_uses_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();

    assert!(config.database_url.is_none());
    assert!(config.listen_addr.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_toml_file_is_parsed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("eden-tags.toml");
    std::fs::write(
        &path,
        r#"
database_url = "sqlite:///var/lib/eden/tags.db"
listen_addr = "0.0.0.0:8000"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.database_url.as_deref(), Some("sqlite:///var/lib/eden/tags.db"));
    assert_eq!(config.listen_addr.as_deref(), Some("0.0.0.0:8000"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "database_url = [unterminated").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_read_toml_config_reports_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    let missing = read_toml_config(&temp_dir.path().join("absent.toml")).unwrap();
    assert!(missing.is_none());

    let path = temp_dir.path().join("eden-tags.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
    let present = read_toml_config(&path).unwrap().expect("config file exists");
    assert_eq!(present.logging.level, "warn");
    assert!(present.database_url.is_none());
}
