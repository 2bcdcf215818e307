//! Tests for loading server configuration from TOML files.

use rps_server::{HOST_ENV, PORT_ENV, ServerConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 8080
log_filter = "rps_server=debug"
"#,
    );

    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.log_filter(), "rps_server=debug");
}

#[test]
fn test_missing_keys_take_defaults() {
    let file = write_config("port = 4000\n");
    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:4000");
    assert_eq!(config.log_filter(), "info");
}

#[test]
fn test_unknown_key_rejected() {
    let file = write_config("hots = \"0.0.0.0\"\n");
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_layering_order() {
    let file = write_config("host = \"10.0.0.1\"\nport = 4000\n");
    let config = ServerConfig::from_file(file.path())
        .unwrap()
        .with_env_from(|key| match key {
            HOST_ENV => Some("10.0.0.2".to_string()),
            PORT_ENV => Some("5000".to_string()),
            _ => None,
        })
        .unwrap()
        .with_overrides(None, Some(6000));

    assert_eq!(config.bind_address(), "10.0.0.2:6000");
}
