//! Validation tests for values that reach `ConfigLoader::build`.

use std::path::PathBuf;
use std::time::Duration;

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

fn loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_base_url("https://maint.example.com".to_string())
        .with_session_path(PathBuf::from("/tmp/s.json"))
}

#[test]
fn test_rejects_unparseable_base_url() {
    let err = ConfigLoader::new()
        .with_base_url("not a url".to_string())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}

#[test]
fn test_rejects_non_http_scheme() {
    let err = ConfigLoader::new()
        .with_base_url("ftp://maint.example.com".to_string())
        .build()
        .unwrap_err();
    match err {
        ConfigError::InvalidBaseUrl { message, .. } => assert!(message.contains("http")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_rejects_zero_timeout() {
    let err = loader()
        .with_timeout(Duration::from_secs(0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_rejects_timeout_above_maximum() {
    let err = loader()
        .with_timeout(Duration::from_secs(3601))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_accepts_zero_refresh_threshold() {
    let config = loader()
        .with_refresh_threshold(Duration::from_secs(0))
        .build()
        .unwrap();
    assert_eq!(config.connection.refresh_threshold, Duration::ZERO);
}

#[test]
fn test_rejects_refresh_threshold_above_maximum() {
    let err = loader()
        .with_refresh_threshold(Duration::from_secs(7200))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRefreshThreshold { .. }));
}
