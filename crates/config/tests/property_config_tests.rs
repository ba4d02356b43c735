//! Property-based tests for configuration building.

use maintdesk_config::{ConfigError, ConfigLoader, ConnectionConfig};
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

fn base_url_strategy() -> impl Strategy<Value = String> {
    let scheme = prop_oneof![Just("http"), Just("https")];
    let host = prop_oneof![
        Just("localhost"),
        Just("maint.example.com"),
        Just("dashboard.internal"),
    ];
    let port = 1024u16..=65535u16;
    let path = prop_oneof![Just(""), Just("/api"), Just("/api/v1")];
    (scheme, host, port, path)
        .prop_map(|(scheme, host, port, path)| format!("{scheme}://{host}:{port}{path}"))
}

fn loader(base_url: String) -> ConfigLoader {
    ConfigLoader::new()
        .with_base_url(base_url)
        .with_session_path(PathBuf::from("/tmp/session.json"))
}

proptest! {
    #[test]
    fn prop_trailing_slashes_are_stripped(url in base_url_strategy(), slashes in 0usize..4) {
        let config = loader(format!("{url}{}", "/".repeat(slashes))).build().unwrap();
        prop_assert_eq!(config.connection.base_url, url);
    }

    #[test]
    fn prop_timeout_within_bounds_is_accepted(secs in 1u64..=3600) {
        let config = loader("http://localhost:5000".to_string())
            .with_timeout(Duration::from_secs(secs))
            .build()
            .unwrap();
        prop_assert_eq!(config.connection.timeout, Duration::from_secs(secs));
    }

    #[test]
    fn prop_timeout_above_maximum_is_rejected(secs in 3601u64..100_000) {
        let err = loader("http://localhost:5000".to_string())
            .with_timeout(Duration::from_secs(secs))
            .build()
            .unwrap_err();
        prop_assert!(matches!(err, ConfigError::InvalidTimeout { .. }), "expected InvalidTimeout, got {:?}", err);
    }

    #[test]
    fn prop_connection_config_serde_roundtrip(
        url in base_url_strategy(),
        skip_verify in any::<bool>(),
        timeout in 1u64..3600,
        threshold in 0u64..3600,
    ) {
        let connection = ConnectionConfig {
            base_url: url,
            skip_verify,
            timeout: Duration::from_secs(timeout),
            refresh_threshold: Duration::from_secs(threshold),
        };
        let json = serde_json::to_string(&connection).unwrap();
        let back: ConnectionConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.base_url, connection.base_url);
        prop_assert_eq!(back.skip_verify, skip_verify);
        prop_assert_eq!(back.timeout, connection.timeout);
        prop_assert_eq!(back.refresh_threshold, connection.refresh_threshold);
    }
}
