use super::settings::{PartialServerSettings, PartialSettings, Settings};
use super::{load_config, validate};
use crate::utils::error::Error;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.addr(), "127.0.0.1:8080");
    assert!(settings.publisher.enabled);
    assert_eq!(settings.publisher.interval_ms, 2000);
    assert_eq!(settings.log.level, "info");
}

#[test]
fn test_partial_settings_merge_keeps_unset_defaults() {
    let partial = PartialSettings {
        server: Some(PartialServerSettings {
            host: None,
            port: Some(80),
        }),
        ..Default::default()
    };

    let merged = partial.merge_over(Settings::default());
    assert_eq!(merged.server.host, "127.0.0.1");
    assert_eq!(merged.server.port, 80);
    assert_eq!(merged.publisher, Settings::default().publisher);
}

#[test]
#[serial]
fn load_config_without_sources_returns_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let cfg = load_config();

    env::set_current_dir(orig).expect("restore cwd");
    assert_eq!(cfg.expect("load_config failed"), Settings::default());
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [publisher]
        enabled = false
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config();

    env::set_current_dir(orig).expect("restore cwd");
    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert!(!cfg.publisher.enabled);
    assert_eq!(cfg.publisher.interval_ms, 2000);
}

#[test]
#[serial]
fn load_config_from_env_overrides_defaults() {
    temp_env::with_vars(
        [
            ("POPSTREAM_SERVER__PORT", Some("9100")),
            ("POPSTREAM_PUBLISHER__INTERVAL_MS", Some("500")),
            ("POPSTREAM_LOG__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.publisher.interval_ms, 500);
            assert_eq!(cfg.log.level, "debug");
            assert_eq!(cfg.server.host, "127.0.0.1");
        },
    );
}

#[test]
fn test_validate_rejects_zero_interval() {
    let mut settings = Settings::default();
    assert!(validate(&settings).is_ok());

    settings.publisher.interval_ms = 0;
    assert!(matches!(validate(&settings), Err(Error::Config(_))));
}

#[test]
#[serial]
fn load_config_rejects_zero_interval_from_env() {
    temp_env::with_var("POPSTREAM_PUBLISHER__INTERVAL_MS", Some("0"), || {
        let err = load_config().expect_err("zero interval must be rejected");
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("interval_ms"));
    });
}
