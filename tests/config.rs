use std::fs;
use std::time::Duration;

use storefront_listing::models::config::ServerConfig;

const DEFAULT_YAML: &str = r#"
address: "127.0.0.1"
port: 8080
templates_dir: "./templates/**/*"
secret: "test-secret"
api_base_url: "http://127.0.0.1:5000/api"
"#;

#[test]
fn loads_defaults_and_fills_listing_settings() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).expect("write config");

    let config = ServerConfig::load(dir.path(), "local").expect("config loads");

    assert_eq!(config.port, 8080);
    assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api");
    assert_eq!(config.listing_defaults().par_page, 12);
    assert_eq!(config.listing_defaults().show_item, 5);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
}

#[test]
fn environment_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("default.yaml"), DEFAULT_YAML).expect("write config");
    fs::write(
        dir.path().join("staging.yaml"),
        "port: 9090\nper_page: 24\nshow_item: 7\nrequest_timeout_secs: 3\n",
    )
    .expect("write config");

    let config = ServerConfig::load(dir.path(), "staging").expect("config loads");

    assert_eq!(config.port, 9090);
    assert_eq!(config.listing_defaults().par_page, 24);
    assert_eq!(config.listing_defaults().show_item, 7);
    assert_eq!(config.request_timeout(), Duration::from_secs(3));
}

#[test]
fn missing_default_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(ServerConfig::load(dir.path(), "local").is_err());
}

#[test]
fn shipped_default_config_parses() {
    let config = ServerConfig::load("config", "does-not-exist").expect("config loads");
    assert!(config.secret.len() >= 64);
}
