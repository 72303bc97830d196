//! Configuration loading across files and environment variables
//!
//! These tests mutate process-wide environment variables and the config/
//! directory, so they run serially.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use users_api_suite::config::{self, ConfigError, LogFormat};

mod utils {
    use std::fs;
    use std::path::Path;

    pub fn create_temp_config(path: &str, content: &str) {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn remove_temp_config(path: &str) {
        let _ = fs::remove_file(path);
    }

    /// Clean up environment variables with the USERS_API prefix
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("USERS_API"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
        unsafe { std::env::remove_var("APP_ENV") };
    }
}

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();

    let config = config::load();

    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());

    let config = config.unwrap();

    assert_eq!(config.app.name, "users-api-suite");
    assert_eq!(config.app.environment, "development");
    assert_eq!(config.api.base_url, "http://localhost:3001");
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert_eq!(config.auth.login_path, "/login");
    assert_eq!(config.auth.password, "s3cret");
    assert!(!config.auth.remember_user);
    assert_eq!(config.fixtures.path, PathBuf::from("data/database.json"));
    assert!(config.runner.filter.is_none());
    assert!(!config.runner.fail_fast);
    assert_eq!(config.observability.format, LogFormat::Compact);
}

#[test]
#[serial]
fn test_env_vars_override_files() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("USERS_API__API__BASE_URL", "https://staging.example.com");
        env::set_var("USERS_API__API__TIMEOUT_SECS", "5");
        env::set_var("USERS_API__AUTH__REMEMBER_USER", "true");
        env::set_var("USERS_API__RUNNER__FILTER", "search");
    };

    let config = config::load();
    utils::clean_env_vars();

    let config = config.expect("Config with env overrides should load");

    assert_eq!(config.api.base_url, "https://staging.example.com");
    assert_eq!(config.api.timeout_secs, 5);
    assert!(config.auth.remember_user);
    assert_eq!(config.runner.filter.as_deref(), Some("search"));
}

#[test]
#[serial]
fn test_environment_file_overrides_default() {
    utils::clean_env_vars();
    let path = "config/unit-test-env.toml";
    utils::create_temp_config(
        path,
        r#"
[app]
environment = "unit-test-env"

[observability]
format = "json"
"#,
    );
    unsafe { env::set_var("APP_ENV", "unit-test-env") };

    let config = config::load();

    utils::remove_temp_config(path);
    utils::clean_env_vars();

    let config = config.expect("Environment-specific config should load");

    assert_eq!(config.app.environment, "unit-test-env");
    assert_eq!(config.observability.format, LogFormat::Json);
    // Untouched sections keep their defaults
    assert_eq!(config.api.base_url, "http://localhost:3001");
}

#[test]
#[serial]
fn test_env_var_beats_environment_file() {
    utils::clean_env_vars();
    let path = "config/unit-test-precedence.toml";
    utils::create_temp_config(path, "[api]\nbase_url = \"http://from-file:3001\"\n");
    unsafe {
        env::set_var("APP_ENV", "unit-test-precedence");
        env::set_var("USERS_API__API__BASE_URL", "http://from-env:3001");
    };

    let config = config::load();

    utils::remove_temp_config(path);
    utils::clean_env_vars();

    assert_eq!(config.unwrap().api.base_url, "http://from-env:3001");
}

#[test]
#[serial]
fn test_invalid_base_url_is_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("USERS_API__API__BASE_URL", "localhost:3001") };

    let config = config::load();
    utils::clean_env_vars();

    match config {
        Err(ConfigError::ValidationError(message)) => assert!(message.contains("api.base_url")),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("USERS_API__API__TIMEOUT_SECS", "0") };

    let config = config::load();
    utils::clean_env_vars();

    assert!(matches!(config, Err(ConfigError::ValidationError(_))));
}

#[test]
#[serial]
fn test_unparseable_value_is_a_load_error() {
    utils::clean_env_vars();
    unsafe { env::set_var("USERS_API__API__TIMEOUT_SECS", "soon") };

    let config = config::load();
    utils::clean_env_vars();

    assert!(matches!(config, Err(ConfigError::Load(_))));
}
