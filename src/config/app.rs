use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{
    ApiConfig, AuthConfig, ConfigError, ObservabilityConfig, RunnerConfig, Validate, WithDefaults,
};

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "USERS_API";

/// Top-level suite configuration that aggregates all config modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Suite metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// Service under test (base URL, timeouts)
    #[serde(default)]
    pub api: ApiConfig,
    /// Login collaborator settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Seed data location
    #[serde(default)]
    pub fixtures: FixturesConfig,
    /// Scenario selection
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Suite metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Suite name, used in logs and the final report
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Environment the suite targets (development, staging, ...)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Where the seed user dataset lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// Path to the JSON dataset, relative to the working directory
    #[serde(default = "default_fixtures_path")]
    pub path: PathBuf,
}

fn default_app_name() -> String {
    "users-api-suite".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_fixtures_path() -> PathBuf {
    PathBuf::from("data/database.json")
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: default_environment(),
        }
    }
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            path: default_fixtures_path(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError(
                "app.environment cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for FixturesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("fixtures.path cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for SuiteConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.api.validate()?;
        self.auth.validate()?;
        self.fixtures.validate()?;
        self.runner.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl WithDefaults for SuiteConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: USERS_API__API__BASE_URL=http://localhost:3001
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/...)
/// 4. config/default.toml (base defaults)
pub fn load_config() -> Result<SuiteConfig, ConfigError> {
    use config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_environment());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let suite_config: SuiteConfig = config.try_deserialize()?;

    suite_config.validate()?;

    Ok(suite_config)
}
