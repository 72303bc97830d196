pub mod api;
pub mod app;
pub mod auth;
pub mod observability;
pub mod runner;

pub use api::ApiConfig;
pub use app::{AppMetadata, FixturesConfig, SuiteConfig};
pub use auth::AuthConfig;
pub use observability::{LogFormat, ObservabilityConfig};
pub use runner::RunnerConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Checks a configuration section for values the suite cannot work with
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Builds a configuration section from its defaults alone
pub trait WithDefaults {
    fn with_defaults() -> Self;
}

/// Load the suite configuration from files and environment variables
pub fn load() -> Result<SuiteConfig, ConfigError> {
    app::load_config()
}
