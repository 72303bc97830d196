use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Scenario selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Only run scenarios whose "group name" contains this text (case-insensitive)
    #[serde(default)]
    pub filter: Option<String>,
    /// Stop at the first failing scenario
    #[serde(default)]
    pub fail_fast: bool,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(filter) = &self.filter
            && filter.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "runner.filter cannot be blank when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl WithDefaults for RunnerConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
