use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Login collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path of the login endpoint, relative to the API base URL
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Password shared by every seed user
    #[serde(default = "default_password")]
    pub password: String,
    /// Ask the service for a long-lived session
    #[serde(default)]
    pub remember_user: bool,
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_password() -> String {
    "s3cret".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            password: default_password(),
            remember_user: false,
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "auth.login_path must start with '/'".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ConfigError::ValidationError("auth.password cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl WithDefaults for AuthConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
