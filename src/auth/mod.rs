use async_trait::async_trait;

use crate::client::{ApiClient, ApiRequest};
use crate::config::AuthConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::requests::v1::auth::LoginRequest;

/// Who to log in as
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub remember_user: bool,
}

impl Credentials {
    /// Seed users share one password, taken from configuration
    pub fn for_user(username: impl Into<String>, config: &AuthConfig) -> Self {
        Self {
            username: username.into(),
            password: config.password.clone(),
            remember_user: config.remember_user,
        }
    }
}

/// Establishes a session on a client before authenticated scenarios run
///
/// The scenarios never look inside the session; whatever the implementation
/// stores on the client is replayed by it.
#[async_trait(?Send)]
pub trait Authenticator {
    async fn login(&self, client: &mut ApiClient, credentials: &Credentials) -> SuiteResult<()>;
}

/// Logs in through the service's own login endpoint
#[derive(Clone, Debug)]
pub struct ApiLogin {
    path: String,
}

impl ApiLogin {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            path: config.login_path.clone(),
        }
    }
}

#[async_trait(?Send)]
impl Authenticator for ApiLogin {
    #[tracing::instrument(skip_all, fields(username = %credentials.username))]
    async fn login(&self, client: &mut ApiClient, credentials: &Credentials) -> SuiteResult<()> {
        let payload = LoginRequest::new(
            credentials.username.as_str(),
            credentials.password.as_str(),
            credentials.remember_user,
        );
        let request = ApiRequest::post(self.path.as_str())
            .json(&payload)?
            .fail_on_status_code(false);

        let response = client.send(request).await?;

        if !response.status.is_success() {
            tracing::error!(status = response.status.as_u16(), "Login rejected");

            return Err(SuiteError::Login {
                username: credentials.username.clone(),
                status: response.status,
            });
        }

        if !client.has_session() {
            tracing::warn!("Login succeeded but the service set no cookie");
        }

        tracing::debug!("Logged in");

        Ok(())
    }
}
