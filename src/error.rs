use std::path::PathBuf;

use awc::http::{Method, StatusCode};

use crate::config::ConfigError;

/// Everything that can go wrong while preparing or running the suite
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read fixtures from {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixtures from {path}: {source}")]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixtures must contain at least {required} users, found {found}")]
    MissingSeedUser { required: usize, found: usize },

    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{method} {url} failed: {message}")]
    Request {
        method: Method,
        url: String,
        message: String,
    },

    #[error("{method} {url} returned an unreadable body: {message}")]
    Payload {
        method: Method,
        url: String,
        message: String,
    },

    #[error("{method} {url} failed on status code {status}: {body}")]
    UnexpectedStatus {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("login as {username} failed with status {status}")]
    Login { username: String, status: StatusCode },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("assertion failed: {0}")]
    Assertion(String),
}

impl SuiteError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// True when the failure came from an expectation rather than from the transport
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }
}

pub type SuiteResult<T> = Result<T, SuiteError>;
