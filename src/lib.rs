pub mod assertions;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod faker;
pub mod fixtures;
pub mod logging;
pub mod models;
pub mod requests;
pub mod responses;
pub mod runner;
pub mod scenarios;

// Testing utilities (always available for integration tests)
pub mod testing;

// Re-export commonly used types for convenience
pub use auth::{ApiLogin, Authenticator, Credentials};
pub use client::{ApiClient, ApiRequest, ApiResponse};
pub use config::SuiteConfig;
pub use error::{SuiteError, SuiteResult};
pub use faker::Faker;
pub use fixtures::{Fixtures, Targets};
pub use runner::{Runner, ScenarioOutcome, SuiteReport};
pub use scenarios::Scenario;
