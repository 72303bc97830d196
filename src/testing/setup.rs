use std::path::PathBuf;

use crate::config::AuthConfig;
use crate::error::SuiteResult;
use crate::fixtures::Fixtures;

use super::instance::StubServer;

/// Path of the seed dataset shipped with the crate
pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/database.json")
}

/// The shipped seed dataset
///
/// # Panics
/// Panics if the dataset is missing or malformed. Tests should fail fast if
/// setup is broken.
pub async fn fixtures() -> Fixtures {
    Fixtures::load(fixtures_path())
        .await
        .expect("Failed to load bundled fixtures")
}

/// Stub service seeded with the shipped dataset, accepting the default password
///
/// # Panics
/// Panics if the server cannot bind a local port.
pub async fn stub() -> (StubServer, Fixtures) {
    let fixtures = fixtures().await;
    let stub = StubServer::start(&fixtures, &AuthConfig::default().password)
        .await
        .expect("Failed to start stub user service");

    (stub, fixtures)
}

/// Fixture targets of the shipped dataset
pub async fn targets() -> SuiteResult<crate::fixtures::Targets> {
    fixtures().await.targets()
}
