//! In-process stub of the user service
//!
//! Used by this crate's own tests to exercise the client, the scenarios and
//! the runner without a live service. The stub follows the same contract the
//! scenarios assert on and can be told to misbehave per route.

pub mod instance;
pub mod routes;
pub mod setup;
pub mod stub;

pub use instance::StubServer;
pub use stub::{RecordedRequest, SESSION_COOKIE, StubState};
