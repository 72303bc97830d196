use std::path::Path;

use serde::Deserialize;

use crate::error::{SuiteError, SuiteResult};
use crate::models::v1::user::User;

/// Seed users the targets are derived from; `users[1]` must exist
const REQUIRED_USERS: usize = 2;

/// Seed dataset shared with the service under test
///
/// Only the `users` collection is read; any other collection in the file is
/// ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Fixtures {
    pub users: Vec<User>,
}

/// Known-good inputs the scenarios are written against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Targets {
    /// Username the authenticated scenarios log in as
    pub login_username: String,
    /// Existing user id for `GET /users/:id`
    pub user_id: String,
    /// Email searched for in `GET /users/search`
    pub email: String,
    /// Phone number searched for in `GET /users/search`
    pub phone_number: String,
    /// Username for the profile lookup and the username search
    pub search_username: String,
    /// User id updated by `PATCH /users/:id`
    pub update_user_id: String,
}

impl Fixtures {
    /// Read the dataset from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .map_err(|source| SuiteError::FixtureRead {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_slice(&raw).map_err(|source| SuiteError::FixtureParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    pub fn targets(&self) -> SuiteResult<Targets> {
        let (first, second) = match self.users.as_slice() {
            [first, second, ..] => (first, second),
            users => {
                return Err(SuiteError::MissingSeedUser {
                    required: REQUIRED_USERS,
                    found: users.len(),
                });
            }
        };

        Ok(Targets {
            login_username: first.username.clone(),
            user_id: first.id.clone(),
            email: first.email.clone(),
            phone_number: second.phone_number.clone(),
            search_username: second.username.clone(),
            update_user_id: second.id.clone(),
        })
    }
}
