mod anonymous;
mod registration;
mod users;

use std::fmt;

use crate::client::ApiClient;
use crate::error::SuiteResult;
use crate::faker::Faker;
use crate::fixtures::Targets;

/// Collection every scenario talks to
pub const USERS_PATH: &str = "/users";

/// Id the service must reject as malformed
pub const INVALID_USER_ID: &str = "aad";

/// What a scenario gets to work with
pub struct ScenarioContext<'a> {
    /// Fresh per scenario; logged in already when the scenario requires it
    pub client: ApiClient,
    pub targets: &'a Targets,
    pub faker: &'a mut Faker,
}

/// One request against the service and the assertions on its response
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    ListUsers,
    GetUser,
    GetInvalidUser,
    GetProfile,
    SearchByEmail,
    SearchByPhoneNumber,
    SearchByUsername,
    UpdateUser,
    RegisterUser,
    RegisterInvalidKey,
    ListUsersUnauthenticated,
}

impl Scenario {
    pub const ALL: [Scenario; 11] = [
        Self::ListUsers,
        Self::GetUser,
        Self::GetInvalidUser,
        Self::GetProfile,
        Self::SearchByEmail,
        Self::SearchByPhoneNumber,
        Self::SearchByUsername,
        Self::UpdateUser,
        Self::RegisterUser,
        Self::RegisterInvalidKey,
        Self::ListUsersUnauthenticated,
    ];

    pub fn all() -> &'static [Scenario] {
        &Self::ALL
    }

    pub fn group(self) -> &'static str {
        match self {
            Self::ListUsers => "GET /users",
            Self::GetUser | Self::GetInvalidUser => "GET /users/:userId",
            Self::GetProfile => "GET /users/profile/:username",
            Self::SearchByEmail | Self::SearchByPhoneNumber | Self::SearchByUsername => {
                "GET /users/search"
            }
            Self::UpdateUser => "PATCH /users/:userId",
            Self::RegisterUser | Self::RegisterInvalidKey => "POST /users",
            Self::ListUsersUnauthenticated => "Unauthenticated user",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ListUsers => "lists the users for the authorized user",
            Self::GetUser => "retrieves a user",
            Self::GetInvalidUser => "rejects a malformed user id",
            Self::GetProfile => "retrieves user profile info",
            Self::SearchByEmail => "searches for a user by email",
            Self::SearchByPhoneNumber => "searches for a user by phone number",
            Self::SearchByUsername => "searches for a user by username",
            Self::UpdateUser => "updates a user",
            Self::RegisterUser => "registers a new user with all valid fields",
            Self::RegisterInvalidKey => "rejects registration with an invalid key",
            Self::ListUsersUnauthenticated => "shows no users to an unauthenticated user",
        }
    }

    /// Authenticated scenarios log in as the login user first
    pub fn requires_login(self) -> bool {
        !matches!(
            self,
            Self::RegisterUser | Self::RegisterInvalidKey | Self::ListUsersUnauthenticated
        )
    }

    /// Case-insensitive substring match on "group name"
    pub fn matches(self, filter: &str) -> bool {
        self.to_string()
            .to_lowercase()
            .contains(&filter.trim().to_lowercase())
    }

    pub async fn run(self, ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
        match self {
            Self::ListUsers => users::list_users(ctx).await,
            Self::GetUser => users::get_user(ctx).await,
            Self::GetInvalidUser => users::get_invalid_user(ctx).await,
            Self::GetProfile => users::get_profile(ctx).await,
            Self::SearchByEmail => users::search_by_email(ctx).await,
            Self::SearchByPhoneNumber => users::search_by_phone_number(ctx).await,
            Self::SearchByUsername => users::search_by_username(ctx).await,
            Self::UpdateUser => users::update_user(ctx).await,
            Self::RegisterUser => registration::register_user(ctx).await,
            Self::RegisterInvalidKey => registration::register_invalid_key(ctx).await,
            Self::ListUsersUnauthenticated => anonymous::list_users(ctx).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.group(), self.name())
    }
}

pub(crate) fn user_path(id: &str) -> String {
    format!("{}/{}", USERS_PATH, urlencoding::encode(id))
}
