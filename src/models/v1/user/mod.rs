use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who can see a user's transactions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    #[default]
    Public,
    Private,
    Contacts,
}

/// A user as stored by the service and as found in the seed dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// Password hash; only present in seed data, never in responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub default_privacy_level: PrivacyLevel,
    #[serde(default)]
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl User {
    /// Copy of the user safe to send back to clients
    pub fn public(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }

    /// Search semantics of `GET /users/search`: case-insensitive match on
    /// email, phone number or username
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return false;
        }

        [&self.email, &self.phone_number, &self.username]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Fields visible on a public profile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}
