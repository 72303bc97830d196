use serde::{Deserialize, Serialize};

/// Body of `POST /login`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Always `"LOGIN"`
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>, remember: bool) -> Self {
        Self {
            kind: "LOGIN".to_string(),
            username: username.into(),
            password: password.into(),
            remember,
        }
    }
}
