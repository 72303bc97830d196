use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope of `GET /users` and `GET /users/search`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserListResponse<T = Value> {
    pub results: Vec<T>,
}

/// Envelope of `GET /users/:id`, `GET /users/profile/:username` and `POST /users`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserResponse<T = Value> {
    pub user: T,
}
