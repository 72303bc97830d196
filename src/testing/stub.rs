use std::sync::Mutex;

use actix_web::HttpResponse;
use actix_web::http::{Method, StatusCode};
use chrono::Utc;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::fixtures::Fixtures;
use crate::models::v1::user::User;
use crate::requests::v1::user::{RegisterUserRequest, UpdateUserRequest};

/// Session cookie set by `POST /login`
pub const SESSION_COOKIE: &str = "connect.sid";

/// Short ids: 9 or 10 URL-safe characters
static USER_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{9,10}$").unwrap());

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// A request the stub received
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub has_cookie: bool,
}

/// In-memory state of the stub user service
pub struct StubState {
    users: DashMap<String, User>,
    sessions: DashMap<String, String>,
    overrides: DashMap<String, (StatusCode, Value)>,
    requests: Mutex<Vec<RecordedRequest>>,
    password: String,
}

impl StubState {
    /// Seeds every fixture user; all of them log in with `password`
    pub fn new(fixtures: &Fixtures, password: impl Into<String>) -> Self {
        let users = DashMap::new();

        for user in &fixtures.users {
            users.insert(user.id.clone(), user.clone());
        }

        Self {
            users,
            sessions: DashMap::new(),
            overrides: DashMap::new(),
            requests: Mutex::new(Vec::new()),
            password: password.into(),
        }
    }

    pub fn is_valid_id(id: &str) -> bool {
        USER_ID_REGEX.is_match(id)
    }

    /// Answer `method route` with a canned response instead of the real handler
    ///
    /// `route` is the route pattern, e.g. `/users/{id}`.
    pub fn override_response(&self, method: Method, route: &str, status: StatusCode, body: Value) {
        self.overrides.insert(route_key(&method, route), (status, body));
    }

    pub fn clear_overrides(&self) {
        self.overrides.clear();
    }

    pub(crate) fn overridden(&self, method: &Method, route: &str) -> Option<HttpResponse> {
        let entry = self.overrides.get(&route_key(method, route))?;
        let (status, body) = entry.value();

        Some(match body {
            Value::Null => HttpResponse::build(*status).finish(),
            body => HttpResponse::build(*status).json(body),
        })
    }

    pub(crate) fn record(&self, request: RecordedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map_or_else(|_| Vec::new(), |requests| requests.clone())
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|user| user.value().clone())
    }

    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .map(|user| user.value().clone())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Users other than `except`, ordered by username
    pub(crate) fn list(&self, except: Option<&str>) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|user| Some(user.username.as_str()) != except)
            .map(|user| user.value().public())
            .collect();

        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    pub(crate) fn search(&self, query: &str) -> Vec<User> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|user| user.matches(query))
            .map(|user| user.value().public())
            .collect();

        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    /// Opens a session and returns its token, `None` on bad credentials
    pub(crate) fn login(&self, username: &str, password: &str) -> Option<(String, User)> {
        if password != self.password {
            return None;
        }

        let user = self.find_by_username(username)?;
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        self.sessions.insert(token.clone(), user.username.clone());

        Some((token, user))
    }

    /// Username behind a session token
    pub(crate) fn session(&self, token: &str) -> Option<String> {
        self.sessions.get(token).map(|username| username.value().clone())
    }

    pub(crate) fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub(crate) fn register(&self, request: RegisterUserRequest) -> User {
        let now = Utc::now();
        let id = generate_id();
        let user = User {
            id: id.clone(),
            uuid: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            password: Some(request.password),
            email: String::new(),
            phone_number: String::new(),
            avatar: String::new(),
            default_privacy_level: Default::default(),
            balance: 0,
            created_at: now,
            modified_at: now,
        };

        self.users.insert(id, user.clone());

        user
    }

    /// Applies the present fields; `None` when the user does not exist
    pub(crate) fn update(&self, id: &str, request: UpdateUserRequest) -> Option<User> {
        let mut user = self.users.get_mut(id)?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(phone_number) = request.phone_number {
            user.phone_number = phone_number;
        }
        user.modified_at = Utc::now();

        Some(user.value().clone())
    }
}

fn route_key(method: &Method, route: &str) -> String {
    format!("{} {}", method, route)
}

fn generate_id() -> String {
    let mut rng = rand::rng();

    (0..10)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}
