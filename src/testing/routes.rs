use actix_web::cookie::Cookie;
use actix_web::cookie::time::OffsetDateTime;
use actix_web::http::Method;
use actix_web::web::{self, Data, Json, Path, Query, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{Value, json};

use super::stub::{SESSION_COOKIE, StubState};
use crate::models::v1::user::Profile;
use crate::requests::v1::auth::LoginRequest;
use crate::requests::v1::user::{RegisterUserRequest, UpdateUserRequest};
use crate::responses::v1::error::{ErrorResponse, ValidationError, ValidationErrorResponse};
use crate::responses::v1::user::{UserListResponse, UserResponse};

/// Fields `POST /users` knows about
const REGISTER_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "username",
    "password",
    "email",
    "phoneNumber",
    "balance",
    "avatar",
];

/// Fields `PATCH /users/:id` knows about
const UPDATE_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "phoneNumber",
    "defaultPrivacyLevel",
];

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

pub fn route(cfg: &mut ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .service(
            web::resource("/users")
                .route(web::get().to(list))
                .route(web::post().to(register)),
        )
        .route("/users/search", web::get().to(search))
        .route("/users/profile/{username}", web::get().to(profile))
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(show))
                .route(web::patch().to(update)),
        );
}

async fn login(state: Data<StubState>, Json(request): Json<LoginRequest>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::POST, "/login") {
        return response;
    }

    match state.login(&request.username, &request.password) {
        Some((token, user)) => {
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish();

            HttpResponse::Ok()
                .cookie(cookie)
                .json(UserResponse { user: user.public() })
        }
        None => unauthorized(),
    }
}

/// Ends the session and expires the cookie through a past `Expires` date
async fn logout(req: HttpRequest, state: Data<StubState>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::POST, "/logout") {
        return response;
    }

    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.logout(cookie.value());
    }

    let cleared = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish();

    HttpResponse::Ok().cookie(cleared).finish()
}

async fn list(req: HttpRequest, state: Data<StubState>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::GET, "/users") {
        return response;
    }

    let Some(username) = current_user(&req, &state) else {
        return unauthorized();
    };

    HttpResponse::Ok().json(UserListResponse {
        results: state.list(Some(username.as_str())),
    })
}

async fn search(
    req: HttpRequest,
    state: Data<StubState>,
    Query(query): Query<SearchQuery>,
) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::GET, "/users/search") {
        return response;
    }

    if current_user(&req, &state).is_none() {
        return unauthorized();
    }

    let results = query
        .q
        .map(|q| state.search(&q))
        .unwrap_or_default();

    HttpResponse::Ok().json(UserListResponse { results })
}

// Profiles are public, no session check.
async fn profile(state: Data<StubState>, username: Path<String>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::GET, "/users/profile/{username}") {
        return response;
    }

    match state.find_by_username(&username) {
        Some(user) => HttpResponse::Ok().json(UserResponse {
            user: Profile::from(&user),
        }),
        None => not_found(),
    }
}

async fn show(req: HttpRequest, state: Data<StubState>, id: Path<String>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::GET, "/users/{id}") {
        return response;
    }

    if current_user(&req, &state).is_none() {
        return unauthorized();
    }

    if !StubState::is_valid_id(&id) {
        return invalid_id(&id);
    }

    match state.user(&id) {
        Some(user) => HttpResponse::Ok().json(UserResponse { user: user.public() }),
        None => not_found(),
    }
}

async fn update(
    req: HttpRequest,
    state: Data<StubState>,
    id: Path<String>,
    Json(body): Json<Value>,
) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::PATCH, "/users/{id}") {
        return response;
    }

    if current_user(&req, &state).is_none() {
        return unauthorized();
    }

    if !StubState::is_valid_id(&id) {
        return invalid_id(&id);
    }

    if !has_any_field(&body, UPDATE_FIELDS) {
        return invalid_body();
    }

    let request = match serde_json::from_value::<UpdateUserRequest>(body) {
        Ok(request) => request,
        Err(e) => return unprocessable(ValidationError::new(None, e.to_string(), "body")),
    };

    match state.update(&id, request) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

async fn register(state: Data<StubState>, Json(body): Json<Value>) -> HttpResponse {
    if let Some(response) = state.overridden(&Method::POST, "/users") {
        return response;
    }

    if !has_any_field(&body, REGISTER_FIELDS) {
        return invalid_body();
    }

    let request = match serde_json::from_value::<RegisterUserRequest>(body) {
        Ok(request) => request,
        Err(e) => return unprocessable(ValidationError::new(None, e.to_string(), "body")),
    };

    let user = state.register(request);

    HttpResponse::Created().json(UserResponse { user: user.public() })
}

fn current_user(req: &HttpRequest, state: &StubState) -> Option<String> {
    let cookie = req.cookie(SESSION_COOKIE)?;

    state.session(cookie.value())
}

fn has_any_field(body: &Value, fields: &[&str]) -> bool {
    body.as_object()
        .is_some_and(|object| fields.iter().any(|field| object.contains_key(*field)))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: json!("Unauthorized"),
    })
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: json!("User not found"),
    })
}

fn invalid_id(id: &str) -> HttpResponse {
    unprocessable(ValidationError::new(
        Some("userId"),
        format!("Invalid value: {id}"),
        "params",
    ))
}

/// A body with none of the known fields yields a single grouped error
fn invalid_body() -> HttpResponse {
    unprocessable(ValidationError::new(Some("_error"), "Invalid value(s)", "body"))
}

fn unprocessable(error: ValidationError) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ValidationErrorResponse {
        errors: vec![json!(error)],
    })
}
