//! Client behavior over real HTTP

use actix_web::http::{Method, StatusCode};
use serde_json::json;
use users_api_suite::config::ApiConfig;
use users_api_suite::testing::setup;
use users_api_suite::{ApiClient, ApiRequest, SuiteError};

#[actix_web::test]
async fn test_non_success_status_fails_by_default() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    let result = client.send(ApiRequest::get("/users")).await;

    match result {
        Err(SuiteError::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected an unexpected-status error, got {other:?}"),
    }
}

#[actix_web::test]
async fn test_fail_on_status_code_false_returns_response() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    let response = client
        .send(ApiRequest::get("/users").fail_on_status_code(false))
        .await
        .expect("Request should complete");

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "error": "Unauthorized" }));
}

#[actix_web::test]
async fn test_login_cookie_is_replayed() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    let login = ApiRequest::post("/login")
        .body(json!({
            "type": "LOGIN",
            "username": "Katharina_Bernier",
            "password": "s3cret",
            "remember": false,
        }));
    client.send(login).await.expect("Login should succeed");

    assert!(client.has_session());
    assert!(client.cookies().get("connect.sid").is_some());

    let response = client
        .send(ApiRequest::get("/users"))
        .await
        .expect("Authenticated list should succeed");

    assert_eq!(response.status, StatusCode::OK);

    let requests = stub.state().requests();
    let last = requests.last().expect("Stub should have recorded requests");
    assert_eq!(last.method, Method::GET);
    assert_eq!(last.path, "/users");
    assert!(last.has_cookie);
}

#[actix_web::test]
async fn test_clear_session_drops_cookie() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    client
        .send(ApiRequest::post("/login").body(json!({
            "type": "LOGIN",
            "username": "Katharina_Bernier",
            "password": "s3cret",
        })))
        .await
        .expect("Login should succeed");

    client.clear_session();

    let response = client
        .send(ApiRequest::get("/users").fail_on_status_code(false))
        .await
        .expect("Request should complete");

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_query_string_is_encoded() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    client
        .send(
            ApiRequest::get("/users/search")
                .query("q", "Norene39@yahoo.com")
                .fail_on_status_code(false),
        )
        .await
        .expect("Request should complete");

    let requests = stub.state().requests();
    let last = requests.last().expect("Stub should have recorded requests");
    assert_eq!(last.query, "q=Norene39%40yahoo.com");
}

#[actix_web::test]
async fn test_empty_body_decodes_to_null() {
    let (stub, _) = setup::stub().await;
    stub.state().override_response(
        Method::GET,
        "/users",
        StatusCode::NO_CONTENT,
        serde_json::Value::Null,
    );
    let mut client = ApiClient::new(&stub.config().api);

    let response = client
        .send(ApiRequest::get("/users"))
        .await
        .expect("Request should complete");

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());
}

#[actix_web::test]
async fn test_unreachable_service_is_a_request_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..ApiConfig::default()
    };
    let mut client = ApiClient::new(&config);

    let result = client.send(ApiRequest::get("/users")).await;

    assert!(matches!(result, Err(SuiteError::Request { .. })));
}

#[actix_web::test]
async fn test_body_over_limit_is_a_payload_error() {
    let (stub, _) = setup::stub().await;
    let config = ApiConfig {
        max_body_bytes: 8,
        ..stub.config().api
    };
    let mut client = ApiClient::new(&config);

    let result = client
        .send(ApiRequest::get("/users").fail_on_status_code(false))
        .await;

    match result {
        Err(SuiteError::Payload { method, .. }) => assert_eq!(method, Method::GET),
        other => panic!("expected a payload error, got {other:?}"),
    }
}

#[actix_web::test]
async fn test_expired_cookie_ends_session() {
    let (stub, _) = setup::stub().await;
    let mut client = ApiClient::new(&stub.config().api);

    client
        .send(ApiRequest::post("/login").body(json!({
            "type": "LOGIN",
            "username": "Katharina_Bernier",
            "password": "s3cret",
        })))
        .await
        .expect("Login should succeed");
    assert!(client.has_session());

    client
        .send(ApiRequest::post("/logout"))
        .await
        .expect("Logout should succeed");

    assert!(!client.has_session());
    assert!(client.cookies().get("connect.sid").is_none());
    assert_eq!(stub.state().session_count(), 0);

    let response = client
        .send(ApiRequest::get("/users").fail_on_status_code(false))
        .await
        .expect("Request should complete");

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
