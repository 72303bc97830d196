//! Each scenario against a conforming stub, then against one that breaks the
//! contract the scenario checks

use actix_web::http::{Method, StatusCode};
use serde_json::{Value, json};
use users_api_suite::testing::{StubServer, setup};
use users_api_suite::{Faker, Fixtures, Runner, Scenario, ScenarioOutcome};

async fn run(stub: &StubServer, fixtures: &Fixtures, scenario: Scenario) -> ScenarioOutcome {
    let runner = Runner::new(stub.config(), fixtures).expect("Fixtures should yield targets");

    runner.run_one(scenario, &mut Faker::seeded(11)).await
}

async fn assert_fails_with(
    scenario: Scenario,
    method: Method,
    route: &str,
    status: StatusCode,
    body: Value,
) {
    let (stub, fixtures) = setup::stub().await;
    stub.state().override_response(method, route, status, body);

    let outcome = run(&stub, &fixtures, scenario).await;

    assert!(!outcome.passed(), "{scenario} should fail against a broken service");
}

// =============================================================================
// CONFORMING SERVICE
// =============================================================================

#[actix_web::test]
async fn test_every_scenario_passes_against_conforming_service() {
    let (stub, fixtures) = setup::stub().await;

    for scenario in Scenario::all() {
        let outcome = run(&stub, &fixtures, *scenario).await;

        assert!(
            outcome.passed(),
            "{scenario} failed: {:?}",
            outcome.error.map(|e| e.to_string())
        );
    }
}

#[actix_web::test]
async fn test_update_user_changes_target_first_name() {
    let (stub, fixtures) = setup::stub().await;
    let targets = fixtures.targets().unwrap();
    let before = stub.state().user(&targets.update_user_id).unwrap();

    let outcome = run(&stub, &fixtures, Scenario::UpdateUser).await;
    assert!(outcome.passed());

    let after = stub.state().user(&targets.update_user_id).unwrap();
    assert!(after.modified_at > before.modified_at);
    assert_eq!(after.last_name, before.last_name);
}

#[actix_web::test]
async fn test_register_user_creates_a_user() {
    let (stub, fixtures) = setup::stub().await;
    let count = stub.state().user_count();

    let outcome = run(&stub, &fixtures, Scenario::RegisterUser).await;
    assert!(outcome.passed());

    assert_eq!(stub.state().user_count(), count + 1);

    let expected = Faker::seeded(11).registration();
    assert!(stub.state().find_by_username(&expected.username).is_some());
}

#[actix_web::test]
async fn test_register_invalid_key_does_not_create_a_user() {
    let (stub, fixtures) = setup::stub().await;
    let count = stub.state().user_count();

    let outcome = run(&stub, &fixtures, Scenario::RegisterInvalidKey).await;
    assert!(outcome.passed());

    assert_eq!(stub.state().user_count(), count);
}

#[actix_web::test]
async fn test_search_sends_fixture_values() {
    let (stub, fixtures) = setup::stub().await;

    run(&stub, &fixtures, Scenario::SearchByPhoneNumber).await;

    let query = stub
        .state()
        .requests()
        .into_iter()
        .find(|request| request.path == "/users/search")
        .map(|request| request.query)
        .expect("Search should have been sent");

    assert_eq!(query, format!("q={}", fixtures.users[1].phone_number));
}

// =============================================================================
// BROKEN SERVICE
// =============================================================================

#[actix_web::test]
async fn test_list_users_fails_with_single_result() {
    assert_fails_with(
        Scenario::ListUsers,
        Method::GET,
        "/users",
        StatusCode::OK,
        json!({ "results": [{ "firstName": "Edgar" }] }),
    )
    .await;
}

#[actix_web::test]
async fn test_get_user_fails_without_first_name() {
    assert_fails_with(
        Scenario::GetUser,
        Method::GET,
        "/users/{id}",
        StatusCode::OK,
        json!({ "user": { "lastName": "Johns" } }),
    )
    .await;
}

#[actix_web::test]
async fn test_get_invalid_user_fails_on_not_found() {
    assert_fails_with(
        Scenario::GetInvalidUser,
        Method::GET,
        "/users/{id}",
        StatusCode::NOT_FOUND,
        json!({ "error": "User not found" }),
    )
    .await;
}

#[actix_web::test]
async fn test_get_profile_fails_without_avatar() {
    assert_fails_with(
        Scenario::GetProfile,
        Method::GET,
        "/users/profile/{username}",
        StatusCode::OK,
        json!({ "user": { "firstName": "Arely" } }),
    )
    .await;
}

#[actix_web::test]
async fn test_search_by_email_fails_on_empty_results() {
    assert_fails_with(
        Scenario::SearchByEmail,
        Method::GET,
        "/users/search",
        StatusCode::OK,
        json!({ "results": [] }),
    )
    .await;
}

#[actix_web::test]
async fn test_search_by_phone_number_fails_without_first_name() {
    assert_fails_with(
        Scenario::SearchByPhoneNumber,
        Method::GET,
        "/users/search",
        StatusCode::OK,
        json!({ "results": [{ "email": "Aniya_Powlowski36@hotmail.com" }] }),
    )
    .await;
}

#[actix_web::test]
async fn test_update_user_fails_on_ok_instead_of_no_content() {
    assert_fails_with(
        Scenario::UpdateUser,
        Method::PATCH,
        "/users/{id}",
        StatusCode::OK,
        json!({}),
    )
    .await;
}

#[actix_web::test]
async fn test_register_user_fails_on_ok_instead_of_created() {
    assert_fails_with(
        Scenario::RegisterUser,
        Method::POST,
        "/users",
        StatusCode::OK,
        json!({ "user": {} }),
    )
    .await;
}

#[actix_web::test]
async fn test_register_invalid_key_fails_on_two_errors() {
    assert_fails_with(
        Scenario::RegisterInvalidKey,
        Method::POST,
        "/users",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "errors": [{ "msg": "a" }, { "msg": "b" }] }),
    )
    .await;
}

#[actix_web::test]
async fn test_unauthenticated_list_fails_without_error_field() {
    assert_fails_with(
        Scenario::ListUsersUnauthenticated,
        Method::GET,
        "/users",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "nope" }),
    )
    .await;
}

#[actix_web::test]
async fn test_failure_is_reported_as_assertion() {
    let (stub, fixtures) = setup::stub().await;
    stub.state().override_response(
        Method::GET,
        "/users",
        StatusCode::OK,
        json!({ "results": [] }),
    );

    let outcome = run(&stub, &fixtures, Scenario::ListUsers).await;
    let error = outcome.error.expect("Scenario should fail");

    assert!(error.is_assertion());
    assert!(error.to_string().contains("more than 1"));
}
