use awc::http::StatusCode;

use super::{INVALID_USER_ID, ScenarioContext, USERS_PATH, user_path};
use crate::assertions;
use crate::client::ApiRequest;
use crate::error::SuiteResult;
use crate::requests::v1::user::UpdateUserRequest;
use crate::responses::v1::user::{UserListResponse, UserResponse};

pub async fn list_users(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let response = ctx.client.send(ApiRequest::get(USERS_PATH)).await?;

    assertions::status(&response, StatusCode::OK)?;

    let results = assertions::array(&response.body, "body", "results")?;

    assertions::len_greater_than(results, "results", 1)
}

pub async fn get_user(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let path = user_path(&ctx.targets.user_id);
    let response = ctx.client.send(ApiRequest::get(path)).await?;

    assertions::status(&response, StatusCode::OK)?;

    let envelope: UserResponse = response.json()?;

    assertions::property(&envelope.user, "user", "firstName")?;

    Ok(())
}

pub async fn get_invalid_user(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let request = ApiRequest::get(user_path(INVALID_USER_ID)).fail_on_status_code(false);
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::UNPROCESSABLE_ENTITY)
}

pub async fn get_profile(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let path = format!(
        "{}/profile/{}",
        USERS_PATH,
        urlencoding::encode(&ctx.targets.search_username)
    );
    let response = ctx.client.send(ApiRequest::get(path)).await?;

    assertions::status(&response, StatusCode::OK)?;

    let envelope: UserResponse = response.json()?;

    assertions::property(&envelope.user, "user", "avatar")?;

    Ok(())
}

pub async fn search_by_email(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let query = ctx.targets.email.clone();

    search(ctx, &query, "email").await
}

pub async fn search_by_phone_number(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let query = ctx.targets.phone_number.clone();

    search(ctx, &query, "firstName").await
}

pub async fn search_by_username(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let query = ctx.targets.search_username.clone();

    search(ctx, &query, "firstName").await
}

pub async fn update_user(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let payload = UpdateUserRequest::first_name(ctx.faker.first_name());
    let request = ApiRequest::patch(user_path(&ctx.targets.update_user_id)).json(&payload)?;
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::NO_CONTENT)
}

/// `GET /users/search?q=<query>`; results must be non-empty and the first
/// one must carry `key`
async fn search(ctx: &mut ScenarioContext<'_>, query: &str, key: &str) -> SuiteResult<()> {
    let request = ApiRequest::get(format!("{}/search", USERS_PATH)).query("q", query);
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::OK)?;

    let list: UserListResponse = response.json()?;

    let first = assertions::first(&list.results, "results")?;

    assertions::property(first, "results[0]", key)?;

    Ok(())
}
