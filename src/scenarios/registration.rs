use awc::http::StatusCode;
use serde_json::json;

use super::{ScenarioContext, USERS_PATH};
use crate::assertions;
use crate::client::ApiRequest;
use crate::error::SuiteResult;
use crate::responses::v1::error::ValidationErrorResponse;

pub async fn register_user(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let payload = ctx.faker.registration();

    tracing::debug!(username = %payload.username, "Registering synthetic user");

    let request = ApiRequest::post(USERS_PATH).json(&payload)?;
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::CREATED)
}

/// A body made only of an unknown field fails validation exactly once
pub async fn register_invalid_key(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let request = ApiRequest::post(USERS_PATH)
        .body(json!({ "invalidKey": "Invalid" }))
        .fail_on_status_code(false);
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::UNPROCESSABLE_ENTITY)?;

    let body: ValidationErrorResponse = response.json()?;

    assertions::len_eq(&body.errors, "errors", 1)
}
