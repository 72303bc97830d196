use awc::http::StatusCode;

use super::{ScenarioContext, USERS_PATH};
use crate::assertions;
use crate::client::ApiRequest;
use crate::error::SuiteResult;

pub async fn list_users(ctx: &mut ScenarioContext<'_>) -> SuiteResult<()> {
    let request = ApiRequest::get(USERS_PATH).fail_on_status_code(false);
    let response = ctx.client.send(request).await?;

    assertions::status(&response, StatusCode::UNAUTHORIZED)?;
    assertions::property(&response.body, "body", "error")?;

    Ok(())
}
