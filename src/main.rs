use anyhow::Context;
use users_api_suite::{Fixtures, Runner, config, logging};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("Failed to load configuration")?;

    logging::init(&config.observability).context("Failed to initialize logging")?;

    let fixtures = Fixtures::load(&config.fixtures.path).await?;
    let runner = Runner::new(config, &fixtures)?;
    let report = runner.run().await;

    for failure in report.failures() {
        if let Some(error) = &failure.error {
            tracing::error!(scenario = %failure.scenario, "{error}");
        }
    }

    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        "Finished {}",
        report.name
    );

    if !report.is_success() {
        anyhow::bail!("{report}");
    }

    Ok(())
}
