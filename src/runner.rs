use std::fmt;
use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::auth::{ApiLogin, Authenticator, Credentials};
use crate::client::ApiClient;
use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};
use crate::faker::Faker;
use crate::fixtures::{Fixtures, Targets};
use crate::scenarios::{Scenario, ScenarioContext};

/// Result of a single scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub duration: Duration,
    pub error: Option<SuiteError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything a run produced, in execution order
#[derive(Debug)]
pub struct SuiteReport {
    pub name: String,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True when every scenario that ran passed; an empty run is not a success
    pub fn is_success(&self) -> bool {
        !self.outcomes.is_empty() && self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn outcome(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.scenario == scenario)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;

        for outcome in &self.outcomes {
            let mark = if outcome.passed() { "ok" } else { "FAILED" };
            writeln!(f, "  [{mark}] {} ({:?})", outcome.scenario, outcome.duration)?;

            if let Some(error) = &outcome.error {
                writeln!(f, "         {error}")?;
            }
        }

        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

/// Runs scenarios one after another against the configured service
///
/// Every scenario gets its own client, so no session leaks from one scenario
/// into the next. Scenarios that require it are preceded by a login, and a
/// failed login fails the scenario.
pub struct Runner<A = ApiLogin> {
    config: SuiteConfig,
    targets: Targets,
    authenticator: A,
}

impl Runner<ApiLogin> {
    pub fn new(config: SuiteConfig, fixtures: &Fixtures) -> SuiteResult<Self> {
        let authenticator = ApiLogin::new(&config.auth);

        Self::with_authenticator(config, fixtures, authenticator)
    }
}

impl<A: Authenticator> Runner<A> {
    pub fn with_authenticator(
        config: SuiteConfig,
        fixtures: &Fixtures,
        authenticator: A,
    ) -> SuiteResult<Self> {
        Ok(Self {
            targets: fixtures.targets()?,
            config,
            authenticator,
        })
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Scenarios left after applying the configured filter, in declaration order
    pub fn selected(&self) -> Vec<Scenario> {
        Scenario::all()
            .iter()
            .copied()
            .filter(|scenario| match &self.config.runner.filter {
                Some(filter) => scenario.matches(filter),
                None => true,
            })
            .collect()
    }

    pub async fn run(&self) -> SuiteReport {
        self.run_with(&mut Faker::new()).await
    }

    pub async fn run_with(&self, faker: &mut Faker) -> SuiteReport {
        let scenarios = self.selected();
        let mut outcomes = Vec::with_capacity(scenarios.len());

        tracing::info!(
            suite = %self.config.app.name,
            base_url = %self.config.api.base(),
            "Running {} scenarios",
            scenarios.len()
        );

        for scenario in scenarios {
            let outcome = self.run_one(scenario, faker).await;
            let failed = !outcome.passed();

            outcomes.push(outcome);

            if failed && self.config.runner.fail_fast {
                tracing::warn!("Stopping after first failure");
                break;
            }
        }

        SuiteReport {
            name: self.config.app.name.clone(),
            outcomes,
        }
    }

    pub async fn run_one(&self, scenario: Scenario, faker: &mut Faker) -> ScenarioOutcome {
        let span = tracing::info_span!(
            "scenario",
            group = scenario.group(),
            name = scenario.name()
        );

        async move {
            let start = Instant::now();
            let result = self.execute(scenario, faker).await;
            let duration = start.elapsed();

            match &result {
                Ok(()) => tracing::info!("Passed in {:?}", duration),
                Err(e) => tracing::error!(error = %e, "Failed in {:?}", duration),
            }

            ScenarioOutcome {
                scenario,
                duration,
                error: result.err(),
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, scenario: Scenario, faker: &mut Faker) -> SuiteResult<()> {
        let mut client = ApiClient::new(&self.config.api);

        if scenario.requires_login() {
            let credentials = Credentials::for_user(&self.targets.login_username, &self.config.auth);

            self.authenticator.login(&mut client, &credentials).await?;
        }

        let mut ctx = ScenarioContext {
            client,
            targets: &self.targets,
            faker,
        };

        scenario.run(&mut ctx).await
    }
}
