//! Scenario catalog
//!
//! The posts and users scenarios, each with its metadata record. A scenario
//! issues one call through the client and verifies the result step by step.

mod posts;
mod users;

use std::fmt;
use std::str::FromStr;

use restcheck_domain::{
    Check, CheckResult, FieldSpec, Operation, Resource, ResponseEnvelope, ScenarioMetadata,
    ServiceConventions, Severity,
};
use serde_json::Value;

use crate::client::ResourceClient;
use crate::error::ApplicationResult;
use crate::ports::{FixtureSource, HttpClient};
use crate::report::ScenarioReport;
use crate::verification::Verifier;

const EPIC: &str = "API Testing";

const API: &[&str] = &["api"];
const SMOKE: &[&str] = &["api", "smoke"];
const REGRESSION: &[&str] = &["api", "regression"];

/// Everything a scenario needs while it runs.
pub struct ScenarioContext<'a, C: HttpClient> {
    client: &'a ResourceClient<C>,
    fixtures: &'a dyn FixtureSource,
    conventions: &'a ServiceConventions,
    verifier: Verifier,
    report: ScenarioReport,
}

impl<'a, C: HttpClient> ScenarioContext<'a, C> {
    /// Creates a context with an empty report.
    pub fn new(
        client: &'a ResourceClient<C>,
        fixtures: &'a dyn FixtureSource,
        conventions: &'a ServiceConventions,
        verifier: Verifier,
    ) -> Self {
        Self {
            client,
            fixtures,
            conventions,
            verifier,
            report: ScenarioReport::new(),
        }
    }

    /// Consumes the context, returning the report built so far.
    pub fn into_report(self) -> ScenarioReport {
        self.report
    }

    /// Checks the status against the service convention for `operation`.
    fn verify_success(
        &mut self,
        response: &ResponseEnvelope,
        operation: Operation,
    ) -> ApplicationResult<()> {
        let expected = self.conventions.expected_for(operation);
        let mut step = self.report.step("Verify successful response");
        step.check(self.verifier.verify_status(response, expected))?;
        Ok(())
    }

    /// Parses the body. A malformed body ends the scenario as a domain error.
    fn parse_json(&mut self, response: &ResponseEnvelope) -> ApplicationResult<Value> {
        let mut step = self.report.step("Parse response JSON");
        match response.json() {
            Ok(body) => {
                step.record(CheckResult::pass(Check::JsonBody));
                Ok(body)
            }
            Err(error) => {
                step.record(CheckResult::fail_with_value(
                    Check::JsonBody,
                    response.body_preview(),
                    error.to_string(),
                ));
                Err(error.into())
            }
        }
    }

    /// Shared flow of the list scenarios: status, non-empty sequence,
    /// fields of the first element, sample of the first two.
    async fn verify_listing(
        &mut self,
        resource: &Resource,
        noun: &str,
        fields: &[&str],
        sample_label: &str,
    ) -> ApplicationResult<()> {
        let response = {
            let _step = self
                .report
                .step(format!("Send GET request to /{resource} endpoint"));
            self.client.list(resource).await?
        };
        self.verify_success(&response, Operation::List)?;
        let body = self.parse_json(&response)?;

        {
            let mut step = self.report.step("Verify response is a non-empty list");
            step.check(self.verifier.verify_sequence(&body))?;
        }
        {
            let mut step = self
                .report
                .step(format!("Verify {noun} has expected fields"));
            step.check(
                self.verifier
                    .verify_fields_present(&body[0], &FieldSpec::all(fields)),
            )?;
        }
        {
            let mut step = self.report.step("Sample data from response");
            let sample: Vec<&Value> = body
                .as_array()
                .map(|items| items.iter().take(2).collect())
                .unwrap_or_default();
            step.capture(&sample, sample_label);
        }
        Ok(())
    }
}

/// Every scenario in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// List posts.
    GetAllPosts,
    /// Read one post.
    GetPostById,
    /// Create a post.
    CreatePost,
    /// Replace a post.
    UpdatePost,
    /// Delete a post.
    DeletePost,
    /// List users.
    GetAllUsers,
    /// Read one user.
    GetUserById,
    /// Nested company object of a user.
    UserCompanyInfo,
    /// Nested address and geo objects of a user.
    UserAddress,
}

impl Scenario {
    /// Returns the whole catalog in execution order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GetAllPosts,
            Self::GetPostById,
            Self::CreatePost,
            Self::UpdatePost,
            Self::DeletePost,
            Self::GetAllUsers,
            Self::GetUserById,
            Self::UserCompanyInfo,
            Self::UserAddress,
        ]
    }

    /// Short name, e.g. `get_all_posts`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetAllPosts => "get_all_posts",
            Self::GetPostById => "get_post_by_id",
            Self::CreatePost => "create_post",
            Self::UpdatePost => "update_post",
            Self::DeletePost => "delete_post",
            Self::GetAllUsers => "get_all_users",
            Self::GetUserById => "get_user_by_id",
            Self::UserCompanyInfo => "user_company_info",
            Self::UserAddress => "user_address",
        }
    }

    /// Name of the collection the scenario exercises.
    #[must_use]
    pub const fn suite(self) -> &'static str {
        match self {
            Self::GetAllPosts
            | Self::GetPostById
            | Self::CreatePost
            | Self::UpdatePost
            | Self::DeletePost => "posts",
            Self::GetAllUsers | Self::GetUserById | Self::UserCompanyInfo | Self::UserAddress => {
                "users"
            }
        }
    }

    /// Identifier used in failure logs, e.g. `posts::get_all_posts`.
    #[must_use]
    pub fn identifier(self) -> String {
        format!("{}::{}", self.suite(), self.name())
    }

    /// Metadata record for reporting.
    #[must_use]
    pub fn metadata(self) -> ScenarioMetadata {
        let (story, severity, tags) = match self {
            Self::GetAllPosts => ("Get all posts", Severity::Critical, SMOKE),
            Self::GetPostById => ("Get a specific post", Severity::Normal, API),
            Self::CreatePost => ("Create a new post", Severity::Critical, REGRESSION),
            Self::UpdatePost => ("Update an existing post", Severity::Normal, API),
            Self::DeletePost => ("Delete a post", Severity::Normal, API),
            Self::GetAllUsers => ("Get all users", Severity::Critical, SMOKE),
            Self::GetUserById => ("Get a specific user", Severity::Normal, API),
            Self::UserCompanyInfo => ("Verify user company info", Severity::Minor, API),
            Self::UserAddress => ("Verify user address", Severity::Minor, API),
        };
        let feature = match self.suite() {
            "posts" => "Posts API",
            _ => "Users API",
        };
        ScenarioMetadata {
            epic: EPIC.to_string(),
            feature: feature.to_string(),
            story: story.to_string(),
            severity,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Runs the scenario.
    ///
    /// # Errors
    ///
    /// Returns the first unmet expectation, transport failure or malformed
    /// body. The context's report holds every step up to that point.
    pub async fn run<C: HttpClient>(self, ctx: &mut ScenarioContext<'_, C>) -> ApplicationResult<()> {
        match self {
            Self::GetAllPosts => posts::get_all_posts(ctx).await,
            Self::GetPostById => posts::get_post_by_id(ctx).await,
            Self::CreatePost => posts::create_post(ctx).await,
            Self::UpdatePost => posts::update_post(ctx).await,
            Self::DeletePost => posts::delete_post(ctx).await,
            Self::GetAllUsers => users::get_all_users(ctx).await,
            Self::GetUserById => users::get_user_by_id(ctx).await,
            Self::UserCompanyInfo => users::user_company_info(ctx).await,
            Self::UserAddress => users::user_address(ctx).await,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

/// Error for an unknown scenario name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    /// Accepts either the short name or the full identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|scenario| scenario.name() == wanted || scenario.identifier() == wanted)
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}
