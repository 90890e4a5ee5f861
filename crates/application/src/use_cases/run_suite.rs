//! Run suite use case.

use std::sync::Arc;
use std::time::Instant;

use restcheck_domain::{ScenarioOutcome, ScenarioStatus, ServiceConventions, SuiteSummary};

use crate::client::ResourceClient;
use crate::ports::{EvidenceSink, FailureSink, FixtureSource, HttpClient};
use crate::scenarios::{Scenario, ScenarioContext};
use crate::verification::Verifier;

/// Use case for running scenarios against one service.
///
/// Scenarios run one after another. A failing scenario never stops the
/// run; its outcome is handed to the failure sinks and the next one starts.
pub struct RunSuite<C: HttpClient> {
    client: ResourceClient<C>,
    fixtures: Arc<dyn FixtureSource>,
    conventions: ServiceConventions,
    verifier: Verifier,
    failure_sinks: Vec<Arc<dyn FailureSink>>,
    evidence_sinks: Vec<Arc<dyn EvidenceSink>>,
}

impl<C: HttpClient> RunSuite<C> {
    /// Creates a new `RunSuite` use case with default conventions and no sinks.
    #[must_use]
    pub fn new(client: ResourceClient<C>, fixtures: Arc<dyn FixtureSource>) -> Self {
        Self {
            client,
            fixtures,
            conventions: ServiceConventions::default(),
            verifier: Verifier::new(),
            failure_sinks: Vec::new(),
            evidence_sinks: Vec::new(),
        }
    }

    /// Replaces the per-operation success statuses.
    #[must_use]
    pub fn with_conventions(mut self, conventions: ServiceConventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Adds a sink that receives every failed scenario.
    #[must_use]
    pub fn with_failure_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.failure_sinks.push(sink);
        self
    }

    /// Adds a sink that receives the evidence of every scenario.
    #[must_use]
    pub fn with_evidence_sink(mut self, sink: Arc<dyn EvidenceSink>) -> Self {
        self.evidence_sinks.push(sink);
        self
    }

    /// Runs `scenarios` in order and summarises the run.
    pub async fn execute(&self, scenarios: &[Scenario]) -> SuiteSummary {
        let started = Instant::now();
        tracing::info!(
            scenarios = scenarios.len(),
            base_url = %self.client.endpoint(),
            "starting suite"
        );

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let outcome = self.run_scenario(*scenario).await;
            self.publish(&outcome).await;
            outcomes.push(outcome);
        }

        let summary = SuiteSummary::new(outcomes, elapsed_ms(started));
        tracing::info!(
            run_id = %summary.run_id,
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            duration_ms = summary.duration_ms,
            "suite finished"
        );
        summary
    }

    /// Runs one scenario. Every error becomes a failed outcome.
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioOutcome {
        let identifier = scenario.identifier();
        tracing::info!(scenario = %identifier, "scenario started");
        let started = Instant::now();

        let mut ctx = ScenarioContext::new(
            &self.client,
            self.fixtures.as_ref(),
            &self.conventions,
            self.verifier,
        );
        let result = scenario.run(&mut ctx).await;
        let steps = ctx.into_report().into_steps();
        let duration_ms = elapsed_ms(started);

        let (status, failure) = match result {
            Ok(()) => {
                tracing::info!(scenario = %identifier, duration_ms, "scenario passed");
                (ScenarioStatus::Passed, None)
            }
            Err(error) => {
                tracing::warn!(scenario = %identifier, duration_ms, %error, "scenario failed");
                (ScenarioStatus::Failed, Some(error.to_string()))
            }
        };

        ScenarioOutcome {
            identifier,
            metadata: scenario.metadata(),
            status,
            failure,
            steps,
            duration_ms,
        }
    }

    async fn publish(&self, outcome: &ScenarioOutcome) {
        for sink in &self.evidence_sinks {
            if let Err(error) = sink.store(outcome).await {
                tracing::error!(scenario = %outcome.identifier, %error, "failed to store evidence");
            }
        }
        if outcome.passed() {
            return;
        }
        for sink in &self.failure_sinks {
            if let Err(error) = sink.record_failure(outcome).await {
                tracing::error!(scenario = %outcome.identifier, %error, "failed to record failure");
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::{HttpClientError, SinkError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use restcheck_domain::{
        HttpMethod, Payload, RequestSpec, ResourceId, ResponseEnvelope, ServiceEndpoint,
        StepStatus,
    };
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "http://api.test";

    fn user(id: u64) -> Value {
        json!({
            "id": id,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": {"lat": "-37.3159", "lng": "81.1496"}
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        })
    }

    fn post(id: u64) -> Value {
        json!({"userId": 1, "id": id, "title": "sunt aut facere", "body": "quia et suscipit"})
    }

    /// In-memory service shaped like JSONPlaceholder.
    struct StubService {
        delete_status: u16,
        empty_lists: bool,
    }

    impl StubService {
        const fn new() -> Self {
            Self {
                delete_status: 200,
                empty_lists: false,
            }
        }

        fn respond(&self, request: &RequestSpec) -> (u16, Value) {
            let path = request.url.trim_start_matches(BASE);
            let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
            let id = segments.get(1).and_then(|s| s.parse::<u64>().ok());
            let echo = |id: u64| {
                let mut body = request.body.as_ref().map_or(json!({}), Payload::to_value);
                body["id"] = json!(id);
                body
            };
            match (request.method, segments[0], id) {
                (HttpMethod::Get, "posts", None) if self.empty_lists => (200, json!([])),
                (HttpMethod::Get, "users", None) if self.empty_lists => (200, json!([])),
                (HttpMethod::Get, "posts", None) => (200, json!([post(1), post(2), post(3)])),
                (HttpMethod::Get, "users", None) => (200, json!([user(1), user(2)])),
                (HttpMethod::Get, "posts", Some(id)) => (200, post(id)),
                (HttpMethod::Get, "users", Some(id)) => (200, user(id)),
                (HttpMethod::Post, "posts", None) => (201, echo(101)),
                (HttpMethod::Put, "posts", Some(id)) => (200, echo(id)),
                (HttpMethod::Delete, "posts", Some(_)) => (self.delete_status, json!({})),
                _ => (404, json!({})),
            }
        }
    }

    #[async_trait]
    impl HttpClient for StubService {
        async fn execute(
            &self,
            request: &RequestSpec,
        ) -> Result<ResponseEnvelope, HttpClientError> {
            let (status, body) = self.respond(request);
            Ok(ResponseEnvelope::new(
                status,
                vec![("Content-Type".to_string(), "application/json".to_string())],
                body.to_string().as_bytes(),
                Duration::from_millis(3),
            ))
        }
    }

    struct Unreachable;

    #[async_trait]
    impl HttpClient for Unreachable {
        async fn execute(&self, _: &RequestSpec) -> Result<ResponseEnvelope, HttpClientError> {
            Err(HttpClientError::Timeout { timeout_ms: 50 })
        }
    }

    struct FixedFixtures;

    impl FixtureSource for FixedFixtures {
        fn post_id(&self) -> ResourceId {
            ResourceId::from(7_u64)
        }

        fn post_payload(&self) -> Payload {
            Payload::new()
                .with("title", "Test Post 2026-10-19 12:00:00")
                .with("body", "Created by the contract suite.")
                .with("userId", 1)
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        failures: Mutex<Vec<String>>,
        evidence: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FailureSink for CollectingSink {
        async fn record_failure(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError> {
            self.failures
                .lock()
                .expect("lock")
                .push(outcome.identifier.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl EvidenceSink for CollectingSink {
        async fn store(&self, outcome: &ScenarioOutcome) -> Result<(), SinkError> {
            let mut evidence = self.evidence.lock().expect("lock");
            evidence.extend(outcome.attachments().map(|a| a.label.clone()));
            Ok(())
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl FailureSink for BrokenSink {
        async fn record_failure(&self, _: &ScenarioOutcome) -> Result<(), SinkError> {
            Err(SinkError::Serialization("disk full".to_string()))
        }
    }

    fn suite<C: HttpClient>(http: C) -> RunSuite<C> {
        let endpoint = ServiceEndpoint::parse(BASE).unwrap();
        RunSuite::new(
            ResourceClient::new(Arc::new(http), endpoint),
            Arc::new(FixedFixtures),
        )
    }

    #[tokio::test]
    async fn test_full_catalog_passes_against_conforming_service() {
        let sink = Arc::new(CollectingSink::default());
        let summary = suite(StubService::new())
            .with_failure_sink(sink.clone())
            .with_evidence_sink(sink.clone())
            .execute(Scenario::all())
            .await;

        let failures: Vec<_> = summary
            .failures()
            .map(|o| (o.identifier.clone(), o.failure.clone()))
            .collect();
        assert_eq!(failures, Vec::new());
        assert_eq!(summary.total, 9);
        assert!(summary.all_passed());
        assert!(sink.failures.lock().unwrap().is_empty());
        assert_eq!(
            *sink.evidence.lock().unwrap(),
            vec![
                "Sample Posts",
                "Post 7",
                "Created Post",
                "Updated Post 7",
                "Sample Users",
                "User 1",
                "Company Info for User 2",
                "Address Info for User 3",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_returning_204_fails_under_default_conventions() {
        let sink = Arc::new(CollectingSink::default());
        let stub = StubService {
            delete_status: 204,
            ..StubService::new()
        };
        let summary = suite(stub)
            .with_failure_sink(sink.clone())
            .execute(&[Scenario::DeletePost, Scenario::GetAllUsers])
            .await;

        assert_eq!(summary.failed, 1);
        let outcome = &summary.outcomes[0];
        assert_eq!(outcome.status, ScenarioStatus::Failed);
        assert_eq!(
            outcome.failure.as_deref(),
            Some("verification failed: Expected status code 200, but got 204")
        );
        assert_eq!(
            outcome.steps.last().map(|s| (s.title.as_str(), s.status)),
            Some(("Verify successful deletion.", StepStatus::Failed))
        );
        assert!(summary.outcomes[1].passed());
        assert_eq!(
            *sink.failures.lock().unwrap(),
            vec!["posts::delete_post".to_string()]
        );
    }

    #[tokio::test]
    async fn test_delete_convention_can_be_overridden() {
        let stub = StubService {
            delete_status: 204,
            ..StubService::new()
        };
        let conventions =
            ServiceConventions::default().with(restcheck_domain::Operation::Delete, 204);
        let summary = suite(stub)
            .with_conventions(conventions)
            .execute(&[Scenario::DeletePost])
            .await;
        assert!(summary.all_passed());
    }

    #[tokio::test]
    async fn test_empty_listing_fails_before_field_checks() {
        let stub = StubService {
            empty_lists: true,
            ..StubService::new()
        };
        let outcome = suite(stub).run_scenario(Scenario::GetAllPosts).await;

        assert!(!outcome.passed());
        let titles: Vec<_> = outcome.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Send GET request to /posts endpoint",
                "Verify successful response",
                "Parse response JSON",
                "Verify response is a non-empty list",
            ]
        );
        assert_eq!(outcome.attachments().count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_fails_every_scenario_without_stopping() {
        let sink = Arc::new(CollectingSink::default());
        let summary = suite(Unreachable)
            .with_failure_sink(sink.clone())
            .execute(&[Scenario::GetAllPosts, Scenario::UserAddress])
            .await;

        assert_eq!(summary.failed, 2);
        assert_eq!(
            summary.outcomes[0].failure.as_deref(),
            Some("HTTP error: request timed out after 50 ms")
        );
        assert_eq!(sink.failures.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sink_errors_do_not_abort_the_run() {
        let summary = suite(Unreachable)
            .with_failure_sink(Arc::new(BrokenSink))
            .execute(&[Scenario::GetAllPosts, Scenario::GetAllUsers])
            .await;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 2);
    }

    #[tokio::test]
    async fn test_metadata_travels_with_outcome() {
        let outcome = suite(StubService::new())
            .run_scenario(Scenario::CreatePost)
            .await;
        assert!(outcome.passed());
        assert_eq!(outcome.identifier, "posts::create_post");
        assert_eq!(outcome.metadata.story, "Create a new post");
        assert!(outcome.metadata.has_tag("regression"));
    }
}
