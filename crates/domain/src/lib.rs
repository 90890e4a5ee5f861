//! Restcheck Domain - Core contract-verification types
//!
//! This crate defines the domain model for verifying CRUD-style REST
//! services: resources, requests, response envelopes, expectations,
//! checks, evidence and scenario records.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod evidence;
pub mod expectation;
pub mod id;
pub mod request;
pub mod resource;
pub mod response;
pub mod scenario;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use evidence::{EvidenceArtifact, JSON_MEDIA_TYPE};
pub use expectation::{
    BodyShape, Expectation, FieldPath, FieldSpec, Operation, ServiceConventions, StatusExpectation,
};
pub use id::generate_id;
pub use request::{HttpMethod, Payload, RequestSpec};
pub use resource::{Resource, ResourceId, ServiceEndpoint};
pub use response::ResponseEnvelope;
pub use scenario::{
    ScenarioMetadata, ScenarioOutcome, ScenarioStatus, Severity, StepRecord, StepStatus,
    SuiteSummary,
};
pub use testing::{Check, CheckResult, Verdict, VerificationFailure};
