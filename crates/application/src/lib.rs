//! Restcheck Application - Use cases, ports and verification
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for transport, fixtures, clock and sinks)
//! - The resource client and the verification toolkit
//! - The scenario catalog and the suite runner
//! - Application-level error handling

pub mod client;
pub mod error;
pub mod ports;
pub mod report;
pub mod scenarios;
pub mod use_cases;
pub mod verification;

pub use client::ResourceClient;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    Clock, EvidenceSink, FailureSink, FixtureSource, HttpClient, HttpClientError, SinkError,
};
pub use report::{ScenarioReport, Step};
pub use scenarios::{Scenario, ScenarioContext, UnknownScenario};
pub use use_cases::RunSuite;
pub use verification::{Verifier, capture_evidence};
