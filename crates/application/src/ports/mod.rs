//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod fixtures;
mod http_client;
mod sinks;

pub use clock::Clock;
pub use fixtures::FixtureSource;
pub use http_client::{HttpClient, HttpClientError};
pub use sinks::{EvidenceSink, FailureSink, SinkError};
