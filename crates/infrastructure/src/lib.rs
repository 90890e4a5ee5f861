//! Restcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod report;
pub mod serialization;

pub use adapters::{RandomFixtures, ReqwestHttpClient, SystemClock, TransportOptions};
pub use config::{ConfigError, SuiteConfig};
pub use report::{FileEvidenceStore, FileFailureLog, ReportError};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
