//! HTTP response domain types

mod envelope;

pub use envelope::ResponseEnvelope;
