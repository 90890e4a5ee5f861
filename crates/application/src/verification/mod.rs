//! Response verification
//!
//! Stateless predicates over already-fetched responses and records, plus
//! evidence capture for reports.

mod evidence;
mod verifier;

pub use evidence::capture_evidence;
pub use verifier::Verifier;
