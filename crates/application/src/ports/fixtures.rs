//! Fixture source port
//!
//! Every scenario draws its own identifiers and payloads so that scenarios
//! never share data against the shared remote collection.

use restcheck_domain::{Payload, ResourceId};

/// Supplies per-scenario test data.
pub trait FixtureSource: Send + Sync {
    /// Returns an existing post identifier.
    fn post_id(&self) -> ResourceId;

    /// Returns a fresh post payload (`title`, `body`, `userId`).
    fn post_payload(&self) -> Payload;
}
