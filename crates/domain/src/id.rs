//! ID generation utilities.

use uuid::Uuid;

/// Generates a new time-ordered UUID v7.
///
/// Used for evidence artifacts and suite runs.
#[must_use]
pub fn generate_id() -> Uuid {
    Uuid::now_v7()
}
