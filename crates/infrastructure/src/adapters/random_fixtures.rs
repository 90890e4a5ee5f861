//! Random fixture source
//!
//! Draws a post id from the seeded range of the public service and builds
//! payloads whose title carries the creation time.

use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::Rng;
use restcheck_application::ports::{Clock, FixtureSource};
use restcheck_domain::{Payload, ResourceId};

use super::SystemClock;

/// Post ids that exist on the reference service.
pub const SEEDED_POST_IDS: RangeInclusive<u64> = 1..=100;

const POST_BODY: &str = "This is a test post created by the restcheck contract suite.";

/// Fixture source backed by the thread-local RNG and a clock.
pub struct RandomFixtures {
    clock: Arc<dyn Clock>,
    post_ids: RangeInclusive<u64>,
    user_id: u64,
}

impl RandomFixtures {
    /// Creates a fixture source using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Creates a fixture source using `clock` for payload timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            post_ids: SEEDED_POST_IDS,
            user_id: 1,
        }
    }

    /// Restricts drawn post ids to `ids`. An empty range falls back to
    /// its start.
    #[must_use]
    pub fn with_post_ids(mut self, ids: RangeInclusive<u64>) -> Self {
        self.post_ids = ids;
        self
    }
}

impl Default for RandomFixtures {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureSource for RandomFixtures {
    fn post_id(&self) -> ResourceId {
        let id = if self.post_ids.is_empty() {
            *self.post_ids.start()
        } else {
            rand::rng().random_range(self.post_ids.clone())
        };
        ResourceId::from(id)
    }

    fn post_payload(&self) -> Payload {
        let stamp = self.clock.now().format("%Y-%m-%d %H:%M:%S");
        Payload::new()
            .with("title", format!("Test Post {stamp}"))
            .with("body", POST_BODY)
            .with("userId", self.user_id)
    }
}
