//! Port adapters.

mod random_fixtures;
mod reqwest_client;
mod system_clock;

pub use random_fixtures::RandomFixtures;
pub use reqwest_client::{DEFAULT_USER_AGENT, ReqwestHttpClient, TransportOptions};
pub use system_clock::SystemClock;
