//! HTTP request domain types

mod method;
mod payload;
mod spec;

pub use method::HttpMethod;
pub use payload::Payload;
pub use spec::RequestSpec;
