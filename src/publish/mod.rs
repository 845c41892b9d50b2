//! Publishing to the feed endpoint.

pub mod listener;
pub mod publisher;
pub mod request;
pub mod response;

pub use listener::PublishListener;
pub use publisher::{Publisher, MAX_REAUTHORIZATIONS};
pub use request::PublishRequest;
pub use response::{parse_response, GraphApiError};
