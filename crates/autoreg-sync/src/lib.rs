//! Sync layer: the registration backend port and its HTTP implementation.

mod backend;
mod endpoints;
mod response;

pub use backend::{CheckReply, RegisterReply, RegistrationBackend, SyncError};
pub use endpoints::{EndpointTable, Endpoints};
pub use response::{is_truthy, message_field, parse_body, truthy_field};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpBackend;
