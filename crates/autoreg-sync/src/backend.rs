use async_trait::async_trait;
use autoreg_core::{Role, RolePayload};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {message}")]
    Transport { message: String },
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid endpoint {url:?}: {message}")]
    InvalidEndpoint { url: String, message: String },
}

/// Outcome of an existence check that reached a 2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckReply {
    pub exists: bool,
}

/// Outcome of a registration call that reached a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterReply {
    pub success: bool,
    /// Backend-supplied diagnostic, if any.
    pub message: Option<String>,
}

/// Remote registration system for every role.
///
/// Non-2xx responses and transport failures are `Err`; a 2xx with an
/// unexpected body is an `Ok` reply with the flag unset.
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Ask whether `national_id` is already registered for `role`.
    async fn check(&self, role: Role, national_id: &str) -> Result<CheckReply, SyncError>;

    /// Register `payload` with its role's backend.
    async fn register(&self, payload: &RolePayload) -> Result<RegisterReply, SyncError>;
}
