use autoreg_core::Role;
use autoreg_store::StoreError;
use autoreg_sync::SyncError;
use thiserror::Error;

/// Why a run ended in `Error`. Kept for diagnostics; never retried.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("no cached user profile")]
    MissingProfile,

    #[error("national id not found in cached profile")]
    MissingNationalId,

    #[error("cached profile could not be read: {0}")]
    ProfileUnreadable(#[source] StoreError),

    #[error("existence check failed: {0}")]
    CheckFailed(#[source] SyncError),

    #[error("registration failed: {message}")]
    RegisterRejected { message: String },

    #[error("registration failed: {0}")]
    RegisterFailed(#[source] SyncError),

    #[error("registered, but the local flag could not be written: {0}")]
    FlagNotPersisted(#[source] StoreError),

    #[error("unmounted before the registration could be recorded")]
    Unmounted,
}

impl Failure {
    /// True for failures detected before any network call.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Failure::MissingProfile | Failure::MissingNationalId | Failure::ProfileUnreadable(_))
    }
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("reconciliation for {role} has already been started")]
    AlreadyStarted { role: Role },
}
