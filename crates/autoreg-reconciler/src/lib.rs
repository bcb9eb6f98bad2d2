//! Registration reconciler: brings a locally cached profile into agreement
//! with a role's remote registration system.

mod error;
mod reconciler;

pub use error::{Failure, ReconcileError};
pub use reconciler::{CheckFailurePolicy, Outcome, Reconciler};

pub use autoreg_core::{ReconciliationStatus, Role};
