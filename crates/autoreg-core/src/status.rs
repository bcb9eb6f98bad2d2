//! Reconciliation status as observed by the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a reconciliation run currently stands.
///
/// ```text
/// Checking ──▶ Exists
///    │  └────▶ Error
///    ▼
/// Registering ──▶ Registered
///            └──▶ Error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconciliationStatus {
    /// Initial state; existence check in flight.
    #[default]
    Checking,
    /// Remote already has a record for this national id.
    Exists,
    /// Existence not confirmed; registration call in flight.
    Registering,
    /// Registration confirmed and flag persisted.
    Registered,
    /// Terminal failure. No retry within the run.
    Error,
}

impl ReconciliationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Exists => "exists",
            Self::Registering => "registering",
            Self::Registered => "registered",
            Self::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exists | Self::Registered | Self::Error)
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Exists | Self::Registered)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Checking, Self::Exists | Self::Registering | Self::Error)
                | (Self::Registering, Self::Registered | Self::Error)
        )
    }
}

impl fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
