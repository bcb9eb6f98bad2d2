//! Registration programs the reconciler can register a citizen with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the registration programs with its own backend.
///
/// Each role owns a check/register endpoint pair and a payload shape. The set
/// is closed: adding a program means adding a variant, and the exhaustive
/// matches below then force every per-role table to be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Entrepreneurship expo. The baseline role.
    #[default]
    Expo,
    /// Youth pitch competition.
    Ypc,
    /// Ambassador program.
    Ambassador,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Expo, Role::Ypc, Role::Ambassador];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Expo => "expo",
            Role::Ypc => "ypc",
            Role::Ambassador => "ambassador",
        }
    }

    /// Parse a role name, falling back to the baseline role for anything
    /// unrecognized.
    pub fn parse_or_default(name: &str) -> Role {
        name.parse().unwrap_or_else(|err: UnknownRole| {
            tracing::warn!(%err, fallback = %Role::default(), "falling back to baseline role");
            Role::default()
        })
    }

    /// Key under which this role's backend expects the district reference.
    pub fn district_key(self) -> &'static str {
        match self {
            Role::Expo | Role::Ambassador => "district_id",
            Role::Ypc => "district",
        }
    }

    /// Local store key of the "registered" marker for this role.
    pub fn registered_flag_key(self) -> String {
        format!("registered_{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == key)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}
