//! Per-role backend endpoints.

use autoreg_core::Role;

/// Check and register URLs for one role's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base of the existence check; the national id is appended as a path segment.
    pub check: String,
    pub register: String,
}

impl Endpoints {
    pub fn new(check: impl Into<String>, register: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            register: register.into(),
        }
    }
}

/// One [`Endpoints`] pair per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    expo: Endpoints,
    ypc: Endpoints,
    ambassador: Endpoints,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            expo: Endpoints::new(
                "https://wepx-wdd.punjab.gov.pk/api/check-user-expo",
                "https://wepx-wdd.punjab.gov.pk/api/automatic-register-expo",
            ),
            ypc: Endpoints::new(
                "https://ypc-wdd.punjab.gov.pk/api/check-user-ypc",
                "https://ypc-wdd.punjab.gov.pk/api/automatic-register-ypc",
            ),
            ambassador: Endpoints::new(
                "https://fa-wdd.punjab.gov.pk/api/check-user-ambassador",
                "https://fa-wdd.punjab.gov.pk/api/automatic-register-ambassador",
            ),
        }
    }
}

impl EndpointTable {
    pub fn for_role(&self, role: Role) -> &Endpoints {
        match role {
            Role::Expo => &self.expo,
            Role::Ypc => &self.ypc,
            Role::Ambassador => &self.ambassador,
        }
    }

    /// Replace the endpoints of a single role.
    pub fn with_role(mut self, role: Role, endpoints: Endpoints) -> Self {
        let slot = match role {
            Role::Expo => &mut self.expo,
            Role::Ypc => &mut self.ypc,
            Role::Ambassador => &mut self.ambassador,
        };
        *slot = endpoints;
        self
    }
}
