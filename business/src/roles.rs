//! Portal roles that can be granted to a new user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role identifiers understood by the portal backend.
///
/// The serialized form is the backend identifier (`ROLE_PORTAL_USER`, ...).
/// Variant order is the order roles are offered and serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortalRole {
    #[serde(rename = "ROLE_PORTAL_USER")]
    PortalUser,
    #[serde(rename = "ROLE_PORTAL_ADMIN")]
    PortalAdmin,
    #[serde(rename = "ROLE_PORTAL_SUPERADMIN")]
    PortalSuperadmin,
}

impl PortalRole {
    /// Every role, in display order.
    pub const ALL: [Self; 3] = [Self::PortalUser, Self::PortalAdmin, Self::PortalSuperadmin];

    /// Backend identifier of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PortalUser => "ROLE_PORTAL_USER",
            Self::PortalAdmin => "ROLE_PORTAL_ADMIN",
            Self::PortalSuperadmin => "ROLE_PORTAL_SUPERADMIN",
        }
    }

    /// Human readable label for selection controls.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PortalUser => "User",
            Self::PortalAdmin => "Admin",
            Self::PortalSuperadmin => "Superadmin",
        }
    }
}

impl fmt::Display for PortalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
