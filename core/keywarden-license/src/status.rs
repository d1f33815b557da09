//! License status vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-reported entitlement state, cached locally.
///
/// `Unset` is the local resting state (no activation yet, or the record was
/// cleared); the server never reports it. Every other variant mirrors a
/// `license` value the endpoint can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    /// No activation has happened, or the record was cleared.
    Unset,
    /// License is active for this site.
    Valid,
    /// Key is not recognized.
    Invalid,
    /// License term has lapsed. The key is kept so re-activation does not
    /// require re-entering it.
    Expired,
    /// Disabled by the vendor.
    Disabled,
    /// Revoked by the vendor.
    Revoked,
    /// Key exists but has no active site.
    Inactive,
    /// Not activated for this site specifically.
    SiteInactive,
}

impl LicenseStatus {
    /// Parses a server-reported `license` value. Returns `None` for
    /// vocabulary that is not a cacheable status (e.g. `deactivated`).
    #[must_use]
    pub fn from_server(value: &str) -> Option<Self> {
        match value {
            "valid" => Some(Self::Valid),
            "invalid" => Some(Self::Invalid),
            "expired" => Some(Self::Expired),
            "disabled" => Some(Self::Disabled),
            "revoked" => Some(Self::Revoked),
            "inactive" => Some(Self::Inactive),
            "site_inactive" => Some(Self::SiteInactive),
            _ => None,
        }
    }

    /// The wire/store spelling of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Expired => "expired",
            Self::Disabled => "disabled",
            Self::Revoked => "revoked",
            Self::Inactive => "inactive",
            Self::SiteInactive => "site_inactive",
        }
    }

    /// Returns true if the license is currently usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// True when a check reporting this status also invalidates the stored
    /// key. `Expired` is deliberately absent: an expired key stays on file
    /// for re-activation after renewal.
    #[must_use]
    pub fn revokes_key(&self) -> bool {
        matches!(
            self,
            Self::Invalid | Self::Disabled | Self::Revoked | Self::Inactive | Self::SiteInactive
        )
    }

    /// Operator-facing one-line description.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Unset => "no license entered",
            Self::Valid => "your license is valid and active",
            Self::Expired => "your license has expired",
            Self::Disabled | Self::Revoked => "your license has been disabled",
            Self::Inactive | Self::SiteInactive => "your license is not active for this site",
            Self::Invalid => "invalid license",
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
