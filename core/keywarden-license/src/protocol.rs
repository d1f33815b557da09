//! Wire protocol for the remote licensing endpoint.
//!
//! Requests are form-encoded POSTs against a fixed base URL, identified by
//! the `edd_action` field. Replies are JSON envelopes: the success path
//! carries a `license` value, the failure path an `error` code.

use serde::Deserialize;
use std::fmt;

/// The remote action, carried in the `edd_action` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Bind the key to this site.
    Activate,
    /// Release this site's activation.
    Deactivate,
    /// Report the key's current entitlement state.
    Check,
}

impl Action {
    /// The wire spelling of this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate_license",
            Self::Deactivate => "deactivate_license",
            Self::Check => "check_license",
        }
    }
}

/// Reply envelope from the licensing endpoint. Unknown fields are ignored;
/// every known field is optional because check replies may omit `success`.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseResponse {
    pub success: Option<bool>,
    pub license: Option<String>,
    pub error: Option<String>,
}

impl LicenseResponse {
    /// True only when the envelope explicitly carries `success: false`.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.success == Some(false)
    }

    /// The rejection code, [`ServerCode::Unknown`] when the server sent
    /// none we recognize.
    #[must_use]
    pub fn server_code(&self) -> ServerCode {
        ServerCode::from_code(self.error.as_deref().unwrap_or(""))
    }
}

/// Error codes the server attaches to a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerCode {
    Expired,
    Disabled,
    Revoked,
    Missing,
    Invalid,
    SiteInactive,
    ItemNameMismatch,
    NoActivationsLeft,
    /// Anything outside the documented vocabulary.
    Unknown,
}

impl ServerCode {
    /// Maps a wire error code to its variant.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "expired" => Self::Expired,
            "disabled" => Self::Disabled,
            "revoked" => Self::Revoked,
            "missing" => Self::Missing,
            "invalid" => Self::Invalid,
            "site_inactive" => Self::SiteInactive,
            "item_name_mismatch" => Self::ItemNameMismatch,
            "no_activations_left" => Self::NoActivationsLeft,
            _ => Self::Unknown,
        }
    }

    /// Operator-facing explanation, used verbatim by the console.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Expired => "your license has expired",
            Self::Disabled | Self::Revoked => "your license has been disabled",
            Self::Missing => "invalid license",
            Self::Invalid | Self::SiteInactive => "your license is not active for this site",
            Self::ItemNameMismatch => "this license is not valid for this product",
            Self::NoActivationsLeft => "your license has reached its activation limit",
            Self::Unknown => "an error occurred, please try again",
        }
    }
}

impl fmt::Display for ServerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
