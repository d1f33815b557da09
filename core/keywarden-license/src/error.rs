//! Error types for license operations.

use crate::protocol::ServerCode;
use crate::status::LicenseStatus;
use keywarden_store::StoreError;
use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Network failure, timeout, or non-success HTTP status. Retryable;
    /// state is never mutated on this path.
    #[error("could not reach the licensing server: {0}")]
    Transient(String),

    /// The server rejected the request with a named code. Requires
    /// operator action (renew, purchase, free a seat).
    #[error("{0}")]
    Rejected(ServerCode),

    /// The activation reply carried a non-valid license value, which is
    /// now the cached status.
    #[error("activation failed: license is {status}")]
    Refused {
        /// The status the server reported and we persisted.
        status: LicenseStatus,
    },

    /// The server replied to a deactivation with something other than
    /// `deactivated`.
    #[error("error deactivating license")]
    DeactivationFailed,

    /// Reply body could not be decoded.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),

    /// No license key stored or supplied.
    #[error("no license key configured")]
    MissingKey,

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Persistence failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LicenseError {
    /// True for failures worth retrying without operator action.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
