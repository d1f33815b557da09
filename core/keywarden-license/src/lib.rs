//! License activation and status tracking for Keywarden.
//!
//! This crate handles:
//! - Persisting the license key, status, and last-check time through an
//!   injected [`ConfigStore`](keywarden_store::ConfigStore)
//! - Activation and deactivation against the remote licensing endpoint
//! - Opportunistic status checks gated by a minimum interval
//!
//! # Design Principles
//!
//! - **Explicit dispatch**: nothing runs implicitly; a caller (CLI, HTTP
//!   handler) invokes [`LicenseManager`] operations directly
//! - **Fail-soft checks**: a status check that cannot reach or parse the
//!   server leaves the cached status untouched
//! - **Never partially written**: every operation leaves the record in the
//!   prior or an explicitly-updated state

mod client;
mod error;
mod manager;
mod protocol;
mod record;
mod status;

pub use client::{ActivationClient, LicenseRequest, DEFAULT_REQUEST_TIMEOUT};
pub use error::{LicenseError, LicenseResult};
pub use manager::{ActivationOutcome, LicenseManager, ManagerConfig, DEFAULT_CHECK_INTERVAL};
pub use protocol::{Action, LicenseResponse, ServerCode};
pub use record::{LicenseRecord, RecordStore};
pub use status::LicenseStatus;
