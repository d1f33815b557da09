//! The license manager: activate, deactivate, check, query.

use crate::client::{ActivationClient, LicenseRequest, DEFAULT_REQUEST_TIMEOUT};
use crate::error::{LicenseError, LicenseResult};
use crate::protocol::Action;
use crate::record::{LicenseRecord, RecordStore};
use crate::status::LicenseStatus;
use chrono::Utc;
use keywarden_store::ConfigStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Minimum time between unforced status checks.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for a [`LicenseManager`].
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Licensing endpoint base URL.
    pub endpoint: String,
    /// Store entry prefix; one namespace per product identity.
    pub namespace: String,
    /// Product id on the licensing server.
    pub item_id: String,
    /// Product name as registered on the licensing server.
    pub item_name: String,
    /// Origin the license is bound to.
    pub site_url: String,
    /// Deployment environment reported to the server.
    pub environment: String,
    /// Minimum time between unforced checks.
    pub check_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ManagerConfig {
    /// Builds a config with the default environment (`production`), check
    /// interval, and request timeout. Fields are public; adjust in place.
    pub fn new(
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
        item_id: impl Into<String>,
        item_name: impl Into<String>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            namespace: namespace.into(),
            item_id: item_id.into(),
            item_name: item_name.into(),
            site_url: site_url.into(),
            environment: "production".to_string(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Successful result of an activation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Key accepted; status is now [`LicenseStatus::Valid`].
    Activated,
    /// Nothing to do: no candidate key and none stored.
    NoKey,
}

/// Owns the persisted license record and mediates every mutation through
/// the remote licensing endpoint.
///
/// One logical actor: an internal mutex serializes the remote-call-plus-
/// persist span of each mutating operation, so concurrent callers sharing
/// a store cannot lose updates between the response and the local write.
pub struct LicenseManager {
    client: ActivationClient,
    records: RecordStore,
    config: ManagerConfig,
    op_lock: Mutex<()>,
}

impl LicenseManager {
    /// Builds a manager over `store` per `config`.
    pub fn new(config: ManagerConfig, store: Arc<dyn ConfigStore>) -> LicenseResult<Self> {
        let client = ActivationClient::new(&config.endpoint, config.request_timeout)?;
        let records = RecordStore::new(store, &config.namespace);
        Ok(Self {
            client,
            records,
            config,
            op_lock: Mutex::new(()),
        })
    }

    fn request<'a>(&'a self, action: Action, license: &'a str) -> LicenseRequest<'a> {
        LicenseRequest {
            action,
            license,
            item_id: &self.config.item_id,
            item_name: &self.config.item_name,
            site_url: &self.config.site_url,
            environment: &self.config.environment,
        }
    }

    /// Activates `candidate`, falling back to the stored key when none is
    /// supplied. With neither, the call is a no-op.
    ///
    /// On success the key and a `Valid` status are persisted. A rejection
    /// (`success: false`) mutates nothing; a success envelope carrying a
    /// non-valid license value persists that status, leaves the stored key
    /// untouched, and surfaces as [`LicenseError::Refused`].
    pub async fn activate(&self, candidate: Option<&str>) -> LicenseResult<ActivationOutcome> {
        let _guard = self.op_lock.lock().await;

        let stored = self.records.load()?;
        let key = match candidate.map(str::trim).filter(|k| !k.is_empty()) {
            Some(k) => k.to_string(),
            None if !stored.key.is_empty() => stored.key.clone(),
            None => {
                debug!("activation skipped: no license key supplied or stored");
                return Ok(ActivationOutcome::NoKey);
            }
        };

        let reply = self.client.send(&self.request(Action::Activate, &key)).await?;

        if reply.is_rejection() {
            let code = reply.server_code();
            info!(code = ?code, "activation rejected by server");
            return Err(LicenseError::Rejected(code));
        }

        match reply.license.as_deref() {
            Some("valid") => {
                self.records.set_key(&key)?;
                self.records.set_status(LicenseStatus::Valid)?;
                info!("license activated");
                Ok(ActivationOutcome::Activated)
            }
            Some(other) => match LicenseStatus::from_server(other) {
                Some(status) => {
                    self.records.set_status(status)?;
                    info!(status = %status, "activation did not yield a valid license");
                    Err(LicenseError::Refused { status })
                }
                None => Err(LicenseError::MalformedResponse(format!(
                    "unknown license value `{other}`"
                ))),
            },
            None => Err(LicenseError::MalformedResponse(
                "reply carries neither a license value nor an error".to_string(),
            )),
        }
    }

    /// Releases this site's activation and clears the stored record.
    ///
    /// Requires a stored key. Only an explicit `deactivated` reply clears
    /// the record; any other reply leaves it untouched.
    pub async fn deactivate(&self) -> LicenseResult<()> {
        let _guard = self.op_lock.lock().await;

        let stored = self.records.load()?;
        if stored.key.is_empty() {
            return Err(LicenseError::MissingKey);
        }

        let reply = self
            .client
            .send(&self.request(Action::Deactivate, &stored.key))
            .await?;

        if reply.license.as_deref() == Some("deactivated") {
            self.records.clear()?;
            info!("license deactivated");
            Ok(())
        } else {
            Err(LicenseError::DeactivationFailed)
        }
    }

    /// Refreshes the cached status from the server.
    ///
    /// Unforced calls are gated: the cached status must be valid and the
    /// last attempt older than the configured interval. Failures are
    /// swallowed and logged; a check that cannot reach or parse the server
    /// leaves the cached status as-is.
    pub async fn check_status(&self, force: bool) {
        if let Err(e) = self.check_status_inner(force).await {
            warn!(error = %e, "license status check failed");
        }
    }

    async fn check_status_inner(&self, force: bool) -> LicenseResult<()> {
        let _guard = self.op_lock.lock().await;

        let stored = self.records.load()?;
        if !force {
            if !stored.status.is_valid() {
                return Ok(());
            }
            let interval = self.config.check_interval.as_secs() as i64;
            let due = match stored.last_checked_at {
                Some(at) => Utc::now().signed_duration_since(at).num_seconds() > interval,
                None => true,
            };
            if !due {
                debug!("status check skipped: within check interval");
                return Ok(());
            }
        }
        if stored.key.is_empty() {
            return Ok(());
        }

        let result = self.client.send(&self.request(Action::Check, &stored.key)).await;
        // The attempt itself gates the timestamp, not its outcome.
        self.records.touch_last_check(Utc::now())?;
        let reply = result?;

        let Some(value) = reply.license.as_deref() else {
            return Err(LicenseError::MalformedResponse(
                "check reply carries no license value".to_string(),
            ));
        };
        let Some(status) = LicenseStatus::from_server(value) else {
            return Err(LicenseError::MalformedResponse(format!(
                "unknown license value `{value}`"
            )));
        };

        self.records.set_status(status)?;
        if status.revokes_key() {
            self.records.clear_key()?;
            info!(status = %status, "license revoked on server; key cleared");
        } else if !status.is_valid() {
            info!(status = %status, "license status changed");
        }
        Ok(())
    }

    /// Pure read of the persisted record.
    pub fn query_state(&self) -> LicenseResult<LicenseRecord> {
        Ok(self.records.load()?)
    }

    /// True when the cached status is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.records
            .load()
            .map(|r| r.status.is_valid())
            .unwrap_or(false)
    }

    /// Stores `key` without contacting the server. A changed value resets
    /// the cached status, forcing re-activation.
    pub async fn set_key(&self, key: &str) -> LicenseResult<()> {
        let _guard = self.op_lock.lock().await;
        Ok(self.records.set_key(key)?)
    }
}
