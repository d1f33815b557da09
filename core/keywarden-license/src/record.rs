//! The persisted license record and its store bindings.

use crate::status::LicenseStatus;
use chrono::{DateTime, TimeZone, Utc};
use keywarden_store::{ConfigStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Point-in-time view of the persisted license state.
///
/// Invariant: `status == Valid` implies `key` is non-empty. The record is
/// mutated only through [`RecordStore`], which maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Opaque license key; empty when none is stored.
    pub key: String,
    /// Cached server-reported status.
    pub status: LicenseStatus,
    /// When a status check was last attempted, transport outcome aside.
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl Default for LicenseRecord {
    fn default() -> Self {
        Self {
            key: String::new(),
            status: LicenseStatus::Unset,
            last_checked_at: None,
        }
    }
}

impl LicenseRecord {
    /// Returns true if the cached status is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Masked rendering for display: first and last four characters with
    /// the middle starred out. Keys of eight characters or fewer are fully
    /// starred. `None` when no key is stored.
    #[must_use]
    pub fn masked_key(&self) -> Option<String> {
        if self.key.is_empty() {
            return None;
        }
        let len = self.key.chars().count();
        if len > 8 {
            let head: String = self.key.chars().take(4).collect();
            let tail: String = self.key.chars().skip(len - 4).collect();
            Some(format!("{head}{}{tail}", "*".repeat(len - 8)))
        } else {
            Some("*".repeat(len))
        }
    }
}

/// Namespaced accessor for the persisted record entries.
///
/// Each product identity gets its own namespace, so several managers can
/// share one store without collision. Entries:
/// `<ns>.license_key`, `<ns>.license_status`, `<ns>.license_last_check`.
pub struct RecordStore {
    store: Arc<dyn ConfigStore>,
    key_entry: String,
    status_entry: String,
    last_check_entry: String,
}

impl RecordStore {
    /// Binds a record store to `namespace` within `store`.
    pub fn new(store: Arc<dyn ConfigStore>, namespace: &str) -> Self {
        Self {
            key_entry: format!("{namespace}.license_key"),
            status_entry: format!("{namespace}.license_status"),
            last_check_entry: format!("{namespace}.license_last_check"),
            store,
        }
    }

    /// Reads the full record. Unparsable stored values degrade to their
    /// defaults rather than failing the read.
    pub fn load(&self) -> StoreResult<LicenseRecord> {
        let key = self.store.get(&self.key_entry)?.unwrap_or_default();
        let status = self
            .store
            .get(&self.status_entry)?
            .and_then(|s| LicenseStatus::from_server(&s))
            .unwrap_or(LicenseStatus::Unset);
        let last_checked_at = self
            .store
            .get(&self.last_check_entry)?
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
        Ok(LicenseRecord {
            key,
            status,
            last_checked_at,
        })
    }

    /// Stores a key. A changed value clears the cached status, so the next
    /// activation starts from scratch.
    pub fn set_key(&self, key: &str) -> StoreResult<()> {
        let previous = self.store.get(&self.key_entry)?;
        if previous.as_deref().is_some_and(|old| old != key) {
            self.store.remove(&self.status_entry)?;
        }
        self.store.set(&self.key_entry, key)
    }

    /// Caches a server-reported status.
    pub fn set_status(&self, status: LicenseStatus) -> StoreResult<()> {
        self.store.set(&self.status_entry, status.as_str())
    }

    /// Drops the stored key, leaving the status entry alone.
    pub fn clear_key(&self) -> StoreResult<()> {
        self.store.remove(&self.key_entry)
    }

    /// Clears key and status together (explicit deactivation).
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(&self.status_entry)?;
        self.store.remove(&self.key_entry)
    }

    /// Records when a status check was last attempted.
    pub fn touch_last_check(&self, at: DateTime<Utc>) -> StoreResult<()> {
        self.store
            .set(&self.last_check_entry, &at.timestamp().to_string())
    }
}
