//! Shared helpers for license manager tests.

#![allow(dead_code)]

use keywarden_license::{LicenseManager, ManagerConfig};
use keywarden_store::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const ITEM_ID: &str = "4417";
pub const ITEM_NAME: &str = "Keywarden Pro";
pub const SITE_URL: &str = "https://example.test";

/// Config pointing at `server` with a short timeout and the test identity.
pub fn test_config(server: &MockServer) -> ManagerConfig {
    let mut config = ManagerConfig::new(server.uri(), "test", ITEM_ID, ITEM_NAME, SITE_URL);
    config.request_timeout = Duration::from_secs(2);
    config
}

/// Manager wired to `server` over the given in-memory store.
pub fn manager_for(server: &MockServer, store: Arc<MemoryStore>) -> LicenseManager {
    LicenseManager::new(test_config(server), store).expect("manager construction")
}

/// Fresh manager over its own private store.
pub fn fresh_manager(server: &MockServer) -> LicenseManager {
    manager_for(server, Arc::new(MemoryStore::new()))
}

/// JSON body for a success envelope with the given license value.
pub fn license_body(license: &str) -> serde_json::Value {
    serde_json::json!({ "success": true, "license": license })
}

/// JSON body for a rejection envelope with the given error code.
pub fn error_body(code: &str) -> serde_json::Value {
    serde_json::json!({ "success": false, "error": code })
}
