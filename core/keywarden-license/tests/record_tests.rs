use keywarden_license::{LicenseRecord, LicenseStatus, RecordStore};
use keywarden_store::{ConfigStore, MemoryStore};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn record_store(store: Arc<MemoryStore>) -> RecordStore {
    RecordStore::new(store, "plugin")
}

// ── LicenseRecord ────────────────────────────────────────────────

#[test]
fn default_record_is_unset_and_empty() {
    let record = LicenseRecord::default();
    assert_eq!(record.key, "");
    assert_eq!(record.status, LicenseStatus::Unset);
    assert_eq!(record.last_checked_at, None);
    assert!(!record.is_valid());
}

#[test]
fn masked_key_hides_the_middle() {
    let record = LicenseRecord {
        key: "ABCD-1234-EFGH-5678".to_string(),
        ..Default::default()
    };
    assert_eq!(record.masked_key().unwrap(), "ABCD***********5678");
}

#[test]
fn masked_key_short_keys_fully_starred() {
    let record = LicenseRecord {
        key: "ABCD1234".to_string(),
        ..Default::default()
    };
    assert_eq!(record.masked_key().unwrap(), "********");
}

#[test]
fn masked_key_empty_is_none() {
    assert_eq!(LicenseRecord::default().masked_key(), None);
}

#[test]
fn record_serde_roundtrip() {
    let record = LicenseRecord {
        key: "ABCD-1234".to_string(),
        status: LicenseStatus::Expired,
        last_checked_at: None,
    };
    let json = serde_json::to_string(&record).unwrap();
    let parsed: LicenseRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

// ── RecordStore ──────────────────────────────────────────────────

#[test]
fn load_on_empty_store_yields_default() {
    let records = record_store(Arc::new(MemoryStore::new()));
    assert_eq!(records.load().unwrap(), LicenseRecord::default());
}

#[test]
fn set_key_and_status_roundtrip() {
    let records = record_store(Arc::new(MemoryStore::new()));
    records.set_key("ABCD-1234").unwrap();
    records.set_status(LicenseStatus::Valid).unwrap();

    let record = records.load().unwrap();
    assert_eq!(record.key, "ABCD-1234");
    assert_eq!(record.status, LicenseStatus::Valid);
}

#[test]
fn changed_key_clears_status() {
    let records = record_store(Arc::new(MemoryStore::new()));
    records.set_key("ABCD-1234").unwrap();
    records.set_status(LicenseStatus::Valid).unwrap();

    records.set_key("WXYZ-9999").unwrap();
    let record = records.load().unwrap();
    assert_eq!(record.key, "WXYZ-9999");
    assert_eq!(record.status, LicenseStatus::Unset);
}

#[test]
fn unchanged_key_keeps_status() {
    let records = record_store(Arc::new(MemoryStore::new()));
    records.set_key("ABCD-1234").unwrap();
    records.set_status(LicenseStatus::Valid).unwrap();

    records.set_key("ABCD-1234").unwrap();
    assert_eq!(records.load().unwrap().status, LicenseStatus::Valid);
}

#[test]
fn clear_removes_key_and_status() {
    let records = record_store(Arc::new(MemoryStore::new()));
    records.set_key("ABCD-1234").unwrap();
    records.set_status(LicenseStatus::Valid).unwrap();

    records.clear().unwrap();
    assert_eq!(records.load().unwrap(), LicenseRecord::default());
}

#[test]
fn clear_key_leaves_status() {
    let records = record_store(Arc::new(MemoryStore::new()));
    records.set_key("ABCD-1234").unwrap();
    records.set_status(LicenseStatus::Revoked).unwrap();

    records.clear_key().unwrap();
    let record = records.load().unwrap();
    assert_eq!(record.key, "");
    assert_eq!(record.status, LicenseStatus::Revoked);
}

#[test]
fn touch_last_check_roundtrips_to_second_precision() {
    let records = record_store(Arc::new(MemoryStore::new()));
    let now = chrono::Utc::now();
    records.touch_last_check(now).unwrap();

    let loaded = records.load().unwrap().last_checked_at.unwrap();
    assert_eq!(loaded.timestamp(), now.timestamp());
}

#[test]
fn garbage_stored_values_degrade_to_defaults() {
    let store = Arc::new(MemoryStore::new());
    store.set("plugin.license_status", "banana").unwrap();
    store.set("plugin.license_last_check", "not-a-number").unwrap();

    let record = record_store(store).load().unwrap();
    assert_eq!(record.status, LicenseStatus::Unset);
    assert_eq!(record.last_checked_at, None);
}

#[test]
fn namespaces_are_isolated() {
    let store = Arc::new(MemoryStore::new());
    let a = RecordStore::new(store.clone(), "plugin_a");
    let b = RecordStore::new(store, "plugin_b");

    a.set_key("AAAA-1111").unwrap();
    b.set_key("BBBB-2222").unwrap();
    a.clear().unwrap();

    assert_eq!(b.load().unwrap().key, "BBBB-2222");
}
