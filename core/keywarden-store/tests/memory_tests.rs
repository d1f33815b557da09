use keywarden_store::{ConfigStore, MemoryStore};

#[test]
fn get_unset_key_returns_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("missing").unwrap(), None);
}

#[test]
fn set_then_get_roundtrip() {
    let store = MemoryStore::new();
    store.set("plugin.license_key", "ABCD-1234").unwrap();
    assert_eq!(
        store.get("plugin.license_key").unwrap(),
        Some("ABCD-1234".to_string())
    );
}

#[test]
fn set_overwrites_previous_value() {
    let store = MemoryStore::new();
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
}

#[test]
fn remove_deletes_entry() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn remove_absent_key_is_ok() {
    let store = MemoryStore::new();
    assert!(store.remove("never-set").is_ok());
}

#[test]
fn keys_are_independent() {
    let store = MemoryStore::new();
    store.set("a.license_key", "one").unwrap();
    store.set("b.license_key", "two").unwrap();
    store.remove("a.license_key").unwrap();
    assert_eq!(store.get("b.license_key").unwrap(), Some("two".to_string()));
}
