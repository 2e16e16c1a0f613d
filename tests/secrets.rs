//! Secret store tests against the in-memory backend.

mod support;
use support::*;

use azurify::core::domain::SecretKey;
use azurify::core::memory::MemorySecrets;
use azurify::core::secrets::SecretStore;
use azurify::error::{Error, SecretError};

fn empty_store() -> SecretStore<MemorySecrets> {
    SecretStore::open(MemorySecrets::with_secrets("kv-mystore-abcdefghijkl", &[])).unwrap()
}

#[test]
fn test_document_load_writes_only_whitelisted_keys() {
    let t = Test::new();
    let path = t.write(
        "secrets.json",
        r#"{"SHOPDOMAIN": "mystore.myshopify.com", "BOGUSKEY": "x"}"#,
    );

    let mut store = empty_store();
    let report = store.load_from_document(&path).unwrap();

    assert_eq!(report.written, vec![SecretKey::ShopDomain]);
    assert_eq!(report.skipped, vec!["BOGUSKEY".to_string()]);
    assert_eq!(store.backend().writes(), vec!["SHOPDOMAIN".to_string()]);
    assert_eq!(store.shop_domain(), Some("mystore.myshopify.com"));
    assert_eq!(store.cached("BOGUSKEY"), None);
}

#[test]
fn test_full_document_populates_typed_accessors() {
    let t = Test::new();
    let path = t.write("secrets.json", SECRETS_DOCUMENT);

    let mut store = empty_store();
    let report = store.load_from_document(&path).unwrap();

    assert_eq!(report.written, SecretKey::ALL.to_vec());
    assert!(report.missing.is_empty());
    assert_eq!(store.api_version(), Some("2024-01"));
    assert_eq!(store.api_access_token(), Some("shpat_111"));
    assert_eq!(store.api_client_secret_key(), Some("shpss_222"));
    assert!(store
        .storage_connection_string()
        .unwrap()
        .starts_with("DefaultEndpointsProtocol=https"));
}

#[test]
fn test_document_order_is_write_order() {
    let t = Test::new();
    let path = t.write(
        "secrets.json",
        r#"{"APIVERSION": "2024-01", "SHOPDOMAIN": "a.myshopify.com"}"#,
    );

    let mut store = empty_store();
    store.load_from_document(&path).unwrap();
    assert_eq!(
        store.backend().writes(),
        vec!["APIVERSION".to_string(), "SHOPDOMAIN".to_string()]
    );
}

#[test]
fn test_missing_document() {
    let t = Test::new();
    let mut store = empty_store();
    let err = store.load_from_document(&t.path("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Secret(SecretError::ReadDocument { .. })));
}

#[test]
fn test_malformed_document() {
    let t = Test::new();
    let path = t.write("secrets.json", "SHOPDOMAIN=x");
    let mut store = empty_store();
    let err = store.load_from_document(&path).unwrap_err();
    assert!(matches!(err, Error::Secret(SecretError::ParseDocument { .. })));
}

#[test]
fn test_non_string_value_rejected_before_any_write() {
    let t = Test::new();
    let path = t.write(
        "secrets.json",
        r#"{"SHOPDOMAIN": "a.myshopify.com", "APIVERSION": 2024}"#,
    );

    let mut store = empty_store();
    let err = store.load_from_document(&path).unwrap_err();
    match err {
        Error::Secret(SecretError::InvalidDocumentValue { key, .. }) => {
            assert_eq!(key, "APIVERSION")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.backend().writes().is_empty());
}

#[test]
fn test_snapshot_reflects_store_at_open() {
    let backend = MemorySecrets::with_secrets(
        "kv-a",
        &[("SHOPDOMAIN", "a.myshopify.com"), ("CUSTOM-KEY", "v")],
    );
    let store = SecretStore::open(backend).unwrap();

    let names: Vec<&str> = store.secrets().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["CUSTOM-KEY", "SHOPDOMAIN"]);
    let listed: Vec<String> = store.list().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(listed, vec!["CUSTOM-KEY", "SHOPDOMAIN"]);
}

#[test]
fn test_set_then_get_roundtrip() {
    let mut store = empty_store();
    store.set("NEWKEY", "def").unwrap();
    assert_eq!(store.get("NEWKEY").unwrap().as_str(), "def");
}

#[test]
fn test_delete_then_purge() {
    let mut store = empty_store();
    store.set("TEMP", "1").unwrap();
    store.delete("TEMP").unwrap();
    store.purge("TEMP").unwrap();
    assert!(store.is_empty());

    let err = store.get("TEMP").unwrap_err();
    assert!(matches!(err, Error::Secret(SecretError::NotFound(_))));
}

#[test]
fn test_debug_output_hides_values() {
    let mut store = empty_store();
    store.set("APIACCESSTOKEN", "shpat_supersecret").unwrap();
    let debug = format!("{:?}", store);
    assert!(debug.contains("APIACCESSTOKEN"));
    assert!(!debug.contains("shpat_supersecret"));
}
