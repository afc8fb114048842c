//! Integration tests for cart and session persistence through real file
//! storage.

use std::sync::Arc;

use sole_supply_integration_tests::temp_data_dir;
use sole_supply_storefront::cart::CartStore;
use sole_supply_storefront::catalog::{ProductRecord, placeholder_record};
use sole_supply_storefront::services::auth::AuthService;
use sole_supply_storefront::storage::{FileStore, Storage, keys};

fn record(id: &str, price: f64) -> ProductRecord {
    let mut record = placeholder_record(id);
    record.title = format!("Shoe {id}");
    record.price = price;
    record
}

// =============================================================================
// Cart round-trips
// =============================================================================

#[test]
fn test_cart_roundtrips_through_file_store() {
    let dir = temp_data_dir("cart-roundtrip");
    let storage = Arc::new(FileStore::open(&dir).expect("open store"));

    let mut cart = CartStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
    cart.add(&record("aj1-bred", 320.0)).expect("add");
    cart.add(&record("dunk-low", 115.5)).expect("add");
    cart.remove("aj1-bred");

    // A fresh handle over the same directory sees the same state
    let reopened_storage = Arc::new(FileStore::open(&dir).expect("reopen store"));
    let reopened = CartStore::open(reopened_storage);

    assert_eq!(reopened.state(), cart.state());
    assert_eq!(reopened.item_count(), 1);
    assert!((reopened.total_price() - 115.5).abs() < f64::EPSILON);
}

#[test]
fn test_cart_sequence_of_mutations_survives_reopen() {
    let dir = temp_data_dir("cart-mutations");
    let storage = Arc::new(FileStore::open(&dir).expect("open store"));

    let mut cart = CartStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
    cart.add(&record("a", 10.0)).expect("add");
    cart.add(&record("b", 25.5)).expect("add");
    cart.clear();
    cart.add(&record("c", 99.0)).expect("add");

    let reopened = CartStore::open(storage);
    assert_eq!(reopened.item_count(), 1);
    assert!(reopened.state().contains("c"));
}

#[test]
fn test_corrupted_cart_file_recovers_empty() {
    let dir = temp_data_dir("cart-corrupt");
    let storage = Arc::new(FileStore::open(&dir).expect("open store"));

    storage
        .put(keys::CART_ITEMS, "this is not JSON at all {{{")
        .expect("seed corrupt blob");

    let cart = CartStore::open(Arc::clone(&storage) as Arc<dyn Storage>);

    assert_eq!(cart.item_count(), 0);
    // The corrupted record was discarded, not left to fail the next open
    assert!(storage.get(keys::CART_ITEMS).expect("read").is_none());
}

// =============================================================================
// Session records
// =============================================================================

#[test]
fn test_user_session_survives_reopen() {
    let dir = temp_data_dir("session");
    let storage = Arc::new(FileStore::open(&dir).expect("open store"));

    let auth = AuthService::new(Arc::clone(&storage) as Arc<dyn Storage>);
    let user = auth.login("runner@example.com", "hunter2").expect("login");

    let reopened_storage = Arc::new(FileStore::open(&dir).expect("reopen store"));
    let reopened_auth = AuthService::new(reopened_storage);

    assert_eq!(reopened_auth.current_user(), Some(user));
}

#[test]
fn test_cart_and_session_records_are_independent() {
    let dir = temp_data_dir("independent");
    let storage = Arc::new(FileStore::open(&dir).expect("open store"));

    let auth = AuthService::new(Arc::clone(&storage) as Arc<dyn Storage>);
    auth.login("runner@example.com", "hunter2").expect("login");

    let mut cart = CartStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
    cart.add(&record("aj1-bred", 320.0)).expect("add");

    // Logging out must not touch the cart blob
    auth.logout();

    let reopened = CartStore::open(Arc::clone(&storage) as Arc<dyn Storage>);
    assert_eq!(reopened.item_count(), 1);
    assert!(auth.current_user().is_none());
}
