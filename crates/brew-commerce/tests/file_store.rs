//! End-to-end behavior against the directory-backed store.

use brew_commerce::prelude::*;
use brew_store::{keys, Store};
use std::fs;
use std::path::PathBuf;

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "brew-commerce-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        Self(dir)
    }

    fn store(&self) -> Store {
        Store::open_dir(&self.0).unwrap()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_cart_roundtrip_preserves_order_and_quantities() {
    let dir = TempDir::new("roundtrip");
    let catalog = PriceCatalog::standard();

    let expected = {
        let mut cart = CartStore::load(dir.store());
        for id in ["brownie", "latte", "brownie", "cold-brew", "latte", "latte"] {
            cart.add_catalog_item(&catalog, id).unwrap();
        }
        cart.set_quantity(&ItemId::new("cold-brew"), 4).unwrap();
        cart.snapshot()
    };

    // Fresh handle, as a new page load would create
    let reloaded = CartStore::load(dir.store()).snapshot();
    assert_eq!(reloaded, expected);

    let ids: Vec<&str> = reloaded.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["brownie", "latte", "cold-brew"]);
    let quantities: Vec<i64> = reloaded.iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![2, 3, 4]);
}

#[test]
fn test_checkout_against_disk() {
    let dir = TempDir::new("checkout");
    let catalog = PriceCatalog::standard();
    let store = dir.store();

    let mut cart = CartStore::load(store.clone());
    cart.add_catalog_item(&catalog, "sandwich").unwrap();
    cart.add_catalog_item(&catalog, "americano").unwrap();
    let grand_total = cart.pricing().unwrap().grand_total;

    let service = OrderService::new(store.clone());
    let mut flow = CheckoutFlow::with_fields(CheckoutFields {
        name: "Ravi".into(),
        phone: "99000 11111".into(),
        address: "4 Brigade Road".into(),
        delivery_option: Some(DeliveryOption::Delivery),
        notes: "ring twice".into(),
    });
    let order = flow.submit(&service, &mut cart).unwrap();

    assert_eq!(order.total, grand_total);
    assert_eq!(order.total, Money::new(578));
    assert_eq!(order.customer.notes, "ring twice");

    // Another process sees the same outcome
    let store = dir.store();
    assert!(CartStore::load(store.clone()).is_empty());
    let orders = OrderHistory::new(store).all();
    assert_eq!(orders, vec![order]);
}

#[test]
fn test_corrupt_files_fail_soft() {
    let dir = TempDir::new("corrupt");
    let store = dir.store();
    fs::write(dir.0.join(format!("{}.json", keys::CART)), b"[{\"id\":").unwrap();
    fs::write(dir.0.join(format!("{}.json", keys::ORDERS)), b"not json").unwrap();

    let mut cart = CartStore::load(store.clone());
    assert!(cart.is_empty());
    assert!(OrderHistory::new(store.clone()).all().is_empty());

    // The next write replaces the corrupt data
    cart.add_catalog_item(&PriceCatalog::standard(), "cookie").unwrap();
    assert_eq!(CartStore::load(store).count(), 1);
}

#[test]
fn test_reads_cart_written_by_the_website() {
    let dir = TempDir::new("legacy");
    fs::create_dir_all(&dir.0).unwrap();
    fs::write(
        dir.0.join("brewAuraCart.json"),
        r#"[{"id":"espresso","name":"Espresso","price":180,"image":"images/espresso.jpg","category":"coffee","quantity":2},
            {"id":"cappuccino","name":"Cappuccino","price":240,"image":"images/cappuccino.jpg","category":"coffee","quantity":1}]"#,
    )
    .unwrap();

    let cart = CartStore::load(dir.store());
    assert_eq!(cart.count(), 3);

    let pricing = cart.pricing().unwrap();
    assert_eq!(pricing.subtotal, Money::new(600));
    assert_eq!(pricing.tax, Money::new(30));
    assert_eq!(pricing.grand_total, Money::new(630));
}

#[test]
fn test_two_handles_last_write_wins() {
    let dir = TempDir::new("lww");
    let catalog = PriceCatalog::standard();

    let mut tab_a = CartStore::load(dir.store());
    let mut tab_b = CartStore::load(dir.store());

    tab_a.add_catalog_item(&catalog, "muffin").unwrap();
    tab_b.add_catalog_item(&catalog, "donut").unwrap();

    // Tab B never saw the muffin, so its write replaced it
    let persisted = CartStore::load(dir.store()).snapshot();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id.as_str(), "donut");
}
