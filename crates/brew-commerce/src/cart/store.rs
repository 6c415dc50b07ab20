//! The persisted cart owner.

use crate::cart::{Cart, CartPricing, LineItem, PricingEngine};
use crate::catalog::{MenuItem, PriceCatalog};
use crate::error::CommerceError;
use crate::ids::ItemId;
use crate::money::Money;
use brew_store::{keys, Store};

/// Callback invoked with the new line items after every cart change.
pub type CartListener = Box<dyn Fn(&[LineItem]) + Send + Sync>;

/// Owns the cart and keeps it in step with storage.
///
/// Construct one per page or process and hand it to whatever renders the
/// cart. Every mutation is applied to a copy, written to storage, and only
/// then made visible, so after any call returns the in-memory cart equals
/// the persisted one. Other writers to the same storage are not detected;
/// the last write wins.
pub struct CartStore {
    store: Store,
    cart: Cart,
    listeners: Vec<CartListener>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart from storage.
    ///
    /// Missing or unreadable data yields an empty cart.
    pub fn load(store: Store) -> Self {
        let cart = read_cart(&store);
        tracing::debug!(items = cart.unique_item_count(), "cart loaded");
        Self {
            store,
            cart,
            listeners: Vec::new(),
        }
    }

    /// Re-read the persisted cart, picking up writes from other handles.
    pub fn reload(&mut self) {
        let cart = read_cart(&self.store);
        if cart != self.cart {
            self.cart = cart;
            self.notify();
        }
    }

    /// Register a "cart changed" callback.
    pub fn subscribe(&mut self, listener: impl Fn(&[LineItem]) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of an item, appending it if it is new.
    pub fn add(
        &mut self,
        item_id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<(), CommerceError> {
        self.add_line(LineItem::new(item_id, name, unit_price, image, category))
    }

    /// Add one unit of a menu item.
    pub fn add_menu_item(&mut self, item: &MenuItem) -> Result<(), CommerceError> {
        self.add_line(LineItem::from(item))
    }

    /// Add one unit of a catalog item by id.
    pub fn add_catalog_item(
        &mut self,
        catalog: &PriceCatalog,
        item_id: &str,
    ) -> Result<(), CommerceError> {
        let item = catalog
            .get(item_id)
            .ok_or_else(|| CommerceError::UnknownItem(item_id.to_string()))?;
        self.add_menu_item(item)
    }

    fn add_line(&mut self, item: LineItem) -> Result<(), CommerceError> {
        let id = item.id.clone();
        let mut next = self.cart.clone();
        next.add(item)?;
        self.commit(next)?;
        tracing::debug!(item_id = %id, count = self.count(), "added to cart");
        Ok(())
    }

    /// Remove an item. Absent ids are not an error.
    pub fn remove(&mut self, item_id: &ItemId) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        let removed = next.remove(item_id);
        self.commit(next)?;
        tracing::debug!(item_id = %item_id, removed, "removed from cart");
        Ok(())
    }

    /// Overwrite an item's quantity; below 1 removes it.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: i64) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        let changed = next.set_quantity(item_id, quantity)?;
        self.commit(next)?;
        tracing::debug!(item_id = %item_id, quantity, changed, "cart quantity set");
        Ok(())
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.commit(Cart::new())?;
        tracing::debug!("cart cleared");
        Ok(())
    }

    /// Copy of the current line items.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.cart.items().to_vec()
    }

    /// Read-only view of the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of quantities, for cart badges.
    pub fn count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Current pricing breakdown.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        PricingEngine::price(self.cart.items())
    }

    fn commit(&mut self, next: Cart) -> Result<(), CommerceError> {
        self.store.set(keys::CART, &next)?;
        self.cart = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        let items = self.cart.items();
        for listener in &self.listeners {
            listener(items);
        }
    }
}

fn read_cart(store: &Store) -> Cart {
    let items: Vec<LineItem> = store.load_or_default(keys::CART);
    let (cart, repaired) = Cart::from_items(items);
    if repaired {
        tracing::warn!("persisted cart violated cart invariants and was repaired");
    }
    cart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flaky_store, FlakyBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn add_espresso(cart: &mut CartStore) {
        cart.add("espresso", "Espresso", Money::new(180), "images/espresso.jpg", "coffee")
            .unwrap();
    }

    #[test]
    fn test_load_empty_store() {
        let cart = CartStore::load(Store::in_memory());
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_add_twice_gives_quantity_two() {
        let mut cart = CartStore::load(Store::in_memory());
        add_espresso(&mut cart);
        add_espresso(&mut cart);

        let items = cart.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let store = Store::in_memory();
        let mut cart = CartStore::load(store.clone());
        add_espresso(&mut cart);
        cart.add_catalog_item(&PriceCatalog::standard(), "latte").unwrap();

        // A second reader sees the same state without any explicit save
        let other = CartStore::load(store.clone());
        assert_eq!(other.snapshot(), cart.snapshot());

        cart.set_quantity(&ItemId::new("latte"), 3).unwrap();
        assert_eq!(CartStore::load(store.clone()).count(), 4);

        cart.remove(&ItemId::new("espresso")).unwrap();
        assert_eq!(CartStore::load(store.clone()).count(), 3);

        cart.clear().unwrap();
        assert!(CartStore::load(store.clone()).is_empty());
        assert_eq!(store.get::<Vec<LineItem>>(keys::CART).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        let mut cart = CartStore::load(Store::in_memory());
        add_espresso(&mut cart);
        cart.set_quantity(&ItemId::new("espresso"), 0).unwrap();
        assert!(cart.is_empty());

        add_espresso(&mut cart);
        cart.set_quantity(&ItemId::new("espresso"), -1).unwrap();
        assert!(cart.cart().get(&ItemId::new("espresso")).is_none());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartStore::load(Store::in_memory());
        add_espresso(&mut cart);
        cart.remove(&ItemId::new("mocha")).unwrap();
        cart.set_quantity(&ItemId::new("mocha"), 5).unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let store = Store::in_memory();
        store.set(keys::CART, &serde_json::json!({"oops": true})).unwrap();
        assert!(CartStore::load(store).is_empty());
    }

    #[test]
    fn test_unknown_catalog_item_rejected() {
        let mut cart = CartStore::load(Store::in_memory());
        let result = cart.add_catalog_item(&PriceCatalog::standard(), "chai");
        assert!(matches!(result, Err(CommerceError::UnknownItem(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_listeners_see_every_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last_count = Arc::new(AtomicUsize::new(0));

        let mut cart = CartStore::load(Store::in_memory());
        {
            let calls = Arc::clone(&calls);
            let last_count = Arc::clone(&last_count);
            cart.subscribe(move |items| {
                calls.fetch_add(1, Ordering::SeqCst);
                let count: i64 = items.iter().map(|i| i.quantity).sum();
                last_count.store(count as usize, Ordering::SeqCst);
            });
        }

        add_espresso(&mut cart);
        add_espresso(&mut cart);
        cart.clear().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(last_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_write_leaves_cart_untouched() {
        let (store, backend): (Store, Arc<FlakyBackend>) = flaky_store();
        let mut cart = CartStore::load(store.clone());
        add_espresso(&mut cart);

        backend.fail_writes(true);
        assert!(matches!(
            cart.add("latte", "Latte", Money::new(260), "", "coffee"),
            Err(CommerceError::Storage(_))
        ));
        assert!(cart.clear().is_err());
        assert_eq!(cart.count(), 1);

        backend.fail_writes(false);
        assert_eq!(CartStore::load(store).snapshot(), cart.snapshot());
    }

    #[test]
    fn test_reload_picks_up_other_writer() {
        let store = Store::in_memory();
        let mut first = CartStore::load(store.clone());
        let mut second = CartStore::load(store.clone());

        add_espresso(&mut second);
        assert!(first.is_empty());

        first.reload();
        assert_eq!(first.count(), 1);
    }

    #[test]
    fn test_count_matches_sum_of_quantities() {
        let catalog = PriceCatalog::standard();
        let ids = ["espresso", "latte", "muffin", "donut"];
        let mut cart = CartStore::load(Store::in_memory());

        // Deterministic pseudo-random walk over add/remove/set
        let mut seed: u64 = 0x5eed;
        for _ in 0..400 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let id = ids[(seed >> 33) as usize % ids.len()];
            match (seed >> 40) % 4 {
                0 | 1 => cart.add_catalog_item(&catalog, id).unwrap(),
                2 => cart.remove(&ItemId::new(id)).unwrap(),
                _ => {
                    let q = ((seed >> 48) % 7) as i64 - 2;
                    cart.set_quantity(&ItemId::new(id), q).unwrap();
                }
            }

            let items = cart.snapshot();
            assert_eq!(cart.count(), items.iter().map(|i| i.quantity).sum::<i64>());
            assert!(items.iter().all(|i| i.quantity >= 1));
            let mut seen: Vec<&ItemId> = items.iter().map(|i| &i.id).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), items.len());
        }
    }
}
