use chrono::Utc;
use coffeeverse_core::{
    CartStore, Catalog, JsonCartFile,
    models::{CartEntry, CartItem},
    storage::{CartStorage, StorageError},
};

// Cart semantics: merge-by-id, fresh totals, no residual state, snapshots.

#[test]
fn adding_the_same_product_twice_merges_into_one_line() {
    let catalog = Catalog::new();
    let latte = catalog.get("latte").unwrap();

    let mut cart = CartStore::new();
    cart.add_item(latte.cart_entry(), 1);
    cart.add_item(latte.cart_entry(), 1);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), 698);
}

#[test]
fn totals_recompute_from_the_live_items() {
    let mut cart = CartStore::new();
    cart.add_item(entry("latte", 349), 2);
    cart.add_item(entry("espresso", 199), 1);
    assert_eq!(cart.total_price(), 349 * 2 + 199);
    assert_eq!(cart.total_items(), 3);

    cart.update_quantity("latte", 1);
    assert_eq!(cart.total_price(), 349 + 199);
    assert_eq!(cart.total_items(), 2);

    cart.remove_item("espresso");
    assert_eq!(cart.total_price(), 349);
    assert_eq!(cart.total_items(), 1);
}

#[test]
fn readding_after_removal_starts_a_fresh_line() {
    let mut cart = CartStore::new();
    cart.add_item(entry("latte", 349), 2);
    cart.remove_item("latte");
    cart.add_item(entry("latte", 349), 3);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[test]
fn zero_quantity_update_removes_the_line() {
    let mut cart = CartStore::new();
    cart.add_item(entry("latte", 349), 2);
    cart.add_item(entry("mocha", 399), 1);

    cart.update_quantity("latte", 0);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].id, "mocha");
    assert!(cart.items().iter().all(|item| item.quantity >= 1));
}

#[test]
fn unknown_ids_and_zero_adds_are_ignored() {
    let mut cart = CartStore::new();
    cart.add_item(entry("latte", 349), 2);
    let mut updates = cart.subscribe();

    cart.remove_item("chai");
    cart.update_quantity("chai", 5);
    cart.add_item(entry("mocha", 399), 0);

    assert!(!updates.has_changed().unwrap());
    assert_eq!(cart.total_items(), 2);
}

#[test]
fn lines_keep_insertion_order_across_merges() {
    let mut cart = CartStore::new();
    cart.add_item(entry("cappuccino", 299), 1);
    cart.add_item(entry("latte", 349), 1);
    cart.add_item(entry("mocha", 399), 1);
    cart.add_item(entry("cappuccino", 299), 1);

    let ids: Vec<&str> = cart.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["cappuccino", "latte", "mocha"]);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn merged_lines_keep_the_price_captured_at_first_add() {
    let mut cart = CartStore::new();
    cart.add_item(entry("latte", 349), 1);
    cart.add_item(entry("latte", 999), 1);

    assert_eq!(cart.items()[0].price, 349);
    assert_eq!(cart.total_price(), 698);
}

#[test]
fn subscribers_see_every_mutation() {
    let mut cart = CartStore::new();
    let mut updates = cart.subscribe();
    assert!(!updates.has_changed().unwrap());

    cart.add_item(entry("latte", 349), 2);
    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.total_items, 2);
    assert_eq!(snapshot.total_price, 698);
    assert_eq!(snapshot.items.len(), 1);

    cart.clear();
    let snapshot = updates.borrow_and_update().clone();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_price, 0);
}

#[test]
fn clearing_an_empty_cart_publishes_nothing() {
    let mut cart = CartStore::new();
    let mut updates = cart.subscribe();
    cart.clear();
    assert!(!updates.has_changed().unwrap());
}

#[test]
fn cart_survives_a_restart_through_storage() {
    let path = std::env::temp_dir().join(format!("cart-restart-{}.json", uuid::Uuid::new_v4()));

    {
        let mut cart = CartStore::with_storage(JsonCartFile::new(&path));
        cart.add_item(entry("latte", 349), 2);
        cart.add_item(entry("beans-dark", 2199), 1);
    }

    let cart = CartStore::with_storage(JsonCartFile::new(&path));
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total_price(), 349 * 2 + 2199);
    assert_eq!(cart.snapshot().total_items, 3);

    std::fs::remove_file(&path).ok();
}

#[test]
fn failing_storage_never_corrupts_the_cart() {
    let mut cart = CartStore::with_storage(UnwritableStorage);
    cart.add_item(entry("latte", 349), 2);
    cart.update_quantity("latte", 3);

    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), 349 * 3);
}

#[test]
fn saved_cart_round_trips_item_fields() {
    let path = std::env::temp_dir().join(format!("cart-fields-{}.json", uuid::Uuid::new_v4()));
    let storage = JsonCartFile::new(&path);

    let items = vec![CartItem {
        id: "latte".into(),
        name: "Caramel Latte".into(),
        price: 349,
        image: "assets/coffee-latte.jpg".into(),
        quantity: 2,
        added_at: Utc::now(),
    }];
    storage.save(&items).unwrap();
    let loaded = storage.load().unwrap().unwrap();
    assert_eq!(loaded, items);

    std::fs::remove_file(&path).ok();
}

fn entry(id: &str, price: i64) -> CartEntry {
    CartEntry {
        id: id.to_owned(),
        name: id.to_owned(),
        price,
        image: format!("assets/{id}.jpg"),
    }
}

/// Storage with a broken disk: loads nothing, refuses every save.
struct UnwritableStorage;

impl CartStorage for UnwritableStorage {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        Ok(None)
    }

    fn save(&self, _items: &[CartItem]) -> Result<(), StorageError> {
        Err(std::io::Error::other("disk full").into())
    }
}
