use chrono::Utc;
use tokio::sync::watch;

use crate::models::{CartEntry, CartItem, CartSnapshot};
use crate::storage::CartStorage;

/// In-memory shopping cart. Lines merge by product id, totals are computed
/// from the live items on every read, and each mutation publishes a fresh
/// snapshot to subscribers.
pub struct CartStore {
    items: Vec<CartItem>,
    snapshots: watch::Sender<CartSnapshot>,
    storage: Option<Box<dyn CartStorage>>,
}

impl CartStore {
    /// An empty cart with no persistence.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            snapshots: watch::Sender::new(CartSnapshot::empty()),
            storage: None,
        }
    }

    /// A cart restored from `storage`; every later mutation is written back
    /// to it. An unreadable saved cart is logged and treated as empty.
    pub fn with_storage(storage: impl CartStorage + 'static) -> Self {
        let items = match storage.load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved cart, starting empty");
                Vec::new()
            }
        };
        Self {
            snapshots: watch::Sender::new(snapshot_of(&items)),
            items,
            storage: Some(Box::new(storage)),
        }
    }

    /// Adds `quantity` units of a product. An existing line for the same id
    /// is merged by bumping its quantity; the line keeps the price captured
    /// when it was first added. Zero quantity is a no-op.
    pub fn add_item(&mut self, entry: CartEntry, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.id == entry.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => {
                tracing::debug!(id = %entry.id, quantity, "new cart line");
                self.items.push(CartItem {
                    id: entry.id,
                    name: entry.name,
                    price: entry.price,
                    image: entry.image,
                    quantity,
                    added_at: Utc::now(),
                });
            }
        }
        self.publish();
    }

    /// Drops a line entirely. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != before {
            self.publish();
        }
    }

    /// Sets the quantity of an existing line. Zero removes the line, and
    /// unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            if item.quantity != quantity {
                item.quantity = quantity;
                self.publish();
            }
        }
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        tracing::debug!("cart cleared");
        self.items.clear();
        self.publish();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        total_items_of(&self.items)
    }

    pub fn total_price(&self) -> i64 {
        total_price_of(&self.items)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        snapshot_of(&self.items)
    }

    /// A receiver that yields the cart state after every mutation. The value
    /// present at subscription time counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    fn publish(&mut self) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save(&self.items) {
                tracing::warn!(error = %err, "cart storage save failed");
            }
        }
        self.snapshots.send_replace(snapshot_of(&self.items));
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

fn total_items_of(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
}

fn total_price_of(items: &[CartItem]) -> i64 {
    items.iter().fold(0i64, |sum, item| {
        sum.saturating_add(item.price.saturating_mul(i64::from(item.quantity)))
    })
}

fn snapshot_of(items: &[CartItem]) -> CartSnapshot {
    CartSnapshot {
        items: items.to_vec(),
        total_items: total_items_of(items),
        total_price: total_price_of(items),
    }
}
