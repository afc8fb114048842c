//! Pure cart state.
//!
//! The reducer owns the line-item sequence and nothing else - no storage, no
//! logging - so the transition logic is unit-testable without a persistence
//! dependency. [`super::CartStore`] wraps it with durability.

use serde::{Deserialize, Serialize};

use sole_supply_core::ProductId;

use crate::catalog::ProductRecord;

/// One row in the cart: a unique product and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Unique product identity. At most one line item per id exists in a cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price; a missing price counts as zero toward the cart total.
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Number of units, always at least 1.
    pub quantity: u32,
    /// Image URL for display.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLineItem {
    /// Build a quantity-1 line item from a catalog record.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            unit_price: Some(record.price),
            quantity: 1,
            image: record.image.clone(),
        }
    }

    /// Price contribution of this line: `unit_price * quantity`, with a
    /// missing price counting as zero.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

/// Result of an add operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended to the cart.
    Added,
    /// The cart already held a line item with this id; nothing changed.
    /// Quantity is deliberately not incremented on repeat adds.
    AlreadyInCart,
}

/// The ordered sequence of cart line items, insertion order preserved.
///
/// Serializes transparently as the bare line-item array - the exact shape
/// persisted to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless a line with the same id already exists.
    ///
    /// Repeat adds of a present id are a no-op, keeping the
    /// one-line-per-product invariant.
    pub fn add(&mut self, item: CartLineItem) -> AddOutcome {
        if self.contains(item.id.as_str()) {
            return AddOutcome::AlreadyInCart;
        }
        self.items.push(item);
        AddOutcome::Added
    }

    /// Remove every line matching `id` (at most one, by invariant).
    ///
    /// Returns `true` if the cart changed; an absent id is a no-op, not an
    /// error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_str() != id);
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// `true` if a line with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id.as_str() == id)
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Count of distinct line items (not the sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line totals across the cart.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// `true` when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, price: Option<f64>) -> CartLineItem {
        CartLineItem {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            unit_price: price,
            quantity: 1,
            image: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut cart = CartState::new();

        assert_eq!(cart.add(line("a", Some(100.0))), AddOutcome::Added);
        let after_first = cart.clone();

        assert_eq!(cart.add(line("a", Some(100.0))), AddOutcome::AlreadyInCart);
        assert_eq!(cart, after_first);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_repeat_add_does_not_bump_quantity() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(100.0)));
        cart.add(line("a", Some(100.0)));

        assert_eq!(cart.items().first().unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));
        let before = cart.clone();

        assert!(!cart.remove("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_present_id() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));
        cart.add(line("b", Some(20.0)));

        assert!(cart.remove("a"));
        assert!(!cart.contains("a"));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));
        cart.clear();

        assert!(cart.is_empty());
        assert!((cart.total_price() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_price() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));
        cart.add(line("b", Some(25.5)));

        assert!((cart.total_price() - 35.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));
        cart.add(line("b", None));

        assert!((cart.total_price() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartState::new();
        cart.add(line("b", None));
        cart.add(line("a", None));
        cart.add(line("c", None));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serde_shape_is_bare_array() {
        let mut cart = CartState::new();
        cart.add(line("a", Some(10.0)));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());

        let parsed: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cart);
    }
}
