//! The persisted shopping cart.
//!
//! [`CartStore`] is the single source of truth for the cart within a
//! session. The in-memory state (a pure [`CartState`] reducer) is
//! authoritative; durable storage is a best-effort mirror written on every
//! mutation and read once on open. A persistence failure is logged and never
//! rolls back an in-memory mutation.

mod state;

pub use state::{AddOutcome, CartLineItem, CartState};

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::catalog::ProductRecord;
use crate::error::report_absorbed;
use crate::storage::{Storage, keys};

/// Caller-misuse errors from cart operations.
///
/// Unlike storage and upstream failures, these are surfaced so the UI can
/// show an actionable message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The item offered to the cart carries no product identity.
    #[error("cannot add an item without a product identity")]
    MissingId,
}

/// The cart, with durable persistence.
pub struct CartStore {
    state: CartState,
    storage: Arc<dyn Storage>,
}

impl CartStore {
    /// Open the cart, rehydrating from durable storage.
    ///
    /// Never fails: an absent record yields an empty cart, and a malformed
    /// record is discarded (the corrupted blob is deleted) and likewise
    /// yields an empty cart.
    #[must_use]
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let state = match storage.get(keys::CART_ITEMS) {
            Ok(Some(blob)) => match serde_json::from_str::<CartState>(&blob) {
                Ok(state) => state,
                Err(e) => {
                    warn!(error = %e, "stored cart is corrupted, starting empty");
                    report_absorbed(&e);
                    if let Err(e) = storage.remove(keys::CART_ITEMS) {
                        warn!(error = %e, "failed to clear corrupted cart record");
                    }
                    CartState::new()
                }
            },
            Ok(None) => CartState::new(),
            Err(e) => {
                warn!(error = %e, "failed to read stored cart, starting empty");
                report_absorbed(&e);
                CartState::new()
            }
        };

        Self { state, storage }
    }

    /// Add a product to the cart as a quantity-1 line item.
    ///
    /// Adding a product already in the cart is a no-op and reports
    /// [`AddOutcome::AlreadyInCart`]; the state (and storage) are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingId`] if `record` has an empty identity.
    /// Callers are expected to validate before offering an item; an absent
    /// identity is caller misuse, not a degradable condition.
    pub fn add(&mut self, record: &ProductRecord) -> Result<AddOutcome, CartError> {
        if record.id.is_empty() {
            return Err(CartError::MissingId);
        }

        let outcome = self.state.add(CartLineItem::from_record(record));
        if outcome == AddOutcome::Added {
            self.persist();
        }
        Ok(outcome)
    }

    /// Remove the line item matching `id`. Absent ids are a no-op.
    ///
    /// Returns `true` if the cart changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let changed = self.state.remove(id);
        if changed {
            self.persist();
        }
        changed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    /// Count of distinct line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    /// Sum of `unit_price * quantity` across the cart, missing prices
    /// counting as zero.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.state.total_price()
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.state.items()
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Serialize the full current state to durable storage.
    ///
    /// Best-effort: a failure is logged and captured, and the in-memory
    /// state stays authoritative for the rest of the session.
    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to serialize cart");
                report_absorbed(&e);
                return;
            }
        };

        if let Err(e) = self.storage.put(keys::CART_ITEMS, &blob) {
            warn!(error = %e, "failed to persist cart");
            report_absorbed(&e);
        }
    }
}
