//! # Cart State
//!
//! The in-memory cart snapshot and its mutations.
//!
//! ## Per-Item State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Item Lifecycle (per name, driven by add/remove)            │
//! │                                                                         │
//! │              add             add              add                       │
//! │   ┌────────┐────►┌────────┐────►┌────────┐────► ...                    │
//! │   │ absent │     │ qty=1  │     │ qty=2  │                             │
//! │   └────────┘◄────└────────┘◄────└────────┘◄──── ...                    │
//! │              remove          remove           remove                    │
//! │                                                                         │
//! │   remove on absent: no-op (NotFound), state untouched                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `total_cents` equals the sum of every item's `line_total_cents`
//!   after each completed mutation
//! - Every item's `line_total_cents` equals `unit_price_cents * quantity`
//! - Items are unique by `name`; quantity is always >= 1 while present
//!
//! Shallow merges via [`CartState::merge`] can deliberately break the
//! totals invariant (a patch may set any total); the mutation entry
//! points always commit consistent snapshots.

use serde::{Deserialize, Serialize};

use crate::types::{AddOutcome, CartItem, CartPatch, NewItem, RemoveOutcome};

/// The full cart snapshot: ordered line items plus a running total.
///
/// Items keep insertion order. Re-adding an existing name bumps the
/// item in place, it does not move it to the back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Line items, unique by name, in insertion order
    pub items: Vec<CartItem>,

    /// Running total in cents
    pub total_cents: i64,
}

impl CartState {
    /// Creates an empty cart: no items, zero total.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// - Name already present: quantity increases by 1, the line total is
    ///   recomputed from the item's frozen unit price, and one frozen unit
    ///   price is added to the running total. The incoming price is
    ///   ignored for existing items; the price freezes on first add.
    /// - Name absent: a new line item is appended with quantity 1.
    ///
    /// No input validation: empty names and negative prices are accepted.
    pub fn apply_add(&mut self, new_item: &NewItem) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == new_item.name) {
            item.set_quantity(item.quantity + 1);
            self.total_cents += item.unit_price_cents;
            return AddOutcome::Incremented;
        }

        self.total_cents += new_item.unit_price_cents;
        self.items
            .push(CartItem::new(new_item.name.clone(), new_item.unit_price_cents));
        AddOutcome::Added
    }

    /// Removes one unit of the named product from the cart.
    ///
    /// ## Behavior
    /// - Name absent: no-op, returns [`RemoveOutcome::NotFound`]
    /// - Quantity > 1: quantity decreases by 1, line total recomputed,
    ///   one unit price subtracted from the running total
    /// - Quantity == 1: the line item is dropped entirely
    pub fn apply_remove(&mut self, name: &str) -> RemoveOutcome {
        let Some(index) = self.items.iter().position(|i| i.name == name) else {
            return RemoveOutcome::NotFound;
        };

        let unit_price = self.items[index].unit_price_cents;
        self.total_cents -= unit_price;

        if self.items[index].quantity > 1 {
            let quantity = self.items[index].quantity;
            self.items[index].set_quantity(quantity - 1);
            RemoveOutcome::Decremented
        } else {
            self.items.remove(index);
            RemoveOutcome::Removed
        }
    }

    /// Shallow-merges a patch into this state.
    ///
    /// Only fields present in the patch are touched, and each is replaced
    /// wholesale (see [`CartPatch`] for the exact contract).
    pub fn merge(&mut self, patch: CartPatch) {
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(total_cents) = patch.total_cents {
            self.total_cents = total_cents;
        }
    }

    /// Looks up a line item by exact name.
    pub fn find(&self, name: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Returns the number of unique line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Recomputes the total from line items, ignoring `total_cents`.
    ///
    /// Useful for asserting the totals invariant; the stored running
    /// total is authoritative for display.
    pub fn computed_total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents).sum()
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
