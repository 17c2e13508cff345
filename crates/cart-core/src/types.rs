//! # Cart Types
//!
//! Line-item and input types shared by the cart mutations and the store
//! layer.
//!
//! ## Serialized Schema
//! All types serialize with camelCase field names. The persisted value at
//! the slot boundary is the JSON encoding of [`crate::CartState`]:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "name": "Coca-Cola 330ml",
//!       "unitPriceCents": 199,
//!       "quantity": 2,
//!       "lineTotalCents": 398,
//!       "addedAt": "2025-01-15T10:30:00Z"
//!     }
//!   ],
//!   "totalCents": 398
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CartState;

// =============================================================================
// Cart Item
// =============================================================================

/// One line entry in the cart, keyed by name.
///
/// ## Design Notes
/// - `name`: The sole identity of the item within a cart. Matching is
///   case-sensitive and exact.
/// - `unit_price_cents`: Frozen at the time the item first enters the
///   cart. Re-adding the same name never rewrites it.
/// - `line_total_cents`: Stored rather than derived so the persisted
///   value is self-describing; mutations keep it equal to
///   `unit_price_cents * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Item name, the unique key within the cart
    pub name: String,

    /// Price in cents per unit, frozen when the item is first added
    pub unit_price_cents: i64,

    /// Quantity in cart, always >= 1 while the item is present
    pub quantity: i64,

    /// Line total in cents, kept equal to unit price × quantity
    pub line_total_cents: i64,

    /// When this item first entered the cart
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a fresh line item with quantity 1.
    pub fn new(name: impl Into<String>, unit_price_cents: i64) -> Self {
        CartItem {
            name: name.into(),
            unit_price_cents,
            quantity: 1,
            line_total_cents: unit_price_cents,
            added_at: Utc::now(),
        }
    }

    /// Sets the quantity and recomputes the stored line total.
    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.line_total_cents = self.unit_price_cents * quantity;
    }
}

// =============================================================================
// Mutation Input
// =============================================================================

/// Input to an add mutation: the name and unit price of the product
/// being added.
///
/// No validation is applied to either field. Empty names and negative
/// prices flow through unchanged; what to reject is the caller's call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// Item name, matched case-sensitively against cart contents
    pub name: String,

    /// Price in cents per unit
    pub unit_price_cents: i64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, unit_price_cents: i64) -> Self {
        NewItem {
            name: name.into(),
            unit_price_cents,
        }
    }
}

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// What an add mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1
    Added,

    /// An existing line item's quantity increased by 1
    Incremented,
}

/// What a remove mutation did to the cart.
///
/// `NotFound` is a successful no-op, not an error: removing an absent
/// name leaves the cart untouched and is never surfaced as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveOutcome {
    /// The item's last unit was removed and the line item dropped
    Removed,

    /// The item's quantity decreased by 1 and the line item remains
    Decremented,

    /// No item matched the name; the cart is unchanged
    NotFound,
}

impl RemoveOutcome {
    /// True when the mutation left the cart untouched.
    pub fn is_noop(self) -> bool {
        matches!(self, RemoveOutcome::NotFound)
    }
}

// =============================================================================
// Shallow-Merge Patch
// =============================================================================

/// A partial cart state for shallow-merge updates.
///
/// ## Merge Contract
/// Only top-level fields present in the patch are replaced, and they are
/// replaced **wholesale**: patching `items` swaps the entire vector, it
/// never merges per item. Absent fields keep their current value. There
/// is no deep merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPatch {
    /// Replacement for the whole items vector, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CartItem>>,

    /// Replacement for the running total, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cents: Option<i64>,
}

impl CartPatch {
    /// A patch that replaces every top-level field with the given state.
    ///
    /// Used by the mutation entry points to commit a fully recomputed
    /// snapshot in one merge.
    pub fn replace(state: CartState) -> Self {
        CartPatch {
            items: Some(state.items),
            total_cents: Some(state.total_cents),
        }
    }

    /// A patch that only replaces the items vector.
    pub fn items(items: Vec<CartItem>) -> Self {
        CartPatch {
            items: Some(items),
            total_cents: None,
        }
    }

    /// A patch that only replaces the running total.
    pub fn total_cents(total_cents: i64) -> Self {
        CartPatch {
            items: None,
            total_cents: Some(total_cents),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
