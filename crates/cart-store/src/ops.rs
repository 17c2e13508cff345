//! # Mutation Entry Points
//!
//! The two free functions callers mutate the cart through. Everything
//! else on the store is read-only (`state`) or plumbing (`set_state`,
//! `subscribe`); these functions are where cart semantics meet the
//! commit pipeline.
//!
//! Both follow the same shape: snapshot, apply the pure cart-core
//! mutation, commit the full recomputed state as one `set_state` call.
//! One call, one persist, one notification round.
//!
//! The store serializes commits internally, but a read-modify-write
//! here is not atomic against another writer between the snapshot and
//! the commit. With the intended single-writer usage that window is
//! unobservable; multi-writer hosts should funnel all mutations through
//! one owner of the store.

use tracing::debug;

use cart_core::{AddOutcome, CartPatch, NewItem, RemoveOutcome};

use crate::error::StoreResult;
use crate::slot::StateSlot;
use crate::store::CartStore;

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Name already in the cart: quantity +1, line total recomputed, one
///   frozen unit price added to the running total
/// - Name not in the cart: appended with quantity 1
///
/// The commit persists and notifies subscribers exactly once. No input
/// validation is applied.
pub fn add_item<S: StateSlot>(store: &CartStore<S>, new_item: NewItem) -> StoreResult<AddOutcome> {
    debug!(name = %new_item.name, unit_price_cents = new_item.unit_price_cents, "add_item");

    let mut state = store.state();
    let outcome = state.apply_add(&new_item);
    store.set_state(CartPatch::replace(state))?;
    Ok(outcome)
}

/// Removes one unit of the named product from the cart.
///
/// ## Behavior
/// - Name not in the cart: returns `Ok(RemoveOutcome::NotFound)` without
///   persisting or notifying anybody
/// - Quantity > 1: quantity -1, one unit price subtracted from the total
/// - Quantity == 1: the line item is dropped entirely
pub fn remove_item<S: StateSlot>(store: &CartStore<S>, name: &str) -> StoreResult<RemoveOutcome> {
    debug!(name = %name, "remove_item");

    let mut state = store.state();
    let outcome = state.apply_remove(name);
    if outcome.is_noop() {
        return Ok(outcome);
    }

    store.set_state(CartPatch::replace(state))?;
    Ok(outcome)
}

// =============================================================================
// Unit Tests
// =============================================================================
