//! # Cart Store
//!
//! The owning component for cart state: mediates reads, commits, and
//! change notification.
//!
//! ## Commit Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    set_state(patch)                                     │
//! │                                                                         │
//! │   ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐         │
//! │   │ shallow  │───►│ encode   │───►│ persist  │───►│ notify   │         │
//! │   │ merge    │    │ to JSON  │    │ to slot  │    │ listeners│         │
//! │   └──────────┘    └──────────┘    └──────────┘    └──────────┘         │
//! │                                                                         │
//! │   merge + encode + persist run under the state lock; a failed          │
//! │   persist leaves the in-memory state unchanged and notifies nobody.    │
//! │   Listeners run after the lock is released, each with a clone of       │
//! │   the committed state, exactly once per commit.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! State and the listener set each sit behind a `Mutex`. Lock poisoning
//! only happens if store-internal code panics while holding a lock, so
//! it is treated as a bug and handled with `expect`.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use cart_core::{CartPatch, CartState};

use crate::error::{StoreError, StoreResult};
use crate::slot::StateSlot;

/// Fixed key the cart state is persisted under.
pub const STATE_KEY: &str = "cartState";

/// A change listener: called synchronously with the committed state.
///
/// Listeners are compared by `Arc` pointer identity; registering the
/// same `Arc` twice is deduplicated.
pub type Listener = Arc<dyn Fn(&CartState) + Send + Sync>;

/// Handle identifying one subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(SubscriberId, Listener)>,
}

/// The cart store: owns the live [`CartState`], persists every commit to
/// a [`StateSlot`] under [`STATE_KEY`], and notifies subscribers.
///
/// Construct one per application at startup and pass it to whoever needs
/// it; there is no implicit global instance.
pub struct CartStore<S: StateSlot> {
    slot: S,
    state: Mutex<CartState>,
    listeners: Mutex<ListenerSet>,
}

impl<S: StateSlot> CartStore<S> {
    /// Opens a store over a slot, loading any persisted state.
    ///
    /// ## Fallback Rules
    /// - Key never written: start from `initial` (logged at debug)
    /// - Value present but corrupt: start from `initial` (logged at
    ///   warn with the decode error). Corruption is swallowed here on
    ///   purpose: a cart is reconstructable by the user, and refusing to
    ///   start over a bad cache file would be a worse failure.
    /// - Slot I/O errors other than "missing" propagate.
    pub fn open(slot: S, initial: CartState) -> StoreResult<Self> {
        let state = match slot.read(STATE_KEY)? {
            None => {
                debug!("no persisted cart state, starting from initial");
                initial
            }
            Some(raw) => match decode_state(&raw) {
                Ok(state) => {
                    debug!(items = state.item_count(), "loaded persisted cart state");
                    state
                }
                Err(err) => {
                    warn!(%err, "persisted cart state unreadable, falling back to initial");
                    initial
                }
            },
        };

        Ok(CartStore {
            slot,
            state: Mutex::new(state),
            listeners: Mutex::new(ListenerSet::default()),
        })
    }

    /// Returns a snapshot of the current state.
    ///
    /// The snapshot is a clone; mutating it does not touch the store.
    pub fn state(&self) -> CartState {
        self.state.lock().expect("cart state mutex poisoned").clone()
    }

    /// Shallow-merges a patch, persists the result, notifies subscribers.
    ///
    /// ## Contract
    /// - Only top-level fields present in the patch are replaced, each
    ///   wholesale (see [`CartPatch`]); there is no deep merge.
    /// - Persistence happens on every call, even when the patch changes
    ///   nothing observable.
    /// - Every live listener is called exactly once with a clone of the
    ///   committed state, after the state lock is released. A listener
    ///   may call [`CartStore::state`] or re-subscribe without deadlock.
    /// - On a persist failure the in-memory state is left unchanged and
    ///   no listener runs.
    pub fn set_state(&self, patch: CartPatch) -> StoreResult<()> {
        let committed = {
            let mut state = self.state.lock().expect("cart state mutex poisoned");
            let mut merged = state.clone();
            merged.merge(patch);

            let encoded = serde_json::to_string(&merged).map_err(StoreError::Encode)?;
            self.slot.write(STATE_KEY, &encoded)?;

            *state = merged.clone();
            merged
        };

        debug!(
            items = committed.item_count(),
            total_cents = committed.total_cents,
            "cart state committed"
        );
        self.notify(&committed);
        Ok(())
    }

    /// Registers a listener; returns the id to unsubscribe with.
    ///
    /// Registering the same `Arc` again returns the existing id without
    /// adding a second entry, so one commit still notifies it once.
    pub fn subscribe(&self, listener: Listener) -> SubscriberId {
        let mut set = self.listeners.lock().expect("listener set mutex poisoned");

        if let Some((id, _)) = set.entries.iter().find(|(_, l)| Arc::ptr_eq(l, &listener)) {
            return *id;
        }

        let id = SubscriberId(set.next_id);
        set.next_id += 1;
        set.entries.push((id, listener));
        debug!(subscriber = id.0, "listener subscribed");
        id
    }

    /// Removes a listener. Unknown ids are a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut set = self.listeners.lock().expect("listener set mutex poisoned");
        set.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .expect("listener set mutex poisoned")
            .entries
            .len()
    }

    fn notify(&self, state: &CartState) {
        // Snapshot the listener set first so a listener that subscribes
        // or unsubscribes mid-notification cannot deadlock or invalidate
        // the iteration. No ordering is guaranteed among listeners.
        let listeners: Vec<Listener> = {
            let set = self.listeners.lock().expect("listener set mutex poisoned");
            set.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in listeners {
            listener(state);
        }
    }
}

fn decode_state(raw: &str) -> StoreResult<CartState> {
    serde_json::from_str(raw).map_err(StoreError::Corrupt)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;
    use cart_core::{CartItem, NewItem};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn open_empty(slot: MemorySlot) -> CartStore<MemorySlot> {
        CartStore::open(slot, CartState::new()).unwrap()
    }

    #[test]
    fn test_open_empty_slot_uses_initial() {
        init_tracing();
        let store = open_empty(MemorySlot::new());

        let state = store.state();
        assert!(state.is_empty());
        assert_eq!(state.total_cents, 0);
    }

    #[test]
    fn test_open_with_custom_initial_state() {
        let mut initial = CartState::new();
        initial.apply_add(&NewItem::new("preloaded", 500));

        let store = CartStore::open(MemorySlot::new(), initial).unwrap();

        assert_eq!(store.state().item_count(), 1);
        assert_eq!(store.state().total_cents, 500);
    }

    #[test]
    fn test_set_state_persists_under_fixed_key() {
        let slot = MemorySlot::new();
        let store = open_empty(slot.clone());

        store
            .set_state(CartPatch::items(vec![CartItem::new("A", 1000)]))
            .unwrap();

        let raw = slot.read(STATE_KEY).unwrap().expect("value persisted");
        let decoded: CartState = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded.item_count(), 1);
        assert_eq!(decoded.find("A").unwrap().unit_price_cents, 1000);
    }

    #[test]
    fn test_reopen_sees_committed_state() {
        let slot = MemorySlot::new();
        {
            let store = open_empty(slot.clone());
            let mut state = store.state();
            state.apply_add(&NewItem::new("A", 1000));
            store.set_state(CartPatch::replace(state)).unwrap();
        }

        let reopened = open_empty(slot);
        assert_eq!(reopened.state().item_count(), 1);
        assert_eq!(reopened.state().total_cents, 1000);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_initial() {
        init_tracing();
        let slot = MemorySlot::new();
        slot.write(STATE_KEY, "{ this is not a cart").unwrap();

        let store = open_empty(slot);

        assert!(store.state().is_empty());
        assert_eq!(store.state().total_cents, 0);
    }

    #[test]
    fn test_wrong_schema_falls_back_to_initial() {
        let slot = MemorySlot::new();
        slot.write(STATE_KEY, r#"{"items": 42, "totalCents": "x"}"#).unwrap();

        let store = open_empty(slot);

        assert!(store.state().is_empty());
    }

    #[test]
    fn test_decode_state_names_corruption() {
        let err = decode_state("nope").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let store = open_empty(MemorySlot::new());

        let mut snapshot = store.state();
        snapshot.apply_add(&NewItem::new("A", 1000));

        assert!(store.state().is_empty());
    }

    #[test]
    fn test_set_state_of_current_state_is_observable_noop() {
        let store = open_empty(MemorySlot::new());
        let mut state = store.state();
        state.apply_add(&NewItem::new("A", 1000));
        store.set_state(CartPatch::replace(state)).unwrap();

        let before = store.state();
        store.set_state(CartPatch::replace(before.clone())).unwrap();

        assert_eq!(store.state(), before);
    }

    #[test]
    fn test_partial_patch_keeps_absent_fields() {
        let store = open_empty(MemorySlot::new());
        store
            .set_state(CartPatch::items(vec![CartItem::new("A", 1000)]))
            .unwrap();

        store.set_state(CartPatch::total_cents(1000)).unwrap();

        let state = store.state();
        assert_eq!(state.item_count(), 1);
        assert_eq!(state.total_cents, 1000);
    }

    #[test]
    fn test_listener_called_once_per_commit_with_committed_state() {
        let store = open_empty(MemorySlot::new());

        let seen: Arc<Mutex<Vec<CartState>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_in_listener = Arc::clone(&seen);
        store.subscribe(Arc::new(move |state: &CartState| {
            seen_in_listener.lock().unwrap().push(state.clone());
        }));

        store
            .set_state(CartPatch::items(vec![CartItem::new("A", 1000)]))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], store.state());
    }

    #[test]
    fn test_unsubscribed_listener_not_notified() {
        let store = open_empty(MemorySlot::new());

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_listener = Arc::clone(&calls);
        let id = store.subscribe(Arc::new(move |_: &CartState| {
            calls_in_listener.fetch_add(1, Ordering::SeqCst);
        }));

        store.set_state(CartPatch::total_cents(1)).unwrap();
        store.unsubscribe(id);
        store.set_state(CartPatch::total_cents(2)).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_subscribe_same_arc_is_deduplicated() {
        let store = open_empty(MemorySlot::new());

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_listener = Arc::clone(&calls);
        let listener: Listener = Arc::new(move |_: &CartState| {
            calls_in_listener.fetch_add(1, Ordering::SeqCst);
        });

        let first = store.subscribe(Arc::clone(&listener));
        let second = store.subscribe(listener);

        assert_eq!(first, second);
        assert_eq!(store.subscriber_count(), 1);

        store.set_state(CartPatch::total_cents(1)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_listeners_all_notified() {
        let store = open_empty(MemorySlot::new());

        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let calls_in_listener = Arc::clone(&calls);
            store.subscribe(Arc::new(move |_: &CartState| {
                calls_in_listener.fetch_add(1, Ordering::SeqCst);
            }));
        }

        store.set_state(CartPatch::total_cents(1)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_listener_may_read_state_during_notification() {
        let store = Arc::new(open_empty(MemorySlot::new()));

        let store_in_listener = Arc::clone(&store);
        let agreed = Arc::new(AtomicUsize::new(0));
        let agreed_in_listener = Arc::clone(&agreed);
        store.subscribe(Arc::new(move |state: &CartState| {
            // state() must not deadlock here and must match the payload
            if store_in_listener.state() == *state {
                agreed_in_listener.fetch_add(1, Ordering::SeqCst);
            }
        }));

        store.set_state(CartPatch::total_cents(7)).unwrap();
        assert_eq!(agreed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_noop() {
        let store = open_empty(MemorySlot::new());
        let id = store.subscribe(Arc::new(|_: &CartState| {}));
        store.unsubscribe(id);

        // Second removal of the same id changes nothing
        store.unsubscribe(id);
        assert_eq!(store.subscriber_count(), 0);
    }
}
