//! # cart-store: Persistence and Notification for the Cart
//!
//! The store layer: owns the live cart state, persists every commit to a
//! durable key-value slot, and notifies subscribers synchronously.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Store Architecture                            │
//! │                                                                         │
//! │   Consumers ──► ops::add_item / ops::remove_item  (mutations)           │
//! │             ──► CartStore::state                  (snapshots)           │
//! │             ──► CartStore::subscribe              (notifications)       │
//! │                              │                                          │
//! │  ┌───────────────────────────▼─────────────────────────────────────┐   │
//! │  │               ★ cart-store (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   store   │  │   slot    │  │    ops    │  │   error   │   │   │
//! │  │   │ CartStore │  │ StateSlot │  │ add_item  │  │StoreError │   │   │
//! │  │   │ listeners │  │ file/mem  │  │remove_item│  │           │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  └───────────────────────────┬─────────────────────────────────────┘   │
//! │                              │                                          │
//! │                    cart-core (pure mutations, totals math)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_store::{add_item, remove_item, CartStore, MemorySlot, NewItem};
//! use cart_core::CartState;
//!
//! # fn main() -> Result<(), cart_store::StoreError> {
//! let store = CartStore::open(MemorySlot::new(), CartState::new())?;
//!
//! let id = store.subscribe(std::sync::Arc::new(|state: &CartState| {
//!     println!("cart total is now {} cents", state.total_cents);
//! }));
//!
//! add_item(&store, NewItem::new("Coca-Cola 330ml", 199))?;
//! add_item(&store, NewItem::new("Coca-Cola 330ml", 199))?;
//! remove_item(&store, "Coca-Cola 330ml")?;
//!
//! assert_eq!(store.state().total_cents, 199);
//! store.unsubscribe(id);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ops;
pub mod slot;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use ops::{add_item, remove_item};
pub use slot::{JsonFileSlot, MemorySlot, StateSlot};
pub use store::{CartStore, Listener, SubscriberId, STATE_KEY};

// Core types surface here too so consumers need only one dependency
pub use cart_core::{AddOutcome, CartItem, CartPatch, CartState, NewItem, RemoveOutcome};
