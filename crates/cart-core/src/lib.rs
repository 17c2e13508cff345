//! # cart-core: Pure Business Logic for the Cart Store
//!
//! This crate is the **heart** of the cart store. It contains all cart
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Store Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Consumers (UI, tests)                        │   │
//! │  │    add_item ──► remove_item ──► state ──► subscribe            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cart-store (I/O layer)                       │   │
//! │  │    CartStore, StateSlot, JSON codec, listener set              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   cart    │  │  patch    │                  │   │
//! │  │   │ CartItem  │  │ CartState │  │ CartPatch │                  │   │
//! │  │   │ outcomes  │  │ mutations │  │  merge    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NOTIFICATION • PURE FUNCTIONS   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line-item and input types (CartItem, NewItem, outcomes)
//! - [`cart`] - The CartState snapshot and its mutations
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every mutation is deterministic over its inputs
//! 2. **No I/O**: Persistence and notification live in cart-store
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 4. **Typed Outcomes**: Mutations report applied vs. no-op as enum
//!    variants, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{AddOutcome, CartState, NewItem};
//!
//! let mut cart = CartState::new();
//! let coke = NewItem::new("Coca-Cola 330ml", 199);
//!
//! assert_eq!(cart.apply_add(&coke), AddOutcome::Added);
//! assert_eq!(cart.apply_add(&coke), AddOutcome::Incremented);
//!
//! // Two units at $1.99 each
//! assert_eq!(cart.total_cents, 398);
//! assert_eq!(cart.items[0].quantity, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cart_core::CartState` instead of
// `use cart_core::cart::CartState`

pub use cart::CartState;
pub use types::{AddOutcome, CartItem, CartPatch, NewItem, RemoveOutcome};
