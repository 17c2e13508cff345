//! # Store Error Types
//!
//! Errors for the store layer.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cart-core                                                              │
//! │  └── (none)           - Mutations cannot fail; outcomes are enums      │
//! │                                                                         │
//! │  cart-store (this file)                                                 │
//! │  └── StoreError       - Slot I/O and codec failures                    │
//! │                                                                         │
//! │  Flow: std::io::Error / serde_json::Error → StoreError → caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Keep the source error attached for context
//! 3. Errors are enum variants, never String
//!
//! `Corrupt` deserves a note: it is *constructed* when a persisted value
//! fails to decode, but [`crate::CartStore::open`] deliberately does not
//! return it — a bad value is logged and replaced by the initial state.
//! The variant exists so slot implementations and future callers have a
//! typed name for the condition.

use thiserror::Error;

/// Store-layer errors: slot I/O and codec failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the durable slot failed.
    #[error("slot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory state could not be encoded for persistence.
    ///
    /// ## When This Occurs
    /// Practically never for the cart schema; kept typed so a future
    /// schema change cannot silently panic here.
    #[error("failed to encode cart state: {0}")]
    Encode(#[source] serde_json::Error),

    /// The persisted value exists but is not a valid cart state.
    ///
    /// ## When This Occurs
    /// - The slot file was hand-edited or truncated
    /// - An older incompatible schema is still on disk
    #[error("persisted cart state is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let decode_err = serde_json::from_str::<i64>("not json").unwrap_err();
        let err = StoreError::Corrupt(decode_err);
        assert!(err.to_string().starts_with("persisted cart state is corrupt"));
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
