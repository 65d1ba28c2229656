//! promkit core: label sets, label-keyed storage, and the shared error type.
//!
//! This crate carries no runtime or config dependencies so the storage layer
//! can be reused by any collector family.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `MetricsError`/`Result` so instrumented processes never crash
//! on a bad label mapping.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod labels;
pub mod store;

/// Shared result type.
pub use error::{ErrorCode, MetricsError, Result};
pub use labels::{IntoLabelSet, LabelSet};
pub use store::LabelKeyedStore;
