//! Top-level facade crate for promkit.
//!
//! Re-exports the core storage types and the collector family so users can
//! depend on a single crate.

pub mod core {
    pub use promkit_core::*;
}

pub mod collectors {
    pub use promkit_collectors::*;
}

pub use promkit_collectors::{Collector, Counter, Gauge, MetricCollector, MetricKind};
pub use promkit_core::{IntoLabelSet, LabelKeyedStore, LabelSet, MetricsError, Result};
