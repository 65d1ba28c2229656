//! promkit collectors library entry.
//!
//! Builds the collector family (generic collector, counter, gauge) on top of
//! the label-keyed store from `promkit-core`, plus a strict YAML loader that
//! declares collectors up front. Consumed by the soak binary (`main.rs`) and
//! by integration tests.

pub mod collector;
pub mod config;
pub mod counter;
pub mod gauge;
pub mod soak;

pub use collector::{Collector, MetricCollector, MetricKind};
pub use counter::Counter;
pub use gauge::Gauge;
