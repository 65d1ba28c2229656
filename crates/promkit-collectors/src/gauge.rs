//! Gauge: a value that can go up or down.

use promkit_core::error::Result;
use promkit_core::{IntoLabelSet, LabelSet};

use crate::collector::{Collector, MetricCollector, MetricKind};

/// A collector whose per-label values move freely.
#[derive(Debug)]
pub struct Gauge {
    inner: Collector,
}

impl Gauge {
    pub fn new(
        name: impl Into<String>,
        help_text: impl Into<String>,
        const_labels: impl IntoLabelSet,
    ) -> Result<Self> {
        Ok(Self { inner: Collector::new(name, help_text, const_labels)? })
    }

    pub fn set(&self, labels: impl IntoLabelSet, value: f64) -> Result<()> {
        self.inner.set_value(labels, value)
    }

    pub fn get(&self, labels: impl IntoLabelSet) -> Result<f64> {
        self.inner.get_value(labels)
    }

    /// Add a signed delta. Unset label combinations start at 0.
    pub fn add(&self, labels: impl IntoLabelSet, delta: f64) -> Result<()> {
        let labels = self.inner.labels(labels)?;
        self.inner.add_value(labels, delta)?;
        Ok(())
    }

    pub fn sub(&self, labels: impl IntoLabelSet, delta: f64) -> Result<()> {
        self.add(labels, -delta)
    }

    /// Increment by 1.
    pub fn inc(&self, labels: impl IntoLabelSet) -> Result<()> {
        self.add(labels, 1.0)
    }

    /// Decrement by 1.
    pub fn dec(&self, labels: impl IntoLabelSet) -> Result<()> {
        self.sub(labels, 1.0)
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn help_text(&self) -> &str {
        self.inner.help_text()
    }

    pub fn const_labels(&self) -> &LabelSet {
        self.inner.const_labels()
    }

    /// Drop one label combination, returning its last value.
    pub fn remove(&self, labels: impl IntoLabelSet) -> Result<Option<f64>> {
        self.inner.remove(labels)
    }

    pub fn get_all(&self) -> Vec<(LabelSet, f64)> {
        self.inner.get_all()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl MetricCollector for Gauge {
    fn name(&self) -> &str {
        Self::name(self)
    }
    fn help_text(&self) -> &str {
        Self::help_text(self)
    }
    fn const_labels(&self) -> &LabelSet {
        Self::const_labels(self)
    }
    fn kind(&self) -> MetricKind {
        MetricKind::Gauge
    }
    fn set_value(&self, labels: &LabelSet, value: f64) -> Result<()> {
        self.set(labels, value)
    }
    fn get_value(&self, labels: &LabelSet) -> Result<f64> {
        self.get(labels)
    }
    fn get_all(&self) -> Vec<(LabelSet, f64)> {
        Self::get_all(self)
    }
}
