//! Generic collector: identity metadata, label validation, and the shared
//! `MetricCollector` capability trait.

use std::fmt;

use promkit_core::error::{MetricsError, Result};
use promkit_core::{IntoLabelSet, LabelKeyedStore, LabelSet};

/// Label name reserved for infrastructure-assigned identity.
pub const RESERVED_LABEL: &str = "job";
/// Prefix reserved for internal use.
pub const RESERVED_PREFIX: &str = "__";

pub fn is_reserved_label(name: &str) -> bool {
    name == RESERVED_LABEL || name.starts_with(RESERVED_PREFIX)
}

/// Reject any label set that uses a reserved name.
pub fn validate_labels(labels: &LabelSet) -> Result<()> {
    match labels.names().find(|n| is_reserved_label(n)) {
        Some(name) => Err(MetricsError::InvalidLabels(format!("reserved label name {name:?}"))),
        None => Ok(()),
    }
}

/// Metric names follow `[a-zA-Z_:][a-zA-Z0-9_:]*`.
pub fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(MetricsError::InvalidName(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Untyped,
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Untyped => "untyped",
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an exposition or registry layer needs from any collector.
pub trait MetricCollector: Send + Sync {
    fn name(&self) -> &str;
    fn help_text(&self) -> &str;
    fn const_labels(&self) -> &LabelSet;
    fn kind(&self) -> MetricKind;
    fn set_value(&self, labels: &LabelSet, value: f64) -> Result<()>;
    fn get_value(&self, labels: &LabelSet) -> Result<f64>;
    fn get_all(&self) -> Vec<(LabelSet, f64)>;
}

/// Named, documented measurement point holding one value per label set.
#[derive(Debug)]
pub struct Collector {
    name: String,
    help_text: String,
    const_labels: LabelSet,
    values: LabelKeyedStore<f64>,
}

impl Collector {
    pub fn new(
        name: impl Into<String>,
        help_text: impl Into<String>,
        const_labels: impl IntoLabelSet,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let const_labels = const_labels.into_label_set()?;
        validate_labels(&const_labels)?;

        tracing::debug!(name = %name, const_labels = %const_labels, "collector created");
        Ok(Self {
            name,
            help_text: help_text.into(),
            const_labels,
            values: LabelKeyedStore::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn const_labels(&self) -> &LabelSet {
        &self.const_labels
    }

    /// Validated conversion of call-site labels.
    pub(crate) fn labels(&self, labels: impl IntoLabelSet) -> Result<LabelSet> {
        let labels = labels.into_label_set()?;
        if let Err(e) = validate_labels(&labels) {
            tracing::debug!(metric = %self.name, labels = %labels, "rejected labels");
            return Err(e);
        }
        Ok(labels)
    }

    /// Overwrite the value for `labels`. Last write wins.
    pub fn set_value(&self, labels: impl IntoLabelSet, value: f64) -> Result<()> {
        let labels = self.labels(labels)?;
        self.values.set(labels, value)
    }

    pub fn get_value(&self, labels: impl IntoLabelSet) -> Result<f64> {
        let labels = self.labels(labels)?;
        self.values.get(labels)
    }

    /// Atomically add `delta` to the value for `labels`, starting from 0.
    pub(crate) fn add_value(&self, labels: LabelSet, delta: f64) -> Result<f64> {
        self.values
            .update(labels, |cur| cur.copied().unwrap_or(0.0) + delta)
    }

    /// Drop one label combination, returning its last value.
    pub fn remove(&self, labels: impl IntoLabelSet) -> Result<Option<f64>> {
        let labels = self.labels(labels)?;
        self.values.remove(labels)
    }

    pub fn get_all(&self) -> Vec<(LabelSet, f64)> {
        self.values.all()
    }

    /// Number of distinct label combinations recorded.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl MetricCollector for Collector {
    fn name(&self) -> &str {
        &self.name
    }
    fn help_text(&self) -> &str {
        &self.help_text
    }
    fn const_labels(&self) -> &LabelSet {
        &self.const_labels
    }
    fn kind(&self) -> MetricKind {
        MetricKind::Untyped
    }
    fn set_value(&self, labels: &LabelSet, value: f64) -> Result<()> {
        Collector::set_value(self, labels, value)
    }
    fn get_value(&self, labels: &LabelSet) -> Result<f64> {
        Collector::get_value(self, labels)
    }
    fn get_all(&self) -> Vec<(LabelSet, f64)> {
        Collector::get_all(self)
    }
}
