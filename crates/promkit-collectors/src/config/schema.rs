use std::collections::HashSet;

use serde::Deserialize;
use promkit_core::error::{MetricsError, Result};
use promkit_core::LabelSet;

use crate::collector::{validate_labels, validate_name, Collector, MetricCollector};
use crate::counter::Counter;
use crate::gauge::Gauge;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub collectors: Vec<CollectorConfig>,

    #[serde(default)]
    pub soak: SoakConfig,
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.collectors.is_empty() {
            return Err(MetricsError::Config("collectors must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for c in &self.collectors {
            if !seen.insert(c.name.as_str()) {
                return Err(MetricsError::Config(format!(
                    "duplicate collector name: {}",
                    c.name
                )));
            }
            c.validate()?;
        }

        self.soak.validate()?;

        Ok(())
    }

    /// Build every declared collector and apply its seed values.
    pub fn instantiate(&self) -> Result<Vec<Instrument>> {
        self.collectors.iter().map(CollectorConfig::instantiate).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub name: String,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub kind: KindConfig,

    #[serde(default)]
    pub const_labels: LabelSet,

    #[serde(default)]
    pub seed: Vec<SeedValue>,
}

impl CollectorConfig {
    /// Name and const-label checks, so bad declarations fail at load time.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
            .and_then(|_| validate_labels(&self.const_labels))
            .map_err(|e| MetricsError::Config(format!("collector {}: {e}", self.name)))
    }

    pub fn instantiate(&self) -> Result<Instrument> {
        let help = self.help.as_str();
        let labels = &self.const_labels;
        let inst = match self.kind {
            KindConfig::Counter => Instrument::Counter(Counter::new(&self.name, help, labels)?),
            KindConfig::Gauge => Instrument::Gauge(Gauge::new(&self.name, help, labels)?),
            KindConfig::Untyped => Instrument::Untyped(Collector::new(&self.name, help, labels)?),
        };

        for s in &self.seed {
            inst.as_collector().set_value(&s.labels, s.value).map_err(|e| {
                MetricsError::Config(format!("seed failed (collector={}): {e}", self.name))
            })?;
        }
        Ok(inst)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KindConfig {
    Counter,
    Gauge,
    #[default]
    Untyped,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedValue {
    #[serde(default)]
    pub labels: LabelSet,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoakConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_iterations")]
    pub iterations: u64,
}

impl Default for SoakConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            iterations: default_iterations(),
        }
    }
}

impl SoakConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=256).contains(&self.workers) {
            return Err(MetricsError::Config(
                "soak.workers must be between 1 and 256".into(),
            ));
        }
        if !(1..=1_000_000).contains(&self.iterations) {
            return Err(MetricsError::Config(
                "soak.iterations must be between 1 and 1000000".into(),
            ));
        }
        Ok(())
    }
}

fn default_workers() -> usize {
    8
}
fn default_iterations() -> u64 {
    1000
}

/// A config-declared collector of a concrete kind.
#[derive(Debug)]
pub enum Instrument {
    Counter(Counter),
    Gauge(Gauge),
    Untyped(Collector),
}

impl Instrument {
    pub fn as_collector(&self) -> &dyn MetricCollector {
        match self {
            Instrument::Counter(c) => c,
            Instrument::Gauge(g) => g,
            Instrument::Untyped(c) => c,
        }
    }
}
