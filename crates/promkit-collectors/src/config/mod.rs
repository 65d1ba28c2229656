//! Collector config loader (strict parsing).

pub mod schema;

use std::fs;

use promkit_core::error::{MetricsError, Result};

pub use schema::{CollectorConfig, Instrument, KindConfig, MetricsConfig, SeedValue, SoakConfig};

pub fn load_from_file(path: &str) -> Result<MetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MetricsConfig> {
    let cfg: MetricsConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
