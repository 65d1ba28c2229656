//! Concurrent workload against config-declared collectors.
//!
//! Every worker increments each counter and gauge on its own label set and
//! on one shared label set. Afterwards the shared entries must equal
//! `baseline + workers * iterations`; anything else is a lost update.

use std::sync::Arc;

use promkit_core::error::{MetricsError, Result};
use promkit_core::LabelSet;

use crate::config::{Instrument, SoakConfig};

/// Label value every worker writes to.
pub const SHARED_WORKER: &str = "shared";

pub fn shared_labels() -> LabelSet {
    LabelSet::new([("worker", SHARED_WORKER)])
}

pub fn worker_labels(id: usize) -> LabelSet {
    LabelSet::new([("worker", id.to_string())])
}

#[derive(Debug, Default)]
pub struct SoakReport {
    /// Increments each shared entry was expected to receive.
    pub expected_delta: f64,
    /// `(collector, expected, actual)` for every shared entry that drifted.
    pub mismatches: Vec<(String, f64, f64)>,
}

impl SoakReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

fn drive(inst: &Instrument, own: &LabelSet, shared: &LabelSet) -> Result<()> {
    match inst {
        Instrument::Counter(c) => {
            c.inc(own)?;
            c.inc(shared)
        }
        Instrument::Gauge(g) => {
            g.inc(own)?;
            g.dec(own)?;
            g.inc(shared)
        }
        Instrument::Untyped(_) => Ok(()),
    }
}

fn shared_value(inst: &Instrument) -> f64 {
    let shared = shared_labels();
    let v = match inst {
        Instrument::Counter(c) => c.get(&shared),
        Instrument::Gauge(g) => g.get(&shared),
        Instrument::Untyped(_) => return 0.0,
    };
    v.unwrap_or(0.0)
}

/// Run `cfg.workers` blocking workers against `instruments` and check the
/// shared entries afterwards.
pub async fn run(instruments: Arc<Vec<Instrument>>, cfg: &SoakConfig) -> Result<SoakReport> {
    let baseline: Vec<f64> = instruments.iter().map(shared_value).collect();

    let mut handles = Vec::with_capacity(cfg.workers);
    for id in 0..cfg.workers {
        let instruments = Arc::clone(&instruments);
        let iterations = cfg.iterations;
        handles.push(tokio::task::spawn_blocking(move || -> Result<()> {
            let own = worker_labels(id);
            let shared = shared_labels();
            for _ in 0..iterations {
                for inst in instruments.iter() {
                    drive(inst, &own, &shared)?;
                }
            }
            tracing::debug!(worker = id, iterations, "soak worker done");
            Ok(())
        }));
    }

    for h in handles {
        h.await
            .map_err(|e| MetricsError::Internal(format!("soak worker failed: {e}")))??;
    }

    let expected_delta = cfg.workers as f64 * cfg.iterations as f64;
    let mut report = SoakReport { expected_delta, mismatches: Vec::new() };

    for (inst, base) in instruments.iter().zip(baseline) {
        if matches!(inst, Instrument::Untyped(_)) {
            continue;
        }
        let expected = base + expected_delta;
        let actual = shared_value(inst);
        if actual != expected {
            let name = inst.as_collector().name().to_string();
            tracing::warn!(collector = %name, expected, actual, "shared entry drifted");
            report.mismatches.push((name, expected, actual));
        }
    }

    Ok(report)
}
