//! promkit soak runner
//!
//! - Loads collectors from `PROMKIT_CONFIG` (default `promkit.yaml`)
//! - Hammers every counter/gauge from `soak.workers` concurrent workers
//! - Logs each collector's entries and fails on any lost update

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use promkit_collectors::{config, soak};

const DEFAULT_CONFIG: &str = "promkit.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("PROMKIT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    match run(&path).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "soak aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &str) -> promkit_core::Result<bool> {
    let cfg = config::load_from_file(path)?;
    let instruments = Arc::new(cfg.instantiate()?);

    tracing::info!(
        config = %path,
        collectors = instruments.len(),
        workers = cfg.soak.workers,
        iterations = cfg.soak.iterations,
        "promkit-soak starting"
    );

    let report = soak::run(Arc::clone(&instruments), &cfg.soak).await?;

    for inst in instruments.iter() {
        let c = inst.as_collector();
        let mut entries = c.get_all();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (labels, value) in entries {
            tracing::info!(
                collector = c.name(),
                kind = %c.kind(),
                const_labels = %c.const_labels(),
                labels = %labels,
                value,
                "entry"
            );
        }
    }

    if report.is_ok() {
        tracing::info!(expected_delta = report.expected_delta, "no lost updates");
    } else {
        for (name, expected, actual) in &report.mismatches {
            tracing::error!(collector = %name, expected, actual, "lost updates detected");
        }
    }
    Ok(report.is_ok())
}
