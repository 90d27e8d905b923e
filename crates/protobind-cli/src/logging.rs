//! Diagnostic output setup

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log_level` nor `RUST_LOG` is set
const DEFAULT_FILTER: &str = "warn";

/// Install a stderr fmt subscriber.
///
/// `level` takes precedence over `RUST_LOG`. Stdout is never written to.
pub fn init(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid --log_level `{level}`"))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, "keeping the already installed subscriber");
    }
    Ok(())
}

#[cfg(test)]
#[path = "logging/logging_tests.rs"]
mod logging_tests;
