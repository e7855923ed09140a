use std::sync::OnceLock;

use clap::ValueEnum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// human readable
    #[default]
    Text,
    /// one JSON object per event
    Json,
}

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber.
/// Filter comes from `RUST_LOG`, defaulting to `info`. Output goes to stderr
/// so stdout stays machine readable. Calling it again is a no-op.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }
    let _ = INIT.set(());
    Ok(())
}
