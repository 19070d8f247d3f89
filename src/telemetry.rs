use crate::config::LogFormat;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Initialize tracing
pub fn init(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_default();

    // Decide on layers
    let reg = Registry::default().with(env_filter);
    match format {
        LogFormat::Compact => reg.with(tracing_subscriber::fmt::layer().compact()).init(),
        LogFormat::Json => reg.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}
