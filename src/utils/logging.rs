// Logging setup

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber
/// Level comes from RUST_LOG, falling back to `info`
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| format!("failed to initialise logging: {}", e))?;

    info!("logging initialised");
    Ok(())
}
