//! tracing-subscriber bootstrap for hosts embedding the editor.

use anyhow::Context;
use foyeajx_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` wins over `filter` when set.
/// Calling this again after a subscriber exists is not an error.
pub fn init(filter: &str) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(filter)
            .with_context(|| format!("invalid log filter: {filter}"))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

pub fn init_from_config(config: &AppConfig) -> anyhow::Result<()> {
    init(&config.log_filter)
}
