mod config;
mod handlers;
mod logging;
mod platform;
mod router;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    config::load_env_file(Path::new(config::DEFAULT_ENV_FILE))?;

    // Fail here, before any client or handler exists
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    info!("Bot is starting...");
    platform::telegram::run(&config).await?;

    Ok(())
}
