use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "TOKEN";

/// Default location of the optional env file.
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingToken(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub token: String,
}

// Keep the token out of log lines.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config").field("token", &"<redacted>").finish()
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    /// An empty token counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_VAR))?;

        Ok(Self { token })
    }
}

/// Populate the process environment from a `KEY=VALUE` file.
///
/// Variables already set in the environment win. A missing file is not an
/// error; a file that exists but cannot be parsed is.
pub fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            debug!("No env file at {}, using process environment", path.display());
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to load env file: {}", path.display()))
        }
    }
}
