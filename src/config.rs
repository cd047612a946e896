//! Runtime configuration
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (`--api-url`, `--timeout`, ...)
//! 2. Environment variables (`POKEDEX_API_URL`, `POKEDEX_SPRITE_URL`, `POKEDEX_TIMEOUT_SECS`)
//! 3. Defaults

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{PokedexError, Result};

/// Public PokéAPI v2 endpoint
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Sprite hosting convention, keyed by national dex number
pub const DEFAULT_SPRITE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Cards per page
pub const PAGE_SIZE: u32 = 24;

/// How long an error banner stays up
pub const ERROR_DISPLAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub sprite_url: String,
    /// `None` keeps the transport default
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    /// Serve the bundled dataset instead of hitting the network
    pub demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            sprite_url: DEFAULT_SPRITE_URL.to_string(),
            request_timeout: None,
            log_file: std::env::temp_dir().join("pokedex.log"),
            demo: false,
        }
    }
}

impl Config {
    /// Merge with environment variables
    ///
    /// Environment variables take precedence over defaults.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup("POKEDEX_API_URL") {
            self.api_url = url;
        }
        if let Some(url) = lookup("POKEDEX_SPRITE_URL") {
            self.sprite_url = url;
        }
        if let Some(secs) = lookup("POKEDEX_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| PokedexError::Config {
                reason: format!("POKEDEX_TIMEOUT_SECS must be a whole number, got '{}'", secs),
            })?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Reject settings the client cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("api url", &self.api_url), ("sprite url", &self.sprite_url)] {
            let parsed = Url::parse(value).map_err(|e| PokedexError::Config {
                reason: format!("invalid {} '{}': {}", name, value, e),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(PokedexError::Config {
                    reason: format!("{} must be http(s), got '{}'", name, value),
                });
            }
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(PokedexError::Config {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Sprite image address for a dex number
    pub fn sprite_for(&self, id: u32) -> String {
        format!("{}/{}.png", self.sprite_url.trim_end_matches('/'), id)
    }
}
