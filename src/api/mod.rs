//! # PokéAPI Client Layer
//!
//! Trait and implementations for talking to the PokéAPI.
//!
//! - [`PokemonApi`] - Core trait: one page of summaries, one full record
//! - [`HttpPokemonApi`] - Production client over `reqwest`
//! - [`MockPokemonApi`] - In-memory dataset with failure injection (tests, `--demo`)
//!
//! ## Failure model
//!
//! | Response | Error |
//! |----------|-------|
//! | 404 on a detail request | [`PokedexError::NotFound`] |
//! | any other non-2xx | [`PokedexError::Network`] (carries the status) |
//! | connection / TLS / timeout | [`PokedexError::Transport`] |
//! | body does not match the schema | [`PokedexError::Decode`] / [`PokedexError::InvalidRecord`] |
//!
//! Nothing here retries; callers decide what a failure means.
//!
//! [`PokedexError::NotFound`]: crate::error::PokedexError::NotFound
//! [`PokedexError::Network`]: crate::error::PokedexError::Network
//! [`PokedexError::Transport`]: crate::error::PokedexError::Transport
//! [`PokedexError::Decode`]: crate::error::PokedexError::Decode
//! [`PokedexError::InvalidRecord`]: crate::error::PokedexError::InvalidRecord

mod http;
mod mock;

pub use http::HttpPokemonApi;
pub use mock::MockPokemonApi;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::model::{DetailRecord, ListEntry};

#[async_trait]
pub trait PokemonApi: Send + Sync {
    /// Client name for logs ("http", "mock")
    fn name(&self) -> &str;

    /// One page of summaries starting at `offset`
    async fn fetch_listing(&self, offset: u32, limit: u32) -> Result<Vec<ListEntry>>;

    /// Full record by name or dex number.
    ///
    /// Names are matched case-insensitively: the identifier is lowercased
    /// before the request goes out.
    async fn fetch_detail(&self, identifier: &str) -> Result<DetailRecord>;
}

/// Build the client selected by the configuration
pub fn create_api(config: &Config) -> Result<Arc<dyn PokemonApi>> {
    if config.demo {
        tracing::info!(client = "mock", "Using bundled demo dataset");
        return Ok(Arc::new(MockPokemonApi::demo()));
    }
    tracing::info!(client = "http", base = %config.api_url, "Using PokéAPI");
    Ok(Arc::new(HttpPokemonApi::from_config(config)?))
}

/// Normalize a search term or card name into a request identifier
pub(crate) fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}
