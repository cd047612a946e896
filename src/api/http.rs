//! PokéAPI client over HTTP
//!
//! Issues plain `GET` requests and maps status codes onto the crate's
//! error kinds. Payloads are decoded into explicit structs and validated
//! before they leave this module.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::{normalize_identifier, PokemonApi};
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::model::{DetailRecord, ListEntry, ListingPage};

pub struct HttpPokemonApi {
    /// HTTP client
    client: reqwest::Client,
    /// API root, e.g. `https://pokeapi.co/api/v2`
    base: Url,
}

impl HttpPokemonApi {
    /// Create a client against `base_url` with transport defaults
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base: parse_base(base_url)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: parse_base(&config.api_url)?,
        })
    }

    /// `{base}/pokemon`, with an optional extra path segment
    fn pokemon_url(&self, segment: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon");
            if let Some(segment) = segment {
                segments.push(segment);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(client = "http", status = %status, url = %url, "PokéAPI error");
            return Err(PokedexError::Network {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PokedexError::Decode {
            url: url.to_string(),
            details: e.to_string(),
        })
    }
}

fn parse_base(base_url: &str) -> Result<Url> {
    let base = Url::parse(base_url).map_err(|e| PokedexError::Config {
        reason: format!("invalid api url '{}': {}", base_url, e),
    })?;
    if base.cannot_be_a_base() {
        return Err(PokedexError::Config {
            reason: format!("api url '{}' cannot carry a path", base_url),
        });
    }
    Ok(base)
}

#[async_trait]
impl PokemonApi for HttpPokemonApi {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_listing(&self, offset: u32, limit: u32) -> Result<Vec<ListEntry>> {
        let mut url = self.pokemon_url(None);
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        tracing::debug!(client = "http", offset, limit, "Fetching listing");

        let page: ListingPage = self.get_json(url).await?;
        for entry in &page.results {
            entry.validate()?;
        }
        Ok(page.results)
    }

    async fn fetch_detail(&self, identifier: &str) -> Result<DetailRecord> {
        let id = normalize_identifier(identifier);
        // Dot segments collapse into the listing path; no record has such a name
        if matches!(id.as_str(), "" | "." | "..") {
            return Err(PokedexError::NotFound { identifier: id });
        }
        let url = self.pokemon_url(Some(&id));

        tracing::debug!(client = "http", identifier = %id, "Fetching detail");

        let record: DetailRecord = match self.get_json(url).await {
            Err(PokedexError::Network { status: 404, .. }) => {
                return Err(PokedexError::NotFound { identifier: id });
            }
            other => other?,
        };
        record.validate()?;
        Ok(record)
    }
}
