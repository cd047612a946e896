//! PokéAPI data model
//!
//! Explicit schemas for the two payload shapes the client consumes:
//! the paginated listing (`/pokemon?offset=&limit=`) and the full
//! record (`/pokemon/{idOrName}`). Records are validated as they cross
//! the API boundary so the presentation layer never sees a half-formed one.

use serde::{Deserialize, Serialize};

use crate::error::{PokedexError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Listing
// ─────────────────────────────────────────────────────────────────────────────

/// Envelope returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<ListEntry>,
}

/// Summary record: a name plus the reference URL of the full record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

impl ListEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id taken from the trailing path segment of the reference URL.
    ///
    /// `https://pokeapi.co/api/v2/pokemon/25/` → `Some(25)`
    pub fn id(&self) -> Option<u32> {
        let segment = self.url.split('/').filter(|s| !s.is_empty()).last()?;
        let digits: String = segment.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PokedexError::InvalidRecord {
                details: format!("listing entry with empty name ({})", self.url),
            });
        }
        if self.id().is_none() {
            return Err(PokedexError::InvalidRecord {
                details: format!("listing entry '{}' has no id in url '{}'", self.name, self.url),
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail
// ─────────────────────────────────────────────────────────────────────────────

/// Full record for one Pokémon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    /// Hectograms
    pub weight: u32,
    /// Decimetres
    pub height: u32,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl DetailRecord {
    /// First type tag, if the record carries any
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(|t| t.kind.name.as_str())
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.kind.name.as_str())
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(PokedexError::InvalidRecord {
                details: format!("record '{}' has id 0", self.name),
            });
        }
        if self.name.trim().is_empty() {
            return Err(PokedexError::InvalidRecord {
                details: format!("record #{} has an empty name", self.id),
            });
        }
        if let Some(t) = self.types.iter().find(|t| t.kind.name.is_empty()) {
            return Err(PokedexError::InvalidRecord {
                details: format!("record '{}' has an unnamed type in slot {}", self.name, t.slot),
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test fixtures
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(id: u32, name: &str, types: &[&str]) -> DetailRecord {
        DetailRecord {
            id,
            name: name.to_string(),
            types: types
                .iter()
                .enumerate()
                .map(|(i, t)| TypeSlot {
                    slot: (i + 1) as u8,
                    kind: NamedResource {
                        name: t.to_string(),
                        url: String::new(),
                    },
                })
                .collect(),
            stats: vec![
                StatValue {
                    base_stat: 48,
                    stat: NamedResource {
                        name: "hp".to_string(),
                        url: String::new(),
                    },
                },
                StatValue {
                    base_stat: 48,
                    stat: NamedResource {
                        name: "special-attack".to_string(),
                        url: String::new(),
                    },
                },
            ],
            weight: 40,
            height: 3,
            sprites: Sprites {
                front_default: Some(format!(
                    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{}.png",
                    id
                )),
            },
        }
    }
}
