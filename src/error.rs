//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T> = std::result::Result<T, PokedexError>;

#[derive(Error, Debug)]
pub enum PokedexError {
    // ─────────────────────────────────────────────────────────────
    // API boundary
    // ─────────────────────────────────────────────────────────────
    #[error("Pokémon \"{identifier}\" not found")]
    NotFound { identifier: String },

    #[error("HTTP {status} from {url}")]
    Network { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response from {url}: {details}")]
    Decode { url: String, details: String },

    #[error("Invalid record: {details}")]
    InvalidRecord { details: String },

    // ─────────────────────────────────────────────────────────────
    // Startup
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PokedexError {
    /// True for the distinguished 404 condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Network { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl FixSuggestion for PokedexError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PokedexError::NotFound { .. } => Some("Search by exact name (e.g. pikachu) or national dex number"),
            PokedexError::Network { .. } => Some("The PokéAPI returned an error; try again later"),
            PokedexError::Transport(_) => Some("Check your network connection or --api-url"),
            PokedexError::Decode { .. } => Some("Check that --api-url points at a PokéAPI v2 endpoint"),
            PokedexError::InvalidRecord { .. } => None,
            PokedexError::Config { .. } => Some("Check POKEDEX_* environment variables and CLI flags"),
            PokedexError::Io(_) => Some("Check terminal and log file permissions"),
        }
    }
}
