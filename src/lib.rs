//! Pokédex - terminal browser for the PokéAPI

pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod tui;

pub use api::{HttpPokemonApi, MockPokemonApi, PokemonApi};
pub use config::Config;
pub use coordinator::{Coordinator, Phase, UiEvent};
pub use error::{FixSuggestion, PokedexError};
pub use model::{DetailRecord, ListEntry};
pub use store::StateStore;
