//! TUI Module - Pokédex terminal surface
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     UI LAYER (app.rs, widgets/)                     │
//! │  Pure rendering. No business logic. Reads ViewState + StateStore.   │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ View trait calls
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      DOMAIN LAYER (state.rs)                        │
//! │  ViewState: cards, detail panel, busy flag, error banner.           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ UiEvent ▼ / render calls ▲
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   COORDINATOR (crate::coordinator)                  │
//! │  Sequences PokemonApi requests and StateStore updates.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

pub use app::TuiApp;
pub use events::{Action, InputMode, InputState};
pub use state::{capitalize, Badge, Banner, Card, DetailPanel, TypeCategory, View, ViewState};
pub use theme::PokedexTheme;

use crate::config::Config;

/// Run the TUI
pub async fn run(config: Config) -> anyhow::Result<()> {
    let app = TuiApp::new(config)?;
    app.run().await
}
