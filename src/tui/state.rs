//! ViewState - Domain Layer
//!
//! What the terminal currently shows, independent of how it is drawn.
//! The coordinator drives it through the [`View`] trait; `ui.rs` reads it.

use std::time::{Duration, Instant};

use crate::config::{Config, ERROR_DISPLAY};
use crate::model::DetailRecord;

// ─────────────────────────────────────────────────────────────────────────────
// Presentation contract
// ─────────────────────────────────────────────────────────────────────────────

/// Rendering calls the coordinator may issue
pub trait View {
    /// Turn the loading indicator on. Idempotent.
    fn show_busy(&mut self);

    /// Turn the loading indicator off. Idempotent.
    fn hide_busy(&mut self);

    /// Transient banner; replaces any current one and restarts its timer.
    fn show_error(&mut self, message: &str);

    /// Replace the card collection. Closes the detail overlay first.
    fn render_list(&mut self, records: &[DetailRecord]);

    /// Hide the list and open the detail overlay for `record`.
    fn render_detail(&mut self, record: &DetailRecord);

    /// Close the overlay and reveal the list.
    fn dismiss_detail(&mut self);
}

// ─────────────────────────────────────────────────────────────────────────────
// Type categories
// ─────────────────────────────────────────────────────────────────────────────

/// Accent category derived from a type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl TypeCategory {
    /// Unknown tags fall back to `Normal`
    pub fn from_name(name: &str) -> Self {
        match name {
            "fire" => Self::Fire,
            "water" => Self::Water,
            "electric" => Self::Electric,
            "grass" => Self::Grass,
            "ice" => Self::Ice,
            "fighting" => Self::Fighting,
            "poison" => Self::Poison,
            "ground" => Self::Ground,
            "flying" => Self::Flying,
            "psychic" => Self::Psychic,
            "bug" => Self::Bug,
            "rock" => Self::Rock,
            "ghost" => Self::Ghost,
            "dragon" => Self::Dragon,
            "dark" => Self::Dark,
            "steel" => Self::Steel,
            "fairy" => Self::Fairy,
            _ => Self::Normal,
        }
    }

    /// Category of the record's primary type
    pub fn of(record: &DetailRecord) -> Self {
        record
            .primary_type()
            .map(Self::from_name)
            .unwrap_or(Self::Normal)
    }
}

/// First character uppercased, remainder untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cards
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of the list surface
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Identity key sent back on selection
    pub name: String,
    pub label: String,
    pub id: u32,
    pub accent: TypeCategory,
    pub sprite_url: String,
}

impl Card {
    pub fn from_record(record: &DetailRecord, config: &Config) -> Self {
        Self {
            name: record.name.clone(),
            label: capitalize(&record.name),
            id: record.id,
            accent: TypeCategory::of(record),
            sprite_url: config.sprite_for(record.id),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail surface
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub category: TypeCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub title: String,
    pub image: Option<String>,
    pub accent: TypeCategory,
    pub badges: Vec<Badge>,
    pub weight_kg: f64,
    pub height_m: f64,
    pub stats: Vec<(String, u32)>,
}

impl DetailPanel {
    pub fn from_record(record: &DetailRecord) -> Self {
        Self {
            title: format!("{} (#{})", capitalize(&record.name), record.id),
            image: record.sprites.front_default.clone(),
            accent: TypeCategory::of(record),
            badges: record
                .type_names()
                .map(|t| Badge {
                    label: capitalize(t),
                    category: TypeCategory::from_name(t),
                })
                .collect(),
            weight_kg: record.weight_kg(),
            height_m: record.height_m(),
            stats: record
                .stats
                .iter()
                .map(|s| (capitalize(&s.stat.name), s.base_stat))
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error banner
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
    pub expires_at: Instant,
}

// ─────────────────────────────────────────────────────────────────────────────
// Core State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ViewState {
    config: Config,
    busy: bool,
    banner: Option<Banner>,
    cards: Vec<Card>,
    highlighted: usize,
    list_visible: bool,
    detail: Option<DetailPanel>,
    overlay_visible: bool,
    error_display: Duration,
    spinner_frame: usize,
}

impl ViewState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            busy: false,
            banner: None,
            cards: Vec::new(),
            highlighted: 0,
            list_visible: true,
            detail: None,
            overlay_visible: false,
            error_display: ERROR_DISPLAY,
            spinner_frame: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    /// Banner with an explicit clock
    pub fn show_error_at(&mut self, message: &str, now: Instant) {
        self.banner = Some(Banner {
            message: message.to_string(),
            expires_at: now + self.error_display,
        });
    }

    /// Expire the banner and advance the spinner
    pub fn tick(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| now >= b.expires_at) {
            self.banner = None;
        }
        if self.busy {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Card highlight
    // ─────────────────────────────────────────────────────────────────────

    pub fn highlighted(&self) -> Option<&Card> {
        self.cards.get(self.highlighted)
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// Move the highlight by `delta` cards, clamped to the collection
    pub fn move_highlight(&mut self, delta: isize) {
        if self.cards.is_empty() {
            self.highlighted = 0;
            return;
        }
        let last = self.cards.len() - 1;
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    pub fn set_highlight(&mut self, index: usize) {
        if index < self.cards.len() {
            self.highlighted = index;
        }
    }
}

impl View for ViewState {
    fn show_busy(&mut self) {
        self.busy = true;
    }

    fn hide_busy(&mut self) {
        self.busy = false;
    }

    fn show_error(&mut self, message: &str) {
        self.show_error_at(message, Instant::now());
    }

    fn render_list(&mut self, records: &[DetailRecord]) {
        self.dismiss_detail();
        self.cards = records
            .iter()
            .map(|r| Card::from_record(r, &self.config))
            .collect();
        self.highlighted = 0;
    }

    fn render_detail(&mut self, record: &DetailRecord) {
        self.list_visible = false;
        self.detail = Some(DetailPanel::from_record(record));
        self.overlay_visible = true;
    }

    fn dismiss_detail(&mut self) {
        self.overlay_visible = false;
        self.detail = None;
        self.list_visible = true;
    }
}
