//! Pokédex Theme - Visual Design System
//!
//! Dex-red chrome on a dark screen, with one accent per type.

use ratatui::style::{Color, Modifier, Style};

use super::state::TypeCategory;

/// Pokédex color palette
pub struct PokedexTheme {
    // Primary palette
    pub dex_red: Color,
    pub screen_dark: Color,
    pub screen_white: Color,
    pub lens_blue: Color,

    // Status colors
    pub success_green: Color,
    pub warning_yellow: Color,
    pub error_red: Color,
}

impl Default for PokedexTheme {
    fn default() -> Self {
        Self {
            dex_red: Color::Rgb(220, 10, 45),       // #DC0A2D
            screen_dark: Color::Rgb(22, 24, 29),    // #16181D
            screen_white: Color::Rgb(236, 240, 241), // #ECF0F1
            lens_blue: Color::Rgb(40, 170, 253),    // #28AAFD

            success_green: Color::Rgb(63, 185, 80),   // #3FB950
            warning_yellow: Color::Rgb(255, 203, 5),  // #FFCB05
            error_red: Color::Rgb(248, 81, 73),       // #F85149
        }
    }
}

impl PokedexTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Type Colors
    // ─────────────────────────────────────────────────────────────────────

    /// Accent color for a type category (official artwork palette)
    pub fn type_color(&self, category: TypeCategory) -> Color {
        match category {
            TypeCategory::Normal => Color::Rgb(168, 167, 122),
            TypeCategory::Fire => Color::Rgb(238, 129, 48),
            TypeCategory::Water => Color::Rgb(99, 144, 240),
            TypeCategory::Electric => Color::Rgb(247, 208, 44),
            TypeCategory::Grass => Color::Rgb(122, 199, 76),
            TypeCategory::Ice => Color::Rgb(150, 217, 214),
            TypeCategory::Fighting => Color::Rgb(194, 46, 40),
            TypeCategory::Poison => Color::Rgb(163, 62, 161),
            TypeCategory::Ground => Color::Rgb(226, 191, 101),
            TypeCategory::Flying => Color::Rgb(169, 143, 243),
            TypeCategory::Psychic => Color::Rgb(249, 85, 135),
            TypeCategory::Bug => Color::Rgb(166, 185, 26),
            TypeCategory::Rock => Color::Rgb(182, 161, 54),
            TypeCategory::Ghost => Color::Rgb(115, 87, 151),
            TypeCategory::Dragon => Color::Rgb(111, 53, 252),
            TypeCategory::Dark => Color::Rgb(112, 87, 70),
            TypeCategory::Steel => Color::Rgb(183, 183, 206),
            TypeCategory::Fairy => Color::Rgb(214, 133, 173),
        }
    }

    /// Solid badge: type color background, dark text
    pub fn badge(&self, category: TypeCategory) -> Style {
        Style::default()
            .fg(self.screen_dark)
            .bg(self.type_color(category))
            .add_modifier(Modifier::BOLD)
    }

    /// Card border for a type
    pub fn card_border(&self, category: TypeCategory, highlighted: bool) -> Style {
        let style = Style::default().fg(self.type_color(category));
        if highlighted {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.screen_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(Color::Rgb(128, 128, 128))
    }

    /// Backdrop behind the detail overlay
    pub fn backdrop(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(64, 64, 64))
            .bg(Color::Rgb(10, 10, 12))
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.dex_red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.warning_yellow)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.lens_blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.screen_white)
            .bg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    /// Stat bar color: red → yellow → green as the base stat grows
    pub fn stat_color(&self, value: u32) -> Color {
        match value {
            v if v >= 100 => self.success_green,
            v if v >= 60 => self.warning_yellow,
            _ => self.error_red,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Icons and Symbols
// ─────────────────────────────────────────────────────────────────────────────

pub mod icons {
    pub const POKEBALL: &str = "◓";
    pub const SEARCH: &str = "⌕";
    pub const WEIGHT: &str = "⚖";
    pub const HEIGHT: &str = "↕";
    pub const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

    pub const BAR_FULL: char = '█';
    pub const BAR_EMPTY: char = '░';
}
