//! TUI Widgets - UI Components
//!
//! Stateless helpers shared by the renderers in `app.rs`.

use ratatui::layout::Rect;

pub const CARD_WIDTH: u16 = 20;
pub const CARD_HEIGHT: u16 = 4;

/// Card grid geometry for one frame.
///
/// Drawing and mouse hit-testing both go through this, so a click maps to
/// exactly the card that was drawn under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGrid {
    pub area: Rect,
    pub columns: usize,
    pub rows: usize,
    /// Index of the first visible card
    pub first: usize,
}

impl CardGrid {
    /// Lay out `count` cards in `area`, scrolled so `highlighted` is visible
    pub fn layout(area: Rect, count: usize, highlighted: usize) -> Self {
        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        let rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let highlighted = highlighted.min(count.saturating_sub(1));
        let first_row = (highlighted / columns).saturating_sub(rows - 1);
        Self {
            area,
            columns,
            rows,
            first: first_row * columns,
        }
    }

    /// Visible card indices
    pub fn visible(&self, count: usize) -> std::ops::Range<usize> {
        let end = (self.first + self.columns * self.rows).min(count);
        self.first.min(end)..end
    }

    /// Screen rectangle of card `index`, if visible
    pub fn cell(&self, index: usize) -> Option<Rect> {
        let offset = index.checked_sub(self.first)?;
        let (row, col) = (offset / self.columns, offset % self.columns);
        if row >= self.rows {
            return None;
        }
        let x = self.area.x + (col as u16) * CARD_WIDTH;
        let y = self.area.y + (row as u16) * CARD_HEIGHT;
        let width = CARD_WIDTH.min(self.area.right().saturating_sub(x));
        let height = CARD_HEIGHT.min(self.area.bottom().saturating_sub(y));
        Some(Rect::new(x, y, width, height))
    }

    /// Card under a terminal cell
    pub fn index_at(&self, column: u16, row: u16, count: usize) -> Option<usize> {
        if column < self.area.x
            || row < self.area.y
            || column >= self.area.right()
            || row >= self.area.bottom()
        {
            return None;
        }
        let col = usize::from((column - self.area.x) / CARD_WIDTH);
        let line = usize::from((row - self.area.y) / CARD_HEIGHT);
        if col >= self.columns || line >= self.rows {
            return None;
        }
        let index = self.first + line * self.columns + col;
        (index < count).then_some(index)
    }
}

/// Common widget utilities
pub mod utils {
    use ratatui::layout::Rect;

    use crate::tui::theme::icons;

    /// Rectangle of `percent_x` × `percent_y` centered in `area`
    pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let width = scale(area.width, percent_x);
        let height = scale(area.height, percent_y);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// `percent` of `length`, widened so large terminals cannot overflow
    fn scale(length: u16, percent: u16) -> u16 {
        let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
        u16::try_from(scaled).unwrap_or(length)
    }

    /// Horizontal bar for a base stat (255 is the ceiling)
    pub fn stat_bar(value: u32, width: usize) -> String {
        let filled = ((value.min(255) as usize) * width) / 255;
        let empty = width.saturating_sub(filled);
        format!(
            "{}{}",
            icons::BAR_FULL.to_string().repeat(filled),
            icons::BAR_EMPTY.to_string().repeat(empty)
        )
    }

    /// Truncate string with ellipsis (char-aware)
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len <= 3 {
            s.chars().take(max_len).collect()
        } else {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        }
    }

    /// `4.0` → "4", `0.3` → "0.3"
    pub fn format_measure(value: f64) -> String {
        let text = format!("{:.1}", value);
        text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
    }
}
