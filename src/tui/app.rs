//! TUI Application - Main entry point and run loop

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::stream::{FuturesUnordered, StreamExt};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use super::events::{handle_key_event, handle_mouse_event, Action, InputMode, InputState};
use super::state::{Card, DetailPanel, ViewState};
use super::theme::{icons, PokedexTheme};
use super::widgets::{utils, CardGrid, CARD_WIDTH};
use crate::api::create_api;
use crate::config::Config;
use crate::coordinator::{Coordinator, Pending};
use crate::store::StateStore;

/// Banner expiry and spinner cadence
const TICK_RATE: Duration = Duration::from_millis(120);

/// TUI Application
pub struct TuiApp {
    coordinator: Coordinator<ViewState>,
    input: InputState,
    theme: PokedexTheme,
    grid: Option<CardGrid>,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api = create_api(&config)?;
        let view = ViewState::new(config);

        Ok(Self {
            coordinator: Coordinator::new(api, view),
            input: InputState::default(),
            theme: PokedexTheme::new(),
            grid: None,
        })
    }

    /// Run the TUI application
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;

        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;

        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Main event loop
    ///
    /// Terminal input, the render tick and in-flight requests are
    /// multiplexed on one task; requests never block input.
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut in_flight: FuturesUnordered<Pending> = FuturesUnordered::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        in_flight.push(self.coordinator.start());

        loop {
            terminal.draw(|frame| {
                self.grid = Some(self.render(frame));
            })?;

            tokio::select! {
                Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                    self.coordinator.complete(completion);
                }
                maybe_event = events.next() => {
                    let action = match maybe_event {
                        Some(Ok(event)) => self.on_terminal_event(event),
                        Some(Err(e)) => return Err(e.into()),
                        None => Action::Quit,
                    };
                    match action {
                        Action::Quit => break,
                        Action::Emit(ui_event) => in_flight.push(self.coordinator.handle(ui_event)),
                        Action::Redraw | Action::None => {}
                    }
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.coordinator.tick(now);
                    self.coordinator.view_mut().tick(now);
                }
            }
        }

        tracing::info!(pending = in_flight.len(), "Shutting down");
        Ok(())
    }

    fn on_terminal_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key_event(key, &mut self.input, self.coordinator.view_mut())
            }
            Event::Mouse(mouse) => {
                let grid = self.grid;
                handle_mouse_event(mouse, self.coordinator.view_mut(), grid.as_ref())
            }
            Event::Resize(..) => Action::Redraw,
            _ => Action::None,
        }
    }

    /// Render the UI, returning the card grid that was drawn
    fn render(&mut self, frame: &mut Frame) -> CardGrid {
        let area = frame.area();

        // Main layout: Header, Search, Cards, Banner, Footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search
                Constraint::Min(4),    // Cards
                Constraint::Length(1), // Error banner
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let view = self.coordinator.view();
        let store = self.coordinator.store();

        self.render_header(frame, chunks[0], view, store);
        self.render_search(frame, chunks[1]);

        let list_area = Block::default().borders(Borders::ALL).inner(chunks[2]);
        let grid = CardGrid::layout(list_area, view.cards().len(), view.highlighted_index());
        self.input.columns = grid.columns;
        if view.is_list_visible() {
            self.render_list(frame, chunks[2], &grid, view);
        }

        self.render_banner(frame, chunks[3], view);
        self.render_footer(frame, chunks[4], view);

        if view.is_overlay_visible() {
            self.render_backdrop(frame, area);
            if let Some(detail) = view.detail() {
                self.render_detail(frame, utils::centered_rect(60, 80, area), detail);
            }
        }

        grid
    }

    /// Render header
    fn render_header(&self, frame: &mut Frame, area: Rect, view: &ViewState, store: &StateStore) {
        let cursor = store.cursor();
        let page = cursor.offset / cursor.limit.max(1) + 1;

        let status = if view.is_busy() {
            let spinner = icons::SPINNER[view.spinner_frame() % icons::SPINNER.len()];
            Span::styled(format!("{} loading", spinner), self.theme.accent())
        } else {
            Span::styled(
                format!("{}", self.coordinator.phase().settled()),
                self.theme.success(),
            )
        };

        let header = Line::from(vec![
            Span::styled(format!("{} POKÉDEX", icons::POKEBALL), self.theme.header()),
            Span::raw("  │  "),
            Span::styled(format!("Page {}", page), self.theme.text()),
            Span::raw("  │  "),
            Span::styled(
                format!("#{}–#{}", cursor.offset + 1, cursor.offset + cursor.limit),
                self.theme.dimmed(),
            ),
            Span::raw("  │  "),
            status,
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.header());

        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    /// Render the search input
    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let editing = self.input.mode == InputMode::Search;
        let border_style = if editing {
            self.theme.highlight()
        } else {
            self.theme.dimmed()
        };

        let text = if self.input.search.is_empty() && !editing {
            Span::styled("name or number, press / to type", self.theme.dimmed())
        } else {
            Span::styled(self.input.search.as_str(), self.theme.text())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} SEARCH ", icons::SEARCH));

        frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

        if editing {
            let x = area.x + 1 + self.input.search.chars().count() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    /// Render the card grid
    fn render_list(&self, frame: &mut Frame, area: Rect, grid: &CardGrid, view: &ViewState) {
        let cards = view.cards();
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dimmed())
            .title(format!(" {} cards ", cards.len()));
        if let Some(card) = view.highlighted() {
            block = block.title_bottom(Span::styled(
                format!(" {} {} ", icons::POKEBALL, card.sprite_url),
                self.theme.dimmed(),
            ));
        }
        frame.render_widget(block, area);

        if cards.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No Pokémon to show",
                self.theme.dimmed(),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(empty, grid.area);
            return;
        }

        for index in grid.visible(cards.len()) {
            if let Some(cell) = grid.cell(index) {
                let highlighted = index == view.highlighted_index();
                self.render_card(frame, cell, &cards[index], highlighted);
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &Card, highlighted: bool) {
        let width = usize::from(CARD_WIDTH.saturating_sub(2));
        let lines = vec![
            Line::from(Span::styled(
                utils::truncate(&card.label, width),
                self.theme.text(),
            )),
            Line::from(Span::styled(format!("#{}", card.id), self.theme.dimmed())),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card_border(card.accent, highlighted));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Dimmed backdrop behind the detail card
    fn render_backdrop(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.theme.backdrop()), area);
    }

    /// Render the detail overlay
    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailPanel) {
        frame.render_widget(Clear, area);

        let mut badges = vec![Span::raw(" ")];
        for badge in &detail.badges {
            badges.push(Span::styled(format!(" {} ", badge.label), self.theme.badge(badge.category)));
            badges.push(Span::raw(" "));
        }

        let mut lines = vec![
            Line::from(badges),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!(" {} Weight: ", icons::WEIGHT), self.theme.dimmed()),
                Span::styled(format!("{} kg", utils::format_measure(detail.weight_kg)), self.theme.text()),
                Span::raw("    "),
                Span::styled(format!("{} Height: ", icons::HEIGHT), self.theme.dimmed()),
                Span::styled(format!("{} m", utils::format_measure(detail.height_m)), self.theme.text()),
            ]),
            Line::from(vec![
                Span::styled(" Image: ", self.theme.dimmed()),
                Span::styled(detail.image.as_deref().unwrap_or("(none)"), self.theme.text()),
            ]),
            Line::from(""),
            Line::from(Span::styled(" Base stats", self.theme.header())),
        ];

        for (name, value) in &detail.stats {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<16}", utils::truncate(name, 16)), self.theme.text()),
                Span::styled(format!("{:>4} ", value), self.theme.text()),
                Span::styled(
                    utils::stat_bar(*value, 20),
                    Style::default().fg(self.theme.stat_color(*value)),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Click anywhere to close",
            self.theme.dimmed(),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.type_color(detail.accent)))
            .title(Span::styled(
                format!(" {} ", detail.title),
                Style::default().fg(self.theme.type_color(detail.accent)),
            ));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    /// Render the transient error banner
    fn render_banner(&self, frame: &mut Frame, area: Rect, view: &ViewState) {
        if let Some(banner) = view.banner() {
            let line = Line::from(Span::styled(format!(" {} ", banner.message), self.theme.error()));
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    /// Render footer
    fn render_footer(&self, frame: &mut Frame, area: Rect, view: &ViewState) {
        let help = if self.input.mode == InputMode::Search {
            Line::from(vec![
                Span::styled(" [Enter]", self.theme.accent()),
                Span::styled(" search  ", self.theme.dimmed()),
                Span::styled("[Esc]", self.theme.accent()),
                Span::styled(" cancel", self.theme.dimmed()),
            ])
        } else if view.is_overlay_visible() {
            Line::from(vec![
                Span::styled(" [Esc/Enter/click]", self.theme.accent()),
                Span::styled(" close  ", self.theme.dimmed()),
                Span::styled("[/]", self.theme.accent()),
                Span::styled(" search  ", self.theme.dimmed()),
                Span::styled("[q]", self.theme.accent()),
                Span::styled("uit", self.theme.dimmed()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" [q]", self.theme.accent()),
                Span::styled("uit  ", self.theme.dimmed()),
                Span::styled("[/]", self.theme.accent()),
                Span::styled(" search  ", self.theme.dimmed()),
                Span::styled("[←↑↓→]", self.theme.accent()),
                Span::styled(" move  ", self.theme.dimmed()),
                Span::styled("[Enter]", self.theme.accent()),
                Span::styled(" open  ", self.theme.dimmed()),
                Span::styled("[n/p]", self.theme.accent()),
                Span::styled(" page  ", self.theme.dimmed()),
                Span::styled("[r]", self.theme.accent()),
                Span::styled("eload", self.theme.dimmed()),
            ])
        };

        frame.render_widget(Paragraph::new(help), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::UiEvent;
    use ratatui::backend::TestBackend;

    fn demo_app() -> TuiApp {
        TuiApp::new(Config {
            demo: true,
            ..Config::default()
        })
        .unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_cards_after_load() {
        let mut app = demo_app();
        let completion = app.coordinator.start().await;
        app.coordinator.complete(completion);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                app.grid = Some(app.render(frame));
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("POKÉDEX"));
        assert!(text.contains("Bulbasaur"));
        assert!(text.contains("#1"));
        assert_eq!(app.input.columns, 4);
        assert!(app.grid.is_some());
        // Highlighted card's sprite reference sits on the grid border
        assert!(text.contains("sprites/pokemon/1.png"));
    }

    #[tokio::test]
    async fn test_renders_detail_overlay() {
        let mut app = demo_app();
        app.coordinator
            .dispatch(UiEvent::Search("ditto".to_string()))
            .await;

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| {
                app.render(frame);
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Ditto (#132)"));
        assert!(text.contains("4 kg"));
        assert!(text.contains("0.3 m"));
        assert!(text.contains("Special-attack"));
    }

    #[tokio::test]
    async fn test_renders_error_banner() {
        let mut app = demo_app();
        app.coordinator
            .dispatch(UiEvent::Search("notapokemon".to_string()))
            .await;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                app.render(frame);
            })
            .unwrap();

        assert!(screen(&terminal).contains("not found"));
    }
}
