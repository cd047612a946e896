//! Event Handling - Keyboard and mouse input processing
//!
//! Raw crossterm events become either local view changes (highlight,
//! search input) or one of the coordinator's [`UiEvent`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::ViewState;
use super::widgets::CardGrid;
use crate::coordinator::UiEvent;

/// Actions that can be triggered by user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Emit(UiEvent),
    /// Handled locally; redraw only
    Redraw,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
}

/// Search box and navigation state owned by the terminal loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub search: String,
    /// Grid columns from the last frame, for vertical movement
    pub columns: usize,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, input: &mut InputState, view: &mut ViewState) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if input.mode == InputMode::Search {
        return handle_search_key(key, input);
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('/') => {
            input.mode = InputMode::Search;
            return Action::Redraw;
        }
        _ => {}
    }

    if view.is_overlay_visible() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Backspace => {
                Action::Emit(UiEvent::Dismiss)
            }
            _ => Action::None,
        };
    }

    let columns = input.columns.max(1) as isize;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => move_highlight(view, -1),
        KeyCode::Right | KeyCode::Char('l') => move_highlight(view, 1),
        KeyCode::Up | KeyCode::Char('k') => move_highlight(view, -columns),
        KeyCode::Down | KeyCode::Char('j') => move_highlight(view, columns),
        KeyCode::Enter => match view.highlighted() {
            Some(card) => Action::Emit(UiEvent::Select(card.name.clone())),
            None => Action::None,
        },
        KeyCode::Char('n') => Action::Emit(UiEvent::NextPage),
        KeyCode::Char('p') => Action::Emit(UiEvent::PrevPage),
        KeyCode::Char('r') => Action::Emit(UiEvent::Search(String::new())),
        _ => Action::None,
    }
}

fn handle_search_key(key: KeyEvent, input: &mut InputState) -> Action {
    match key.code {
        KeyCode::Enter => {
            input.mode = InputMode::Browse;
            Action::Emit(UiEvent::Search(input.search.clone()))
        }
        KeyCode::Esc => {
            input.mode = InputMode::Browse;
            Action::Redraw
        }
        KeyCode::Backspace => {
            input.search.pop();
            Action::Redraw
        }
        KeyCode::Char(c) => {
            input.search.push(c);
            Action::Redraw
        }
        _ => Action::None,
    }
}

fn move_highlight(view: &mut ViewState, delta: isize) -> Action {
    view.move_highlight(delta);
    Action::Redraw
}

/// Handle mouse events against the last drawn grid
pub fn handle_mouse_event(mouse: MouseEvent, view: &mut ViewState, grid: Option<&CardGrid>) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::None;
    }

    // Anywhere on the detail card or the backdrop closes it
    if view.is_overlay_visible() {
        return Action::Emit(UiEvent::Dismiss);
    }

    let Some(index) = grid.and_then(|g| g.index_at(mouse.column, mouse.row, view.cards().len()))
    else {
        return Action::None;
    };
    view.set_highlight(index);
    match view.highlighted() {
        Some(card) => Action::Emit(UiEvent::Select(card.name.clone())),
        None => Action::None,
    }
}
