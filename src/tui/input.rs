//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputMode};
use crate::provider::{Record, RecordProvider};
use crate::screen::{Confirmation, Outcome, Screen};
use crate::table::TableRow;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key<T: Record, P: RecordProvider<T>>(
    state: &mut AppState,
    screen: &mut Screen<T, P>,
    key: KeyEvent,
) -> KeyAction {
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if let Some(id) = state.pending_delete {
        handle_delete_confirm(state, screen, id, key);
        return KeyAction::None;
    }
    state.status_message = None;
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, screen, key),
        InputMode::Filter => {
            handle_filter_mode(state, screen, key);
            KeyAction::None
        }
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_delete_confirm<T: Record, P: RecordProvider<T>>(
    state: &mut AppState,
    screen: &mut Screen<T, P>,
    id: u64,
    key: KeyEvent,
) {
    let confirmation = match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::YES,
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Confirmation::NO,
        _ => return,
    };
    state.pending_delete = None;
    state.status_message = match screen.delete(id, confirmation) {
        Ok(Outcome::Applied) => Some(format!("Deleted record {}", id)),
        Ok(Outcome::Cancelled) => None,
        Err(e) => Some(format!("Error: {}", e)),
    };
}

/// Handles keys in normal mode.
fn handle_normal_mode<T: Record, P: RecordProvider<T>>(
    state: &mut AppState,
    screen: &mut Screen<T, P>,
    key: KeyEvent,
) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyAction::Quit;
        }

        KeyCode::Up | KeyCode::Char('k') => screen.table.select_up(),
        KeyCode::Down | KeyCode::Char('j') => screen.table.select_down(),
        KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Right => screen.table.next_page(),
        KeyCode::PageUp | KeyCode::Char('p') | KeyCode::Left => screen.table.prev_page(),
        KeyCode::Home => screen.table.set_page(0),
        KeyCode::End => {
            let last = screen.table.page_count() - 1;
            screen.table.set_page(last);
        }

        // Sorting
        KeyCode::Char('s') => {
            let role = screen.session().role;
            screen.table.next_sort_column(role);
        }
        KeyCode::Char('r') => screen.table.toggle_sort_direction(),

        // Filter mode
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input = screen.table.filter().to_string();
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            let session = screen.session().clone();
            match screen.table.selected_item() {
                Some(item) if item.can_delete(&session) => {
                    state.pending_delete = Some(item.id());
                }
                Some(_) => state.status_message = Some("Not allowed to delete this record".into()),
                None => {}
            }
        }

        KeyCode::Char('R') | KeyCode::F(5) => {
            state.status_message = match screen.reload() {
                Ok(count) => Some(format!("Reloaded {} records", count)),
                Err(e) => Some(format!("Error: {}", e)),
            };
        }

        _ => {}
    }
    KeyAction::None
}

/// Handles keys in filter mode.
fn handle_filter_mode<T: Record, P: RecordProvider<T>>(
    state: &mut AppState,
    screen: &mut Screen<T, P>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            screen.table.set_filter("");
        }
        KeyCode::Enter => {
            // Filter is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            screen.table.set_filter(&state.filter_input);
        }
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            screen.table.set_filter(&state.filter_input);
        }
        _ => {}
    }
}
