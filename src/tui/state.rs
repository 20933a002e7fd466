//! TUI-only state. Table data lives in the `Screen`.

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a filter; applied on every keystroke.
    Filter,
}

/// Application state shared between input handling and rendering.
#[derive(Debug, Default)]
pub struct AppState {
    pub input_mode: InputMode,
    /// Filter text being edited.
    pub filter_input: String,
    /// Record waiting for delete confirmation.
    pub pending_delete: Option<u64>,
    pub show_quit_confirm: bool,
    /// One-line message shown in the footer until the next key.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
