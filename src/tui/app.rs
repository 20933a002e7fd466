//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;
use crate::provider::{Record, RecordProvider};
use crate::screen::Screen;

/// Main TUI application over one list screen.
pub struct App<T: Record, P: RecordProvider<T>> {
    screen: Screen<T, P>,
    state: AppState,
    should_quit: bool,
}

impl<T: Record, P: RecordProvider<T>> App<T, P> {
    /// Creates a new App over an opened (and usually loaded) screen.
    pub fn new(screen: Screen<T, P>) -> Self {
        Self {
            screen,
            state: AppState::new(),
            should_quit: false,
        }
    }

    /// Runs the TUI until the user quits. Returns the screen for reuse.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<Screen<T, P>> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        let role = self.screen.session().role.to_string();

        let result = loop {
            let vm = self.screen.view();
            let selected = self.screen.table.selected;
            if let Err(e) = terminal.draw(|frame| render(frame, &self.state, &vm, &role, selected))
            {
                break Err(e);
            }

            match events.next() {
                Ok(Event::Tick) => {}
                Ok(Event::Key(key)) => {
                    if handle_key(&mut self.state, &mut self.screen, key) == KeyAction::Quit {
                        self.should_quit = true;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result.map(|()| self.screen)
    }
}
