//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AppState, InputMode};
use super::style::Styles;
use super::widgets::{render_confirm, render_table};
use crate::view::common::TableViewModel;

/// Key hints shown in the footer in normal mode.
const HELP: &[(&str, &str)] = &[
    ("/", "filter"),
    ("s", "sort"),
    ("r", "reverse"),
    ("n/p", "page"),
    ("d", "delete"),
    ("R", "reload"),
    ("q", "quit"),
];

/// Main render function.
pub fn render(
    frame: &mut Frame,
    state: &AppState,
    vm: &TableViewModel<u64>,
    role: &str,
    selected: usize,
) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Table
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], vm, role);
    render_table(frame, chunks[1], vm, selected);
    render_footer(frame, chunks[2], state);

    if let Some(id) = state.pending_delete {
        render_confirm(
            frame,
            area,
            "Delete record",
            &format!("Delete record {}? This cannot be undone.", id),
            "Enter or y",
        );
    }

    // Rendered last to overlay everything.
    if state.show_quit_confirm {
        render_confirm(
            frame,
            area,
            "Exit campusgrid",
            "Are you sure you want to quit?",
            "Enter or q",
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, vm: &TableViewModel<u64>, role: &str) {
    let text = format!(" {} | {} | {}", vm.title, role, vm.page_info());
    frame.render_widget(Paragraph::new(text).style(Styles::header()), area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.input_mode == InputMode::Filter {
        Line::from(vec![
            Span::styled("Filter: ", Styles::help_key()),
            Span::styled(state.filter_input.clone(), Styles::filter_input()),
        ])
    } else if let Some(message) = &state.status_message {
        let style = if message.starts_with("Error") {
            Styles::error()
        } else {
            Styles::default()
        };
        Line::from(Span::styled(message.clone(), style))
    } else {
        let mut spans = Vec::with_capacity(HELP.len() * 2);
        for (key, label) in HELP {
            spans.push(Span::styled(format!(" {}", key), Styles::help_key()));
            spans.push(Span::styled(format!(" {}", label), Styles::dim()));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), area);
}
