//! Record table widget.
//! Thin TUI wrapper over [`crate::view::build_table`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Column width: longest of header and cells, capped.
const MAX_COLUMN_WIDTH: usize = 32;

pub fn render_table(frame: &mut Frame, area: Rect, vm: &TableViewModel<u64>, selected: usize) {
    let block = Block::default()
        .title(format!(" {} ", vm.title))
        .borders(Borders::ALL)
        .style(Styles::default());

    if vm.rows.is_empty() {
        let message = if vm.filter.is_empty() {
            "No records".to_string()
        } else {
            format!("No records match '{}'", vm.filter)
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    // Header with sort indicator
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = if Some(i) == vm.sort_column {
                if vm.sort_ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{}{}", h, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    let constraints: Vec<Constraint> = column_widths(vm)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn column_widths(vm: &TableViewModel<u64>) -> Vec<u16> {
    vm.headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let widest = vm
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.text.chars().count())
                .max()
                .unwrap_or(0);
            // +1 for the sort indicator
            let width = widest.max(h.chars().count() + 1).min(MAX_COLUMN_WIDTH);
            width as u16
        })
        .collect()
}
