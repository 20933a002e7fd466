//! UI-agnostic view models.
//!
//! [`build_table`] turns a [`TableState`] into a [`common::TableViewModel`]
//! for one role. The TUI and the CLI printer both render from it.

pub mod common;

use crate::models::Session;
use crate::table::{ColumnKind, TableRow, TableState};
use common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

/// Builds the current page as a view model for the session's role.
///
/// Only columns visible to the role are emitted. Action cells read
/// "edit"/"delete" when the row permits the action, and are blank otherwise.
pub fn build_table<T: TableRow>(
    title: &str,
    table: &TableState<T>,
    session: &Session,
) -> TableViewModel<u64> {
    let columns: Vec<_> = T::columns()
        .iter()
        .filter(|c| c.is_visible(session.role))
        .collect();

    let rows = table
        .page()
        .into_iter()
        .map(|item| ViewRow {
            id: item.id(),
            cells: columns
                .iter()
                .map(|c| match (c.kind, c.key) {
                    (ColumnKind::Action, "edit") if item.can_edit(session) => {
                        ViewCell::styled("edit".to_string(), RowStyleClass::Accent)
                    }
                    (ColumnKind::Action, "delete") if item.can_delete(session) => {
                        ViewCell::styled("delete".to_string(), RowStyleClass::Accent)
                    }
                    (ColumnKind::Action, _) => ViewCell::default(),
                    _ => ViewCell::plain(item.display(c.key)),
                })
                .collect(),
            style: item.row_style(),
        })
        .collect();

    let sort_column = table
        .sort_key()
        .and_then(|key| columns.iter().position(|c| c.key == key));

    TableViewModel {
        title: title.to_string(),
        headers: columns.iter().map(|c| c.label.to_string()).collect(),
        keys: columns.iter().map(|c| c.key).collect(),
        rows,
        sort_column,
        sort_ascending: table.sort_direction().is_ascending(),
        page_index: table.page_index(),
        page_count: table.page_count(),
        total_filtered: table.total_filtered(),
        filter: table.filter().to_string(),
    }
}

/// Plain-text rendering: aligned columns, a sort marker and a page footer.
pub fn format_text(vm: &TableViewModel<u64>) -> String {
    let headers: Vec<String> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| match vm.sort_column {
            Some(s) if s == i && vm.sort_ascending => format!("{} ^", h),
            Some(s) if s == i => format!("{} v", h),
            _ => h.clone(),
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            vm.rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| c.text.chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in &vm.rows {
        out.push_str(&line(row.cells.iter().map(|c| c.text.as_str()).collect()));
        out.push('\n');
    }
    out.push_str(&vm.page_info());
    out.push('\n');
    out
}
