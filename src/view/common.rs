//! UI-agnostic view model types.
//!
//! These types carry presentation data with no dependency on a rendering
//! framework. The TUI maps them to ratatui styles; `--json` output serializes
//! them directly.

use serde::Serialize;

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Dimmed (TUI: dark gray). E.g. past events.
    Dimmed,
    /// Accent (TUI: cyan). Used for permitted row actions.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone, Serialize)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, Serialize)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    /// Column keys, parallel to `headers`.
    pub keys: Vec<&'static str>,
    pub rows: Vec<ViewRow<Id>>,
    /// Index into `headers` of the sort column, if it is shown.
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
    pub page_index: usize,
    pub page_count: usize,
    pub total_filtered: usize,
    pub filter: String,
}

impl<Id> TableViewModel<Id> {
    /// "page 2/5 (43 rows)".
    pub fn page_info(&self) -> String {
        format!(
            "page {}/{} ({} rows)",
            self.page_index + 1,
            self.page_count,
            self.total_filtered
        )
    }
}
