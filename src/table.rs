//! Generic table state: filtering, sorting, pagination, selection.
//!
//! `TableState` owns the loaded records and keeps a derived projection
//! (indices of the records that pass the filter, in sort order). The
//! projection is rebuilt on every load, filter or sort change; paging only
//! slices it.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::models::{FieldValue, Role, Session};
use crate::util::{natural_code_key, parse_date_millis};
use crate::view::common::RowStyleClass;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Missing or blank value. Sorts before everything else.
    Empty,
    Integer(i64),
    Float(f64),
    String(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Empty => 0,
            SortKey::Integer(_) | SortKey::Float(_) => 1,
            SortKey::String(_) => 2,
        }
    }

    fn is_numeric(&self) -> bool {
        self.rank() == 1
    }

    fn is_string(&self) -> bool {
        self.rank() == 2
    }

    /// Total order: empty < numbers < strings; floats use IEEE total order.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Float(b)) => (*a as f64).total_cmp(b),
            (SortKey::Float(a), SortKey::Integer(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// How a column's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Person name ("first last"), compared lowercase.
    Name,
    /// Integer-like ids and counts, compared numerically.
    Numeric,
    /// Calendar dates, compared by epoch milliseconds.
    Date,
    /// Letter prefix + number codes (`A-12`), compared naturally.
    Code,
    /// Lowercase text, or the raw number.
    Plain,
    /// Row action (edit/delete). Not backed by a field.
    Action,
}

/// Column descriptor. Order in `TableRow::columns()` is display order.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub visible: fn(Role) -> bool,
}

/// Visibility predicate accepting every role.
pub fn any_role(_role: Role) -> bool {
    true
}

pub fn admin_only(role: Role) -> bool {
    role == Role::Admin
}

/// Admins and teachers.
pub fn staff_only(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Teacher)
}

impl Column {
    pub const fn new(key: &'static str, label: &'static str, kind: ColumnKind) -> Self {
        Self {
            key,
            label,
            kind,
            sortable: !matches!(kind, ColumnKind::Action),
            visible: any_role,
        }
    }

    pub const fn visible_if(self, visible: fn(Role) -> bool) -> Self {
        Self { visible, ..self }
    }

    pub const fn unsortable(self) -> Self {
        Self {
            sortable: false,
            ..self
        }
    }

    pub fn is_visible(&self, role: Role) -> bool {
        (self.visible)(role)
    }
}

/// Trait for table row items.
pub trait TableRow: Clone {
    /// Unique identifier (backend primary key).
    fn id(&self) -> u64;

    /// Column descriptors in display order.
    fn columns() -> &'static [Column];

    /// Copies nested canonical fields to their top-level logical fields.
    /// Called on every record at load, before any sort or filter.
    fn flatten(&mut self) {}

    /// Value of a logical field, `None` when absent.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Display text of a field. Entities override this for labelled values.
    fn display(&self, key: &str) -> String {
        self.field(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Lowercase concatenation of the searchable fields.
    fn searchable_text(&self) -> String;

    /// Whether a user with this role may see the record at all.
    fn visible_to(&self, _role: Role) -> bool {
        true
    }

    fn can_edit(&self, session: &Session) -> bool;

    fn can_delete(&self, session: &Session) -> bool;

    /// Whether a role may open the list of this type at all.
    fn listable_by(role: Role) -> bool {
        any_role(role)
    }

    /// Whether a role may register new records of this type.
    fn creatable_by(role: Role) -> bool {
        role == Role::Admin
    }

    fn row_style(&self) -> RowStyleClass {
        RowStyleClass::Normal
    }

    /// Sort key for a column. Defaults to the accessor for the column kind.
    fn sort_key(&self, key: &str, kind: ColumnKind) -> SortKey {
        sort_key_for(self, key, kind)
    }

    /// Looks up a column descriptor by key.
    fn column(key: &str) -> Option<&'static Column> {
        Self::columns().iter().find(|c| c.key == key)
    }
}

/// Sort accessor shared by all entities.
pub fn sort_key_for<T: TableRow + ?Sized>(row: &T, key: &str, kind: ColumnKind) -> SortKey {
    let Some(value) = row.field(key) else {
        return SortKey::Empty;
    };
    if value.is_blank() {
        return SortKey::Empty;
    }

    match kind {
        ColumnKind::Numeric => match value {
            FieldValue::Integer(n) => SortKey::Integer(n),
            FieldValue::Float(f) => SortKey::Float(f),
            FieldValue::Text(s) => parse_numeric(&s),
        },
        ColumnKind::Date => match value {
            FieldValue::Text(s) => parse_date_millis(&s)
                .map(SortKey::Integer)
                .unwrap_or_else(|| SortKey::String(s.to_lowercase())),
            FieldValue::Integer(n) => SortKey::Integer(n),
            FieldValue::Float(f) => SortKey::Float(f),
        },
        ColumnKind::Code => {
            let text = value.to_string();
            natural_code_key(&text)
                .map(SortKey::String)
                .unwrap_or_else(|| SortKey::String(text.to_lowercase()))
        }
        ColumnKind::Name | ColumnKind::Plain | ColumnKind::Action => match value {
            FieldValue::Text(s) => SortKey::String(s.to_lowercase()),
            FieldValue::Integer(n) => SortKey::Integer(n),
            FieldValue::Float(f) => SortKey::Float(f),
        },
    }
}

fn parse_numeric(s: &str) -> SortKey {
    let t = s.trim();
    if let Ok(n) = t.parse::<i64>() {
        return SortKey::Integer(n);
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() => SortKey::Float(f),
        _ => SortKey::String(t.to_lowercase()),
    }
}

/// Raw lowercase text of the field, used when a column mixes numbers and text.
fn fallback_key<T: TableRow>(row: &T, key: &str) -> SortKey {
    match row.field(key) {
        Some(v) if !v.is_blank() => SortKey::String(v.to_string().to_lowercase()),
        _ => SortKey::Empty,
    }
}

/// State for a table view.
#[derive(Debug, Clone)]
pub struct TableState<T: TableRow> {
    /// All loaded items (unfiltered, load order).
    pub items: Vec<T>,
    /// Lowercase, trimmed filter. Empty retains everything.
    filter: String,
    /// Sort column key.
    sort_key: Option<String>,
    sort_direction: SortDirection,
    page_index: usize,
    page_size: usize,
    /// Selected row index within the current page.
    pub selected: usize,
    /// Indices into `items`: filtered, then sorted.
    view: Vec<usize>,
}

impl<T: TableRow> Default for TableState<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T: TableRow> TableState<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            filter: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page_index: 0,
            page_size: page_size.max(1),
            selected: 0,
            view: Vec::new(),
        }
    }

    /// Replaces all items. Keeps filter and sort, resets to the first page.
    pub fn load(&mut self, mut items: Vec<T>) {
        for item in &mut items {
            item.flatten();
        }
        debug!(count = items.len(), "table loaded");
        self.items = items;
        self.page_index = 0;
        self.selected = 0;
        self.refresh();
    }

    /// Sets the filter text (trimmed, lowercased) and resets to the first page.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
        self.page_index = 0;
        self.selected = 0;
        self.refresh();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sets sort column and direction. Keeps the current page.
    ///
    /// Columns marked unsortable are ignored. Keys without a descriptor are
    /// compared as plain values.
    pub fn set_sort(&mut self, key: &str, direction: SortDirection) {
        if let Some(column) = T::column(key)
            && !column.sortable
        {
            debug!(key, "ignoring sort on unsortable column");
            return;
        }
        self.sort_key = Some(key.to_string());
        self.sort_direction = direction;
        self.refresh();
    }

    /// Back to load order.
    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = SortDirection::Ascending;
        self.refresh();
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Toggles sort direction.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
        self.refresh();
    }

    /// Cycles to the next sortable column the role can see.
    pub fn next_sort_column(&mut self, role: Role) {
        let sortable: Vec<&Column> = T::columns()
            .iter()
            .filter(|c| c.sortable && c.is_visible(role))
            .collect();
        if sortable.is_empty() {
            return;
        }
        let next = match self
            .sort_key
            .as_deref()
            .and_then(|k| sortable.iter().position(|c| c.key == k))
        {
            Some(pos) => sortable[(pos + 1) % sortable.len()],
            None => sortable[0],
        };
        self.sort_key = Some(next.key.to_string());
        self.refresh();
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages. An empty table has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.page_size).max(1)
    }

    /// Moves to a page, clamped to the last page.
    pub fn set_page(&mut self, index: usize) {
        self.page_index = index.min(self.page_count() - 1);
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page_index + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page_index.saturating_sub(1));
    }

    /// Changes the page size, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, size: usize) {
        let first_row = self.page_index * self.page_size;
        self.page_size = size.max(1);
        self.set_page(first_row / self.page_size);
    }

    /// Count after filtering, before paging.
    pub fn total_filtered(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Rows of the current page.
    pub fn page(&self) -> Vec<&T> {
        self.page_at(self.page_index)
    }

    /// Rows of page `index`. Empty when out of range.
    pub fn page_at(&self, index: usize) -> Vec<&T> {
        let start = index.saturating_mul(self.page_size);
        self.view
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.items[i])
            .collect()
    }

    /// All filtered rows in sort order.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.view.iter().map(|&i| &self.items[i]).collect()
    }

    /// Moves selection up.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves selection down within the page.
    pub fn select_down(&mut self) {
        let max = self.page().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.page().get(self.selected).copied()
    }

    fn matches(&self, item: &T) -> bool {
        self.filter.is_empty() || item.searchable_text().contains(&self.filter)
    }

    /// Rebuilds the filtered + sorted projection.
    fn refresh(&mut self) {
        let mut view: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.matches(&self.items[i]))
            .collect();

        if let Some(key) = self.sort_key.as_deref() {
            let kind = T::column(key).map(|c| c.kind).unwrap_or(ColumnKind::Plain);
            let mut keys: Vec<SortKey> = view
                .iter()
                .map(|&i| self.items[i].sort_key(key, kind))
                .collect();

            // A column holding both numbers and text is compared as text.
            if keys.iter().any(SortKey::is_numeric) && keys.iter().any(SortKey::is_string) {
                trace!(key, "mixed sort keys, falling back to text");
                keys = view
                    .iter()
                    .map(|&i| fallback_key(&self.items[i], key))
                    .collect();
            }

            let descending = self.sort_direction == SortDirection::Descending;
            let mut keyed: Vec<(usize, SortKey)> = view.into_iter().zip(keys).collect();
            // Stable: equal keys keep load order in both directions.
            keyed.sort_by(|a, b| {
                let ord = a.1.total_cmp(&b.1);
                if descending { ord.reverse() } else { ord }
            });
            view = keyed.into_iter().map(|(i, _)| i).collect();
        }

        self.view = view;
        self.page_index = self.page_index.min(self.page_count() - 1);
        let page_len = self.page().len();
        if self.selected >= page_len {
            self.selected = page_len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Row {
        id: u64,
        code: String,
        email: String,
        born: String,
        rank: FieldValue,
    }

    fn row(id: u64, code: &str, email: &str) -> Row {
        Row {
            id,
            code: code.to_string(),
            email: email.to_string(),
            born: String::new(),
            rank: FieldValue::Integer(0),
        }
    }

    const COLUMNS: &[Column] = &[
        Column::new("id", "ID", ColumnKind::Numeric),
        Column::new("code", "Code", ColumnKind::Code),
        Column::new("email", "Email", ColumnKind::Plain),
        Column::new("born", "Born", ColumnKind::Date),
        Column::new("rank", "Rank", ColumnKind::Numeric),
        Column::new("note", "Note", ColumnKind::Plain).unsortable(),
    ];

    impl TableRow for Row {
        fn id(&self) -> u64 {
            self.id
        }

        fn columns() -> &'static [Column] {
            COLUMNS
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "id" => Some(FieldValue::Text(self.id.to_string())),
                "code" => Some(self.code.as_str().into()),
                "email" => Some(self.email.as_str().into()),
                "born" => Some(self.born.as_str().into()),
                "rank" => Some(self.rank.clone()),
                _ => None,
            }
        }

        fn searchable_text(&self) -> String {
            format!("{}{}{}", self.id, self.code, self.email).to_lowercase()
        }

        fn can_edit(&self, _session: &Session) -> bool {
            true
        }

        fn can_delete(&self, _session: &Session) -> bool {
            true
        }
    }

    fn ids(rows: &[&Row]) -> Vec<u64> {
        rows.iter().map(|r| r.id).collect()
    }

    fn loaded(rows: Vec<Row>, page_size: usize) -> TableState<Row> {
        let mut t = TableState::new(page_size);
        t.load(rows);
        t
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut t = loaded(vec![row(9, "", ""), row(10, "", ""), row(2, "", "")], 10);
        t.set_sort("id", SortDirection::Ascending);
        assert_eq!(ids(&t.page()), vec![2, 9, 10]);
    }

    #[test]
    fn codes_sort_naturally() {
        let mut t = loaded(
            vec![row(1, "B-1", ""), row(2, "A-10", ""), row(3, "A-2", "")],
            10,
        );
        t.set_sort("code", SortDirection::Ascending);
        let codes: Vec<&str> = t.page().iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["A-2", "A-10", "B-1"]);
    }

    #[test]
    fn descending_is_exact_reverse_for_distinct_keys() {
        let rows = vec![row(5, "", ""), row(1, "", ""), row(3, "", ""), row(4, "", "")];
        let mut t = loaded(rows, 10);
        t.set_sort("id", SortDirection::Ascending);
        let asc = ids(&t.filtered_items());
        t.set_sort("id", SortDirection::Descending);
        let mut desc = ids(&t.filtered_items());
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn equal_keys_keep_load_order() {
        let rows = vec![row(1, "A-1", ""), row(2, "A-1", ""), row(3, "A-1", "")];
        let mut t = loaded(rows, 10);
        t.set_sort("code", SortDirection::Ascending);
        assert_eq!(ids(&t.page()), vec![1, 2, 3]);
        t.set_sort("code", SortDirection::Descending);
        assert_eq!(ids(&t.page()), vec![1, 2, 3]);
    }

    #[test]
    fn dates_sort_by_time_not_text() {
        let mut a = row(1, "", "");
        a.born = "2024-12-01".into();
        let mut b = row(2, "", "");
        b.born = "2024-2-01".into();
        let mut t = loaded(vec![a, b], 10);
        t.set_sort("born", SortDirection::Ascending);
        assert_eq!(ids(&t.page()), vec![2, 1]);
    }

    #[test]
    fn malformed_date_falls_back_to_text_until_reloaded() {
        let born = |id: u64, date: &str| Row {
            born: date.to_string(),
            ..row(id, "", "")
        };
        let rows = vec![
            born(1, "2024-12-01"),
            born(2, "garbage"),
            born(3, "2024-2-01"),
        ];
        let mut t = loaded(rows, 10);
        t.set_sort("born", SortDirection::Ascending);
        assert_eq!(ids(&t.page()), vec![1, 3, 2]);

        let clean: Vec<Row> = t.items.iter().filter(|r| r.id != 2).cloned().collect();
        t.load(clean);
        assert_eq!(t.sort_key(), Some("born"));
        assert_eq!(ids(&t.page()), vec![3, 1]);
    }

    #[test]
    fn malformed_values_fall_back_to_text() {
        let mut a = row(1, "", "");
        a.rank = FieldValue::Text("n/a".into());
        let mut b = row(2, "", "");
        b.rank = FieldValue::Integer(10);
        let mut c = row(3, "", "");
        c.rank = FieldValue::Integer(9);
        let mut t = loaded(vec![a, b, c], 10);
        t.set_sort("rank", SortDirection::Ascending);
        // Text order: "10" < "9" < "n/a"
        assert_eq!(ids(&t.page()), vec![2, 3, 1]);
    }

    #[test]
    fn blank_values_sort_first_without_degrading() {
        let mut a = row(1, "", "");
        a.rank = FieldValue::Integer(10);
        let mut b = row(2, "", "");
        b.rank = FieldValue::Text(" ".into());
        let mut c = row(3, "", "");
        c.rank = FieldValue::Integer(9);
        let mut t = loaded(vec![a, b, c], 10);
        t.set_sort("rank", SortDirection::Ascending);
        assert_eq!(ids(&t.page()), vec![2, 3, 1]);
    }

    #[test]
    fn unsortable_column_is_ignored() {
        let mut t = loaded(vec![row(2, "", ""), row(1, "", "")], 10);
        t.set_sort("note", SortDirection::Ascending);
        assert_eq!(t.sort_key(), None);
        assert_eq!(ids(&t.page()), vec![2, 1]);
    }

    #[test]
    fn filter_matches_substring() {
        let mut t = loaded(vec![row(1, "", "ana@x.com"), row(2, "", "bea@x.com")], 10);
        t.set_filter("  ANA ");
        assert_eq!(t.filter(), "ana");
        assert_eq!(t.total_filtered(), 1);
        assert_eq!(ids(&t.page()), vec![1]);
    }

    #[test]
    fn filter_is_idempotent() {
        let mut t = loaded(vec![row(1, "", "ana@x.com"), row(2, "", "bea@x.com")], 10);
        t.set_filter("x.com");
        let once = t.total_filtered();
        t.set_filter("x.com");
        assert_eq!(t.total_filtered(), once);
        assert_eq!(once, 2);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let mut t = loaded(vec![row(1, "", "a"), row(2, "", "b")], 10);
        t.set_filter("a");
        t.set_filter("   ");
        assert_eq!(t.total_filtered(), 2);
    }

    #[test]
    fn reload_keeps_filter_and_sort() {
        let mut t = loaded(vec![row(1, "", "x1"), row(2, "", "y")], 10);
        t.set_filter("x");
        t.set_sort("id", SortDirection::Descending);
        t.load(vec![row(3, "", "x3"), row(4, "", "x4"), row(5, "", "z")]);
        assert_eq!(t.filter(), "x");
        assert_eq!(t.total_filtered(), 2);
        assert_eq!(ids(&t.page()), vec![4, 3]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let t = loaded(vec![row(1, "", ""), row(2, "", ""), row(3, "", "")], 10);
        assert!(t.page_at(1).is_empty());
        assert!(t.page_at(usize::MAX).is_empty());
    }

    #[test]
    fn pages_slice_the_sorted_view() {
        let rows = (1..=7).rev().map(|i| row(i, "", "")).collect();
        let mut t = loaded(rows, 3);
        t.set_sort("id", SortDirection::Ascending);
        assert_eq!(t.page_count(), 3);
        assert_eq!(ids(&t.page()), vec![1, 2, 3]);
        t.next_page();
        assert_eq!(ids(&t.page()), vec![4, 5, 6]);
        t.next_page();
        assert_eq!(ids(&t.page()), vec![7]);
        t.next_page();
        assert_eq!(t.page_index(), 2);
    }

    #[test]
    fn sort_keeps_page_and_filter_resets_it() {
        let rows = (1..=6).map(|i| row(i, "", "a")).collect();
        let mut t = loaded(rows, 2);
        t.set_page(2);
        t.set_sort("id", SortDirection::Descending);
        assert_eq!(t.page_index(), 2);
        assert_eq!(ids(&t.page()), vec![2, 1]);
        t.set_filter("a");
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn load_resets_page() {
        let rows: Vec<Row> = (1..=6).map(|i| row(i, "", "")).collect();
        let mut t = loaded(rows.clone(), 2);
        t.set_page(2);
        t.load(rows);
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn page_size_change_keeps_first_row_visible() {
        let rows = (1..=20).map(|i| row(i, "", "")).collect();
        let mut t = loaded(rows, 5);
        t.set_page(3); // rows 16..=20
        t.set_page_size(10);
        assert_eq!(t.page_index(), 1);
        assert_eq!(t.page()[0].id, 11);
        t.set_page_size(0);
        assert_eq!(t.page_size(), 1);
    }

    #[test]
    fn empty_table_operations_are_noops() {
        let mut t: TableState<Row> = TableState::default();
        t.set_filter("x");
        t.set_sort("id", SortDirection::Descending);
        t.next_page();
        t.select_down();
        assert_eq!(t.total_filtered(), 0);
        assert_eq!(t.page_count(), 1);
        assert_eq!(t.page_index(), 0);
        assert!(t.page().is_empty());
        assert!(t.selected_item().is_none());
    }

    #[test]
    fn next_sort_column_cycles_sortable_columns() {
        let mut t = loaded(vec![row(1, "", "")], 10);
        t.next_sort_column(Role::Admin);
        assert_eq!(t.sort_key(), Some("id"));
        t.next_sort_column(Role::Admin);
        assert_eq!(t.sort_key(), Some("code"));
        for _ in 0..4 {
            t.next_sort_column(Role::Admin);
        }
        // "note" is unsortable, so the cycle wraps back to "id".
        assert_eq!(t.sort_key(), Some("id"));
    }

    #[test]
    fn selection_stays_within_page() {
        let rows = (1..=3).map(|i| row(i, "", "")).collect();
        let mut t = loaded(rows, 2);
        t.select_down();
        t.select_down();
        assert_eq!(t.selected, 1);
        assert_eq!(t.selected_item().map(|r| r.id), Some(2));
        t.next_page();
        assert_eq!(t.selected_item().map(|r| r.id), Some(3));
        t.select_up();
        assert_eq!(t.selected, 0);
    }
}
