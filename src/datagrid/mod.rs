//! Sortable, filterable, paginated data grid.
//!
//! The grid engine takes a row collection and a set of [`Column`]
//! definitions and produces an ordered, optionally filtered, paginated view
//! with optional per-row expandable detail content. It owns only ephemeral
//! view state (sort, filters, page, cursor, expanded keys); rows are
//! immutable snapshots replaced wholesale via [`Model::set_rows`].
//!
//! Rendering is a pure function of `(rows, columns, view state)`: calling
//! [`Model::view`] twice without an intervening mutation yields identical
//! output, and no operation here performs I/O or mutates a row.
//!
//! # Examples
//!
//! ```rust
//! use trialboard::datagrid::{CellValue, Column, GridRow, Model, PageSize};
//!
//! #[derive(Clone)]
//! struct City {
//!     name: &'static str,
//!     population: i64,
//! }
//!
//! impl GridRow for City {
//!     fn key(&self) -> String {
//!         self.name.to_string()
//!     }
//!
//!     fn field(&self, name: &str) -> Option<CellValue> {
//!         match name {
//!             "name" => Some(self.name.into()),
//!             "population" => Some(self.population.into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let columns = vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("population", "Population").sortable(),
//! ];
//! let mut grid = Model::new(columns).with_rows(vec![
//!     City { name: "Osaka", population: 2_750_000 },
//!     City { name: "Kyoto", population: 1_460_000 },
//! ]);
//!
//! grid.sort_by(1);
//! assert_eq!(grid.visible_indices(), vec![1, 0]);
//! grid.sort_by(1); // second selection flips to descending
//! assert_eq!(grid.visible_indices(), vec![0, 1]);
//! ```

mod column;

pub use column::{natural_order, CellPadding, CellValue, Column, GridRow};

use crate::key::{Binding, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// The column's base direction, as defined by its comparator.
    Ascending,
    /// The exact reverse of the base direction for unequal rows.
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One selectable rows-per-page option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// Pages of at most `n` rows.
    Limited(usize),
    /// No slicing; every visible row renders on one page.
    All,
}

impl PageSize {
    /// The label shown in the grid footer.
    pub fn label(&self) -> String {
        match self {
            PageSize::Limited(n) => n.to_string(),
            PageSize::All => "All".to_string(),
        }
    }
}

/// Key bindings for grid interaction.
///
/// All bindings are replaceable; the defaults combine arrow keys with
/// vim-style movement the way the rest of the crate's components do.
#[derive(Debug, Clone)]
pub struct GridKeyMap {
    /// Move the cursor up one row. Default: Up, 'k'.
    pub cursor_up: Binding,
    /// Move the cursor down one row. Default: Down, 'j'.
    pub cursor_down: Binding,
    /// Previous page. Default: Left, 'h', PageUp.
    pub prev_page: Binding,
    /// Next page. Default: Right, 'l', PageDown.
    pub next_page: Binding,
    /// Toggle the sort direction on the sorted column, or start sorting on
    /// the first sortable column. Default: 's'.
    pub toggle_sort: Binding,
    /// Move the sort to the next sortable column (ascending). Default: Tab.
    pub cycle_sort_column: Binding,
    /// Cycle through the rows-per-page options. Default: 'p'.
    pub cycle_page_size: Binding,
    /// Expand or collapse the detail region of the row under the cursor.
    /// Default: Enter, Space.
    pub toggle_expand: Binding,
}

impl Default for GridKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            cursor_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            prev_page: Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown])
                .with_help("→/l", "next page"),
            toggle_sort: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            cycle_sort_column: Binding::new(vec![KeyCode::Tab]).with_help("tab", "sort column"),
            cycle_page_size: Binding::new(vec![KeyCode::Char('p')]).with_help("p", "page size"),
            toggle_expand: Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter", "details"),
        }
    }
}

impl KeyMapTrait for GridKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.prev_page,
            &self.next_page,
            &self.toggle_sort,
            &self.toggle_expand,
        ]
    }
}

/// Styles for grid rendering. All defaults use adaptive colors.
#[derive(Debug, Clone)]
pub struct GridStyles {
    /// Column header row.
    pub header: Style,
    /// The row under the cursor.
    pub selected: Style,
    /// Ordinary data cells.
    pub cell: Style,
    /// Footer line (page position, row count, page size).
    pub footer: Style,
    /// Expanded detail regions.
    pub detail: Style,
}

impl Default for GridStyles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            selected: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#7D56F4",
                Dark: "#AD8CFF",
            }),
            cell: Style::new(),
            footer: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            detail: Style::new().padding_left(4),
        }
    }
}

type DetailFn = Box<dyn Fn(usize) -> String>;

const DEFAULT_PAGE_SIZES: [PageSize; 4] = [
    PageSize::Limited(10),
    PageSize::Limited(25),
    PageSize::Limited(50),
    PageSize::All,
];

/// The data grid model.
///
/// See the [module documentation](self) for an overview and an example.
pub struct Model<R: GridRow> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    sort: Option<(usize, SortDirection)>,
    filters: BTreeMap<usize, BTreeSet<String>>,
    page: usize,
    page_sizes: Vec<PageSize>,
    page_size_index: usize,
    expanded: HashSet<String>,
    detail: Option<DetailFn>,
    cursor: usize,
    dense: bool,
    /// Key bindings.
    pub keymap: GridKeyMap,
    /// Rendering styles.
    pub styles: GridStyles,
}

impl<R: GridRow> fmt::Debug for Model<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("filters", &self.filters)
            .field("page", &self.page)
            .field("expanded", &self.expanded)
            .field("dense", &self.dense)
            .finish()
    }
}

impl<R: GridRow> Model<R> {
    /// Creates an empty grid over the given columns.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            sort: None,
            filters: BTreeMap::new(),
            page: 0,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            page_size_index: 0,
            expanded: HashSet::new(),
            detail: None,
            cursor: 0,
            dense: false,
            keymap: GridKeyMap::default(),
            styles: GridStyles::default(),
        }
    }

    /// Sets the initial row collection (builder pattern).
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replaces the rows-per-page options. The list must be non-empty;
    /// an empty list is ignored.
    pub fn with_page_sizes(mut self, sizes: Vec<PageSize>) -> Self {
        if !sizes.is_empty() {
            self.page_sizes = sizes;
            self.page_size_index = 0;
        }
        self
    }

    /// Selects the starting page size. Unknown sizes are ignored.
    pub fn with_initial_page_size(mut self, size: PageSize) -> Self {
        if let Some(i) = self.page_sizes.iter().position(|s| *s == size) {
            self.page_size_index = i;
        }
        self
    }

    /// Installs a per-row detail producer, enabling row expansion.
    ///
    /// The producer is called with the row's position in the caller-supplied
    /// collection, not its rendered position, so it addresses the same row
    /// regardless of the active sort or filter.
    pub fn with_detail(mut self, detail: impl Fn(usize) -> String + 'static) -> Self {
        self.detail = Some(Box::new(detail));
        self
    }

    /// Replaces the detail producer, typically alongside
    /// [`set_rows`](Self::set_rows) when the closure captures row data.
    pub fn set_detail(&mut self, detail: impl Fn(usize) -> String + 'static) {
        self.detail = Some(Box::new(detail));
    }

    /// Enables compact rendering.
    pub fn dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    /// Replaces the row collection.
    ///
    /// Sort, filter, page size, and expansion state survive the swap. Keys
    /// that no longer exist in the new collection simply match nothing; the
    /// page index is re-clamped into the new range.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.clamp_page();
        self.clamp_cursor();
    }

    /// The current row collection, in source order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The column definitions.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// The active sort, if any, as `(column index, direction)`.
    pub fn sort_state(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    /// The current page index (zero-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// The active rows-per-page option.
    pub fn page_size(&self) -> PageSize {
        self.page_sizes[self.page_size_index]
    }

    /// Sorts by the given column.
    ///
    /// The first selection sorts ascending in the column's base direction;
    /// re-selecting the sorted column flips the direction; selecting a
    /// different sortable column replaces the sort. Columns not marked
    /// sortable are ignored. Resets to the first page.
    pub fn sort_by(&mut self, col: usize) {
        if col >= self.columns.len() || !self.columns[col].sortable {
            return;
        }
        self.sort = match self.sort {
            Some((active, direction)) if active == col => Some((col, direction.flipped())),
            _ => Some((col, SortDirection::Ascending)),
        };
        self.page = 0;
        self.clamp_cursor();
    }

    /// Toggles the sort direction on the sorted column, or starts sorting on
    /// the first sortable column when nothing is sorted yet.
    pub fn toggle_sort(&mut self) {
        match self.sort {
            Some((col, _)) => self.sort_by(col),
            None => {
                if let Some(col) = self.columns.iter().position(|c| c.sortable) {
                    self.sort_by(col);
                }
            }
        }
    }

    /// Moves the sort to the next sortable column, ascending.
    pub fn cycle_sort_column(&mut self) {
        let start = match self.sort {
            Some((col, _)) => col + 1,
            None => 0,
        };
        let n = self.columns.len();
        for offset in 0..n {
            let col = (start + offset) % n;
            if self.columns[col].sortable {
                self.sort = Some((col, SortDirection::Ascending));
                self.page = 0;
                self.clamp_cursor();
                return;
            }
        }
    }

    /// Restricts the given filterable column to the listed display values.
    ///
    /// An empty selection means "show all values of this column". Filters on
    /// different columns combine with logical AND. Non-filterable columns
    /// are ignored. Resets to the first page.
    pub fn set_filter(&mut self, col: usize, values: BTreeSet<String>) {
        if col >= self.columns.len() || !self.columns[col].filterable {
            return;
        }
        if values.is_empty() {
            self.filters.remove(&col);
        } else {
            self.filters.insert(col, values);
        }
        self.page = 0;
        self.clamp_cursor();
    }

    /// Clears the filter on one column.
    pub fn clear_filter(&mut self, col: usize) {
        if self.filters.remove(&col).is_some() {
            self.page = 0;
            self.clamp_cursor();
        }
    }

    /// The sorted distinct display values of a filterable column across all
    /// rows, filtered or not. Missing cells participate as the empty string.
    pub fn distinct_values(&self, col: usize) -> Vec<String> {
        if col >= self.columns.len() {
            return Vec::new();
        }
        let column = &self.columns[col];
        let mut values: BTreeSet<String> = BTreeSet::new();
        for (i, row) in self.rows.iter().enumerate() {
            values.insert(
                column
                    .cell_value(i, row)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        values.into_iter().collect()
    }

    /// Selects a rows-per-page option by index and resets to the first page.
    pub fn set_page_size(&mut self, index: usize) {
        if index < self.page_sizes.len() {
            self.page_size_index = index;
            self.page = 0;
            self.clamp_cursor();
        }
    }

    /// Advances to the next rows-per-page option, wrapping around.
    pub fn cycle_page_size(&mut self) {
        self.set_page_size((self.page_size_index + 1) % self.page_sizes.len());
    }

    /// The number of pages for the current filter and page size, at least 1.
    pub fn page_count(&self) -> usize {
        match self.page_size() {
            PageSize::All => 1,
            PageSize::Limited(n) => {
                let visible = self.visible_indices().len();
                if visible == 0 {
                    1
                } else {
                    visible.div_ceil(n.max(1))
                }
            }
        }
    }

    /// Moves to the next page, stopping at the last one.
    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            self.clamp_cursor();
        }
    }

    /// Moves to the previous page, stopping at the first one.
    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.clamp_cursor();
        }
    }

    /// Toggles the expanded state of the row with the given key.
    pub fn toggle_expanded(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    /// Toggles the detail region of the row under the cursor. Has no effect
    /// without a detail producer or on an empty page.
    pub fn toggle_expanded_at_cursor(&mut self) {
        if self.detail.is_none() {
            return;
        }
        if let Some(&index) = self.page_indices().get(self.cursor) {
            let key = self.rows[index].key();
            self.toggle_expanded(&key);
        }
    }

    /// Whether the row with the given key is expanded.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Original indices of the visible rows: filtered, then stably sorted.
    ///
    /// With no sort selected this is the source order of the rows that pass
    /// the active filters. Sorting is stable, so rows that compare equal
    /// keep their relative source order in either direction, and descending
    /// is the exact reverse of ascending for rows that compare unequal.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.passes_filters(i))
            .collect();
        if let Some((col, direction)) = self.sort {
            let column = &self.columns[col];
            indices.sort_by(|&a, &b| {
                let ord = column.compare((a, &self.rows[a]), (b, &self.rows[b]));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        indices
    }

    /// The slice of [`visible_indices`](Self::visible_indices) on the
    /// current page.
    pub fn page_indices(&self) -> Vec<usize> {
        let visible = self.visible_indices();
        match self.page_size() {
            PageSize::All => visible,
            PageSize::Limited(n) => {
                let n = n.max(1);
                let start = (self.page * n).min(visible.len());
                let end = (start + n).min(visible.len());
                visible[start..end].to_vec()
            }
        }
    }

    fn passes_filters(&self, index: usize) -> bool {
        self.filters.iter().all(|(&col, accepted)| {
            let value = self.columns[col]
                .cell_value(index, &self.rows[index])
                .map(|v| v.to_string())
                .unwrap_or_default();
            accepted.contains(&value)
        })
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.page_indices().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Moves the cursor up within the current page.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down within the current page.
    pub fn cursor_down(&mut self) {
        let len = self.page_indices().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Processes a key message against the grid key map.
    ///
    /// All grid operations complete synchronously inside the handler; the
    /// grid never schedules commands of its own.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.cursor_up.matches(key_msg) {
                self.cursor_up();
            } else if self.keymap.cursor_down.matches(key_msg) {
                self.cursor_down();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            } else if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.toggle_sort.matches(key_msg) {
                self.toggle_sort();
            } else if self.keymap.cycle_sort_column.matches(key_msg) {
                self.cycle_sort_column();
            } else if self.keymap.cycle_page_size.matches(key_msg) {
                self.cycle_page_size();
            } else if self.keymap.toggle_expand.matches(key_msg) {
                self.toggle_expanded_at_cursor();
            }
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.label.width() + 2) // room for the sort marker
            .collect();
        for (i, row) in self.rows.iter().enumerate() {
            for (c, column) in self.columns.iter().enumerate() {
                let text = column
                    .cell_value(i, row)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                widths[c] = widths[c].max(text.width());
            }
        }
        widths
    }

    fn pad(text: &str, width: usize) -> String {
        let w = text.width();
        let mut out = String::from(text);
        for _ in w..width {
            out.push(' ');
        }
        out
    }

    /// Renders the grid.
    ///
    /// The output is a pure function of the rows, the columns, and the
    /// current view state. An empty row collection renders the header and
    /// footer with zero data rows.
    pub fn view(&self) -> String {
        let widths = self.column_widths();
        let gap = if self.dense { " " } else { "   " };

        let mut header_cells = Vec::with_capacity(self.columns.len());
        for (c, column) in self.columns.iter().enumerate() {
            let marker = match self.sort {
                Some((active, SortDirection::Ascending)) if active == c => " ▲",
                Some((active, SortDirection::Descending)) if active == c => " ▼",
                _ => "",
            };
            let label = format!("{}{}", column.label, marker);
            header_cells.push(Self::pad(&label, widths[c]));
        }
        let mut out = self.styles.header.render(&header_cells.join(gap));
        out.push('\n');

        let page_indices = self.page_indices();
        for (pos, &index) in page_indices.iter().enumerate() {
            let row = &self.rows[index];
            let mut cells = Vec::with_capacity(self.columns.len());
            for (c, column) in self.columns.iter().enumerate() {
                let text = column
                    .cell_value(index, row)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                cells.push(Self::pad(&text, widths[c]));
            }
            let line = cells.join(gap);
            if pos == self.cursor {
                out.push_str(&self.styles.selected.render(&line));
            } else {
                out.push_str(&self.styles.cell.render(&line));
            }
            out.push('\n');

            if let Some(detail) = &self.detail {
                if self.expanded.contains(&row.key()) {
                    out.push_str(&self.styles.detail.render(&detail(index)));
                    out.push('\n');
                }
            }
        }

        let footer = format!(
            "page {}/{} · {} rows · {}/page",
            self.page + 1,
            self.page_count(),
            self.visible_indices().len(),
            self.page_size().label(),
        );
        out.push_str(&self.styles.footer.render(&footer));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Item {
        id: i64,
        group: &'static str,
        score: Option<f64>,
    }

    impl GridRow for Item {
        fn key(&self) -> String {
            self.id.to_string()
        }

        fn field(&self, name: &str) -> Option<CellValue> {
            match name {
                "id" => Some(CellValue::Int(self.id)),
                "group" => Some(CellValue::from(self.group)),
                "score" => self.score.map(CellValue::Float),
                _ => None,
            }
        }
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("id", "Id").sortable(),
            Column::new("group", "Group").sortable().filterable(),
            Column::new("score", "Score").sortable(),
        ]
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, group: "a", score: Some(0.3) },
            Item { id: 2, group: "b", score: Some(0.1) },
            Item { id: 3, group: "a", score: Some(0.3) },
            Item { id: 4, group: "b", score: None },
            Item { id: 5, group: "a", score: Some(0.9) },
        ]
    }

    fn grid() -> Model<Item> {
        Model::new(columns()).with_rows(items())
    }

    #[test]
    fn test_unsorted_is_source_order() {
        assert_eq!(grid().visible_indices(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_descending_reverses_unequal_and_keeps_ties_stable() {
        let mut g = grid();
        g.sort_by(2);
        // Ascending natural order on score; missing last; the 0.3 tie keeps
        // source order (id 1 before id 3).
        assert_eq!(g.visible_indices(), vec![1, 0, 2, 4, 3]);
        g.sort_by(2);
        // Descending: unequal elements exactly reversed, ties still in
        // source order within the chosen direction.
        assert_eq!(g.sort_state(), Some((2, SortDirection::Descending)));
        assert_eq!(g.visible_indices(), vec![3, 4, 0, 2, 1]);
        g.sort_by(2);
        assert_eq!(g.sort_state(), Some((2, SortDirection::Ascending)));
    }

    #[test]
    fn test_selecting_new_column_replaces_sort() {
        let mut g = grid();
        g.sort_by(2);
        g.sort_by(2);
        g.sort_by(0);
        assert_eq!(g.sort_state(), Some((0, SortDirection::Ascending)));
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let mut g = Model::new(vec![
            Column::new("id", "Id"),
            Column::new("group", "Group").sortable(),
        ])
        .with_rows(items());
        g.sort_by(0);
        assert_eq!(g.sort_state(), None);
    }

    #[test]
    fn test_filter_restricts_and_is_idempotent() {
        let mut g = grid();
        let selection: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        g.set_filter(1, selection.clone());
        let once = g.visible_indices();
        assert_eq!(once, vec![0, 2, 4]);
        g.set_filter(1, selection);
        assert_eq!(g.visible_indices(), once);
    }

    #[test]
    fn test_filters_and_across_columns() {
        let mut g = grid();
        g.set_filter(1, ["a".to_string()].into_iter().collect());
        // A second filterable column would AND with the first; emptying the
        // selection restores "show all".
        g.set_filter(1, BTreeSet::new());
        assert_eq!(g.visible_indices(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_distinct_values_include_missing_as_empty() {
        let g = grid();
        assert_eq!(g.distinct_values(1), vec!["a".to_string(), "b".to_string()]);
        let scores = g.distinct_values(2);
        assert!(scores.contains(&String::new()));
        assert!(scores.contains(&"0.3".to_string()));
    }

    #[test]
    fn test_pages_concatenate_to_visible_sequence() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_page_sizes(vec![PageSize::Limited(2), PageSize::All]);
        g.sort_by(2);
        let expected = g.visible_indices();

        let mut concatenated = Vec::new();
        for page in 0..g.page_count() {
            while g.page() < page {
                g.next_page();
            }
            concatenated.extend(g.page_indices());
        }
        assert_eq!(concatenated, expected);
    }

    #[test]
    fn test_show_all_disables_slicing() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_page_sizes(vec![PageSize::Limited(2), PageSize::All]);
        g.set_page_size(1);
        assert_eq!(g.page_count(), 1);
        assert_eq!(g.page_indices().len(), 5);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_page_sizes(vec![PageSize::Limited(2), PageSize::Limited(3)]);
        g.next_page();
        assert_eq!(g.page(), 1);
        g.set_page_size(1);
        assert_eq!(g.page(), 0);
    }

    #[test]
    fn test_sort_and_filter_reset_page() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_page_sizes(vec![PageSize::Limited(2)]);
        g.next_page();
        g.sort_by(0);
        assert_eq!(g.page(), 0);
        g.next_page();
        g.set_filter(1, ["a".to_string()].into_iter().collect());
        assert_eq!(g.page(), 0);
    }

    #[test]
    fn test_expansion_survives_row_replacement_with_missing_key() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_detail(|index| format!("detail for original index {}", index));
        g.toggle_expanded("1");
        assert!(g.is_expanded("1"));

        // Row 1 disappears in the refreshed snapshot; the stale key must
        // match nothing and rendering must not fail.
        g.set_rows(vec![
            Item { id: 2, group: "b", score: Some(0.1) },
            Item { id: 6, group: "a", score: Some(0.4) },
        ]);
        assert!(g.is_expanded("1"));
        let view = g.view();
        assert!(!view.contains("detail for"));
    }

    #[test]
    fn test_detail_receives_original_index() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_detail(|index| format!("<original {}>", index));
        g.sort_by(2);
        g.sort_by(2); // descending; id 4 (original index 3) first
        g.toggle_expanded("4");
        let view = g.view();
        assert!(view.contains("<original 3>"));
    }

    #[test]
    fn test_empty_rows_render_without_error() {
        let g: Model<Item> = Model::new(columns());
        let view = g.view();
        assert!(view.contains("Id"));
        assert!(view.contains("0 rows"));
    }

    #[test]
    fn test_set_rows_clamps_page() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_page_sizes(vec![PageSize::Limited(2)]);
        g.next_page();
        g.next_page();
        assert_eq!(g.page(), 2);
        g.set_rows(vec![Item { id: 9, group: "a", score: None }]);
        assert_eq!(g.page(), 0);
    }

    #[test]
    fn test_cursor_expansion_toggle() {
        let mut g = Model::new(columns())
            .with_rows(items())
            .with_detail(|_| "x".to_string());
        g.cursor_down();
        g.toggle_expanded_at_cursor();
        assert!(g.is_expanded("2"));
        g.toggle_expanded_at_cursor();
        assert!(!g.is_expanded("2"));
    }

    #[test]
    fn test_view_is_pure() {
        let mut g = grid();
        g.sort_by(2);
        g.set_filter(1, ["a".to_string()].into_iter().collect());
        assert_eq!(g.view(), g.view());
    }
}
