//! The dual-mode state controller.
//!
//! [`Controller`] is the single source of truth for pagination, sort, search and
//! column visibility. The view layer only talks to it, and it behaves the same way
//! from the outside in both modes. What differs is the [`Strategy`] chosen at
//! construction time:
//!
//! - the **local** strategy owns the state and derives the current page from the
//!   complete row set by filtering, sorting and slicing it;
//! - the **delegated** strategy never touches the state. It forwards every change
//!   request to the caller's callbacks and renders the supplied rows as they are,
//!   because they already are the requested page.
//!
//! Both strategies receive exactly the same change requests, already validated and
//! clamped by the controller, so fixes to navigation logic apply to both modes.
//!
//! ```rust
//! use bubbletea_datatable::table::{CellValue, Column, Controller, Record};
//!
//! struct Topic(usize);
//!
//! impl Record for Topic {
//!     fn key(&self) -> String {
//!         self.0.to_string()
//!     }
//!     fn value(&self, _column: &str) -> CellValue {
//!         CellValue::Text(format!("Topic {}", self.0))
//!     }
//! }
//!
//! let mut table = Controller::local(vec![Column::text("name", "Name")], 10);
//! table.set_rows((1..=23).map(Topic).collect());
//! assert_eq!(table.page_count(), 3);
//!
//! table.go_to_page(2);
//! let keys: Vec<String> = table.visible_rows().iter().map(|t| t.key()).collect();
//! assert_eq!(keys, ["21", "22", "23"]);
//! ```

use super::column::{CellValue, Column, Lookups, Record};
use super::state::{DelegatedState, Mode, SortState, TableState};
use crate::error::{Result, TableError};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// How search text is matched against cell text in local mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match.
    Fuzzy,
}

type PageFn = Box<dyn FnMut(usize) + Send>;
type SortFn = Box<dyn FnMut(Option<SortState>) + Send>;
type SearchFn = Box<dyn FnMut(&str) + Send>;
type RowFn<R> = Box<dyn FnMut(&R) + Send>;

/// Outbound notifications, one per concern.
///
/// Each is called exactly once per user action that changes its concern and never
/// speculatively. In delegated mode these are the only way a change takes effect.
pub struct Callbacks<R> {
    on_page_change: Option<PageFn>,
    on_page_size_change: Option<PageFn>,
    on_sorting_change: Option<SortFn>,
    on_search_change: Option<SearchFn>,
    on_row_click: Option<RowFn<R>>,
}

impl<R> Default for Callbacks<R> {
    fn default() -> Self {
        Self {
            on_page_change: None,
            on_page_size_change: None,
            on_sorting_change: None,
            on_search_change: None,
            on_row_click: None,
        }
    }
}

impl<R> Callbacks<R> {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the requested page index.
    pub fn on_page_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_page_change = Some(Box::new(f));
        self
    }

    /// Called with the requested page size.
    pub fn on_page_size_change(mut self, f: impl FnMut(usize) + Send + 'static) -> Self {
        self.on_page_size_change = Some(Box::new(f));
        self
    }

    /// Called with the requested sort (`None` means unsorted).
    pub fn on_sorting_change(mut self, f: impl FnMut(Option<SortState>) + Send + 'static) -> Self {
        self.on_sorting_change = Some(Box::new(f));
        self
    }

    /// Called with the requested search text.
    pub fn on_search_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_search_change = Some(Box::new(f));
        self
    }

    /// Called with the activated row.
    pub fn on_row_click(mut self, f: impl FnMut(&R) + Send + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    fn notify(&mut self, change: &Change) -> bool {
        let called = match change {
            Change::Page(page) => self.on_page_change.as_mut().map(|f| f(*page)),
            Change::PageSize(size) => self.on_page_size_change.as_mut().map(|f| f(*size)),
            Change::Sort(sort) => self.on_sorting_change.as_mut().map(|f| f(sort.clone())),
            Change::Search(text) => self.on_search_change.as_mut().map(|f| f(text.as_str())),
        };
        called.is_some()
    }
}

/// A validated state change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Show this page.
    Page(usize),
    /// Use this many rows per page.
    PageSize(usize),
    /// Sort like this.
    Sort(Option<SortState>),
    /// Search for this text.
    Search(String),
}

/// What the local and delegated modes do differently.
pub trait Strategy<R: Record>: Send {
    /// The mode this strategy implements.
    fn mode(&self) -> Mode;

    /// Handles a change request. Returns whether `state` was modified.
    fn apply(&self, state: &mut TableState, change: Change, callbacks: &mut Callbacks<R>) -> bool;

    /// Ordered indices into `rows` forming the set the table pages through.
    fn derive(&self, rows: &[R], state: &TableState, scope: &SearchScope<'_, R>) -> Vec<usize>;

    /// The part of `derived` shown on `page_index`.
    fn page<'a>(&self, derived: &'a [usize], page_index: usize, page_size: usize) -> &'a [usize];
}

/// Columns and lookups a strategy searches and sorts with.
pub struct SearchScope<'a, R> {
    /// All configured columns.
    pub columns: &'a [Column<R>],
    /// Relation labels and date format.
    pub lookups: &'a Lookups,
    /// Search matching.
    pub match_mode: MatchMode,
}

impl<R: Record> SearchScope<'_, R> {
    fn search(&self, rows: &[R], needle: &str) -> Vec<usize> {
        if needle.is_empty() {
            return (0..rows.len()).collect();
        }

        let mut searched: Vec<&Column<R>> =
            self.columns.iter().filter(|c| c.is_searchable()).collect();
        if searched.is_empty() {
            searched = self.columns.iter().collect();
        }

        let lowered = needle.to_lowercase();
        let matcher = SkimMatcherV2::default();
        rows.iter()
            .enumerate()
            .filter(|(_, row)| {
                searched.iter().any(|column| {
                    let text = row
                        .value(column.id())
                        .display_text(column.relation_name(), self.lookups);
                    match self.match_mode {
                        MatchMode::Substring => text.to_lowercase().contains(&lowered),
                        MatchMode::Fuzzy => matcher.fuzzy_match(&text, needle).is_some(),
                    }
                })
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn sort(&self, rows: &[R], indices: Vec<usize>, sort: &SortState) -> Vec<usize> {
        let Some(column) = self.columns.iter().find(|c| c.id() == sort.field) else {
            return indices;
        };
        let descending = sort.direction == super::state::SortDirection::Descending;
        let relation = column.relation_name();

        let mut keyed: Vec<(usize, CellValue)> = indices
            .into_iter()
            .map(|i| (i, rows[i].value(&sort.field)))
            .collect();
        keyed.sort_by(|(_, a), (_, b)| match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => {
                let order = a.compare(b, relation, self.lookups);
                if descending {
                    order.reverse()
                } else {
                    order
                }
            }
        });
        keyed.into_iter().map(|(i, _)| i).collect()
    }
}

/// Owns the state and derives everything from the full row set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStrategy;

impl<R: Record> Strategy<R> for LocalStrategy {
    fn mode(&self) -> Mode {
        Mode::Local
    }

    fn apply(&self, state: &mut TableState, change: Change, callbacks: &mut Callbacks<R>) -> bool {
        callbacks.notify(&change);
        match change {
            Change::Page(page) => state.page_index = page,
            Change::PageSize(size) => {
                // Keep the first row of the current page on screen.
                let top = state.page_index * state.page_size;
                state.page_size = size;
                state.page_index = top / size;
            }
            Change::Sort(sort) => {
                state.sort = sort;
                state.page_index = 0;
            }
            Change::Search(text) => {
                state.search_text = text;
                state.page_index = 0;
            }
        }
        true
    }

    fn derive(&self, rows: &[R], state: &TableState, scope: &SearchScope<'_, R>) -> Vec<usize> {
        let matched = scope.search(rows, &state.search_text);
        match &state.sort {
            Some(sort) => scope.sort(rows, matched, sort),
            None => matched,
        }
    }

    fn page<'a>(&self, derived: &'a [usize], page_index: usize, page_size: usize) -> &'a [usize] {
        let start = (page_index * page_size).min(derived.len());
        let end = (start + page_size).min(derived.len());
        &derived[start..end]
    }
}

/// Forwards every change to the caller and shows rows exactly as supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegatedStrategy;

impl<R: Record> Strategy<R> for DelegatedStrategy {
    fn mode(&self) -> Mode {
        Mode::Delegated
    }

    fn apply(&self, _state: &mut TableState, change: Change, callbacks: &mut Callbacks<R>) -> bool {
        if !callbacks.notify(&change) {
            log::debug!("delegated table has no callback for {change:?}, dropping it");
        }
        false
    }

    fn derive(&self, rows: &[R], _state: &TableState, _scope: &SearchScope<'_, R>) -> Vec<usize> {
        (0..rows.len()).collect()
    }

    fn page<'a>(&self, derived: &'a [usize], _page_index: usize, _page_size: usize) -> &'a [usize] {
        derived
    }
}

/// Pagination, sort, search and visibility state of one table.
pub struct Controller<R: Record> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    lookups: Lookups,
    state: TableState,
    total_page_count: Option<usize>,
    match_mode: MatchMode,
    callbacks: Callbacks<R>,
    strategy: Box<dyn Strategy<R>>,
    derived: Vec<usize>,
}

impl<R: Record> Controller<R> {
    fn with_strategy(columns: Vec<Column<R>>, state: TableState, strategy: Box<dyn Strategy<R>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            lookups: Lookups::default(),
            state,
            total_page_count: None,
            match_mode: MatchMode::default(),
            callbacks: Callbacks::default(),
            strategy,
            derived: Vec::new(),
        }
    }

    /// A controller that owns its state and pages through the complete row set.
    pub fn local(columns: Vec<Column<R>>, page_size: usize) -> Self {
        let state = TableState {
            page_size: page_size.max(1),
            ..TableState::default()
        };
        Self::with_strategy(columns, state, Box::new(LocalStrategy))
    }

    /// A controller whose pagination, sort and search belong to the caller.
    pub fn delegated(columns: Vec<Column<R>>, inputs: DelegatedState) -> Self {
        let mut controller =
            Self::with_strategy(columns, TableState::default(), Box::new(DelegatedStrategy));
        controller.sync(inputs);
        controller
    }

    /// Which mode this controller runs in.
    pub fn mode(&self) -> Mode {
        self.strategy.mode()
    }

    /// Current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Configured columns.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Looks up a column by id.
    pub fn column(&self, id: &str) -> Result<&Column<R>> {
        self.columns
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    /// Columns currently visible, in order.
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.columns
            .iter()
            .filter(|c| self.state.is_visible(c.id()))
            .collect()
    }

    /// The row set as supplied.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replaces the row set. In local mode the page index is clamped if the new
    /// set has fewer pages.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.refresh();
    }

    /// Cell collaborators.
    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    /// Replaces the cell collaborators. Labels take part in search and sort.
    pub fn set_lookups(&mut self, lookups: Lookups) {
        self.lookups = lookups;
        self.refresh();
    }

    /// Current search matching.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Changes how search text is matched in local mode.
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.match_mode = mode;
        self.refresh();
    }

    /// Installs the outbound callbacks.
    pub fn set_callbacks(&mut self, callbacks: Callbacks<R>) {
        self.callbacks = callbacks;
    }

    /// Takes the state a delegated caller fetched rows with. Ignored in local mode.
    pub fn sync(&mut self, inputs: DelegatedState) {
        if self.mode() == Mode::Local {
            log::debug!("ignoring delegated state on a local table");
            return;
        }
        self.state.page_index = inputs.page_index;
        self.state.page_size = inputs.page_size.max(1);
        self.state.sort = inputs.sort;
        self.state.search_text = inputs.search_text;
        self.total_page_count = inputs.total_page_count;
        self.refresh();
    }

    fn refresh(&mut self) {
        let scope = SearchScope {
            columns: &self.columns,
            lookups: &self.lookups,
            match_mode: self.match_mode,
        };
        self.derived = self.strategy.derive(&self.rows, &self.state, &scope);

        if self.mode() == Mode::Local {
            let last = self.page_count().saturating_sub(1);
            if self.state.page_index > last {
                log::debug!("clamping page {} to {last}", self.state.page_index);
                self.state.page_index = last;
            }
        }
    }

    fn dispatch(&mut self, change: Change) {
        log::trace!("{:?} table change: {change:?}", self.mode());
        if self.strategy.apply(&mut self.state, change, &mut self.callbacks) {
            self.refresh();
        }
    }

    /// Rows matching the search (local) or supplied rows (delegated).
    pub fn matched_len(&self) -> usize {
        self.derived.len()
    }

    /// Number of pages; 0 when there is nothing to show or the count is unknown.
    pub fn page_count(&self) -> usize {
        match self.mode() {
            Mode::Local => self.derived.len().div_ceil(self.state.page_size),
            Mode::Delegated => self.total_page_count.unwrap_or(0),
        }
    }

    /// Current page, clamped to the known page count.
    pub fn page_index(&self) -> usize {
        let count = self.page_count();
        if count == 0 {
            0
        } else {
            self.state.page_index.min(count - 1)
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    /// Indices into [`rows`](Self::rows) shown on the current page.
    pub fn visible_indices(&self) -> &[usize] {
        self.strategy
            .page(&self.derived, self.page_index(), self.state.page_size)
    }

    /// Rows shown on the current page.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices()
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Requests page `page`, clamped to the last page. Requests for the current
    /// page are not forwarded.
    pub fn go_to_page(&mut self, page: usize) {
        let count = self.page_count();
        if count == 0 {
            log::debug!("no pages to navigate");
            return;
        }
        let target = page.min(count - 1);
        if target != self.page_index() {
            self.dispatch(Change::Page(target));
        }
    }

    /// Requests the next page.
    pub fn next_page(&mut self) {
        self.go_to_page(self.page_index() + 1);
    }

    /// Requests the previous page.
    pub fn prev_page(&mut self) {
        if let Some(page) = self.page_index().checked_sub(1) {
            self.go_to_page(page);
        }
    }

    /// Requests the first page.
    pub fn first_page(&mut self) {
        self.go_to_page(0);
    }

    /// Requests the last page.
    pub fn last_page(&mut self) {
        self.go_to_page(self.page_count().saturating_sub(1));
    }

    /// Requests a page size; values below 1 become 1.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.state.page_size {
            self.dispatch(Change::PageSize(size));
        }
    }

    /// Configures the page size of a local table without notifying anyone.
    pub(crate) fn configure_page_size(&mut self, size: usize) {
        if self.mode() == Mode::Local {
            self.state.page_size = size.max(1);
            self.refresh();
        }
    }

    /// Cycles the sort of `field`: none → ascending → descending → none.
    pub fn toggle_sort(&mut self, field: &str) -> Result<()> {
        if !self.column(field)?.is_sortable() {
            return Err(TableError::NotSortable(field.to_string()));
        }
        let next = SortState::next(self.state.sort.as_ref(), field);
        self.dispatch(Change::Sort(next));
        Ok(())
    }

    /// Requests a search. In local mode this filters and returns to the first page,
    /// even when the text is unchanged (no notification is sent then); in delegated
    /// mode the text is forwarded verbatim on every call.
    pub fn set_search_text(&mut self, text: &str) {
        if self.mode() == Mode::Local && text == self.state.search_text {
            self.state.page_index = 0;
            return;
        }
        self.dispatch(Change::Search(text.to_string()));
    }

    /// Shows or hides a column. Never affects pagination or sort.
    pub fn set_column_visibility(&mut self, id: &str, visible: bool) -> Result<()> {
        let column = self.column(id)?;
        if !visible && !column.is_hideable() {
            return Err(TableError::NotHideable(id.to_string()));
        }
        self.state
            .column_visibility
            .insert(id.to_string(), visible);
        Ok(())
    }

    /// Flips a column's visibility and returns the new value.
    pub fn toggle_column_visibility(&mut self, id: &str) -> Result<bool> {
        let visible = !self.state.is_visible(id);
        self.set_column_visibility(id, visible)?;
        Ok(visible)
    }

    /// Shows every column again.
    pub fn show_all_columns(&mut self) {
        self.state.column_visibility.clear();
    }

    /// Reports activation of the row at `index` in [`rows`](Self::rows).
    pub fn click_row(&mut self, index: usize) {
        if let (Some(row), Some(f)) = (self.rows.get(index), self.callbacks.on_row_click.as_mut()) {
            f(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::state::SortDirection;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Class {
        id: usize,
        name: String,
        seats: Option<f64>,
    }

    impl Record for Class {
        fn key(&self) -> String {
            self.id.to_string()
        }

        fn value(&self, column: &str) -> CellValue {
            match column {
                "name" => CellValue::Text(self.name.clone()),
                "seats" => self.seats.map(CellValue::Number).unwrap_or(CellValue::Empty),
                _ => CellValue::Empty,
            }
        }
    }

    fn classes(n: usize) -> Vec<Class> {
        (1..=n)
            .map(|id| Class {
                id,
                name: format!("Class {id}"),
                seats: Some((id % 7) as f64),
            })
            .collect()
    }

    fn columns() -> Vec<Column<Class>> {
        vec![
            Column::text("name", "Name").sortable().searchable(),
            Column::text("seats", "Seats").sortable(),
            Column::text("notes", "Notes").always_visible(),
        ]
    }

    fn ids(c: &Controller<Class>) -> Vec<usize> {
        c.visible_rows().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_local_pages_of_23() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(23));
        assert_eq!(c.page_count(), 3);
        assert_eq!(ids(&c), (1..=10).collect::<Vec<_>>());
        c.go_to_page(2);
        assert_eq!(ids(&c), vec![21, 22, 23]);
    }

    #[test]
    fn test_rows_per_page_invariant() {
        for total in [0, 1, 9, 10, 11, 23, 40] {
            for size in [1, 3, 10, 25] {
                let mut c = Controller::local(columns(), size);
                c.set_rows(classes(total));
                for page in 0..c.page_count().max(1) {
                    c.go_to_page(page);
                    let expected = size.min(total.saturating_sub(c.page_index() * size));
                    assert_eq!(c.visible_rows().len(), expected, "total {total} size {size}");
                }
            }
        }
    }

    #[test]
    fn test_navigation_bounds() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(23));
        c.prev_page();
        assert_eq!(c.page_index(), 0);
        c.last_page();
        assert_eq!(c.page_index(), 2);
        c.next_page();
        assert_eq!(c.page_index(), 2);
        c.go_to_page(99);
        assert_eq!(c.page_index(), 2);
        c.first_page();
        assert_eq!(c.page_index(), 0);
    }

    #[test]
    fn test_shrinking_rows_clamps_page() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(23));
        c.go_to_page(2);
        c.set_rows(classes(12));
        assert_eq!(c.state().page_index, 1);
        assert_eq!(ids(&c), vec![11, 12]);
        c.set_rows(Vec::new());
        assert_eq!(c.page_count(), 0);
        assert_eq!(c.state().page_index, 0);
        assert!(c.visible_rows().is_empty());
    }

    #[test]
    fn test_sort_cycle_through_controller() {
        let mut c = Controller::local(columns(), 50);
        c.set_rows(classes(10));
        c.toggle_sort("seats").unwrap();
        assert_eq!(c.state().sort_direction("seats"), Some(SortDirection::Ascending));
        let first = c.visible_rows()[0].seats;
        assert_eq!(first, Some(0.0));

        c.toggle_sort("seats").unwrap();
        assert_eq!(c.visible_rows()[0].seats, Some(6.0));

        c.toggle_sort("name").unwrap();
        assert_eq!(c.state().sort_direction("seats"), None);
        assert_eq!(c.state().sort_direction("name"), Some(SortDirection::Ascending));

        c.toggle_sort("name").unwrap();
        c.toggle_sort("name").unwrap();
        assert_eq!(c.state().sort, None);
        assert_eq!(ids(&c), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_keeps_empty_values_last() {
        let mut rows = classes(4);
        rows[1].seats = None;
        let mut c = Controller::local(columns(), 10);
        c.set_rows(rows);
        c.toggle_sort("seats").unwrap();
        assert_eq!(c.visible_rows().last().map(|r| r.id), Some(2));
        c.toggle_sort("seats").unwrap();
        assert_eq!(c.visible_rows().last().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_sort_errors() {
        let mut c = Controller::local(columns(), 10);
        assert_eq!(
            c.toggle_sort("missing"),
            Err(TableError::UnknownColumn("missing".into()))
        );
        assert_eq!(
            c.toggle_sort("notes"),
            Err(TableError::NotSortable("notes".into()))
        );
    }

    #[test]
    fn test_search_resets_page_and_is_idempotent() {
        let mut c = Controller::local(columns(), 5);
        c.set_rows(classes(23));
        c.go_to_page(3);
        c.set_search_text("CLASS 1");
        assert_eq!(c.page_index(), 0);
        let first: Vec<usize> = c.visible_indices().to_vec();
        assert_eq!(c.matched_len(), 11); // 1, 10..=19
        c.set_search_text("class 1");
        c.set_search_text("CLASS 1");
        assert_eq!(c.visible_indices(), first.as_slice());

        c.set_search_text("");
        assert_eq!(c.matched_len(), 23);
    }

    #[test]
    fn test_repeated_search_returns_to_first_page_quietly() {
        let searches = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&searches);
        let mut c = Controller::local(columns(), 5);
        c.set_callbacks(
            Callbacks::new().on_search_change(move |t| sink.lock().unwrap().push(t.to_string())),
        );
        c.set_rows(classes(23));
        c.go_to_page(2);

        c.set_search_text("");
        assert_eq!(c.page_index(), 0);
        assert_eq!(c.matched_len(), 23);
        assert!(searches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_search_without_matches() {
        let mut c = Controller::local(columns(), 5);
        c.set_rows(classes(8));
        c.go_to_page(1);
        c.set_search_text("zzz");
        assert_eq!(c.page_count(), 0);
        assert_eq!(c.state().page_index, 0);
        assert!(c.visible_rows().is_empty());
    }

    #[test]
    fn test_fuzzy_search() {
        let mut c = Controller::local(columns(), 50);
        c.set_rows(classes(12));
        c.set_match_mode(MatchMode::Fuzzy);
        c.set_search_text("cls12");
        assert_eq!(ids(&c), vec![12]);
    }

    #[test]
    fn test_page_size_keeps_top_row() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(40));
        c.go_to_page(2); // rows 21..=30
        c.set_page_size(4);
        assert_eq!(c.page_index(), 5);
        assert_eq!(ids(&c)[0], 21);
        c.set_page_size(0);
        assert_eq!(c.page_size(), 1);
    }

    #[test]
    fn test_visibility_leaves_paging_and_sort_alone() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(23));
        c.go_to_page(1);
        c.toggle_sort("name").unwrap();
        c.go_to_page(1);
        let before = (c.page_index(), c.state().sort.clone());

        assert_eq!(c.toggle_column_visibility("seats"), Ok(false));
        assert_eq!(c.visible_columns().len(), 2);
        assert_eq!((c.page_index(), c.state().sort.clone()), before);
        assert_eq!(
            c.set_column_visibility("notes", false),
            Err(TableError::NotHideable("notes".into()))
        );
        c.show_all_columns();
        assert_eq!(c.visible_columns().len(), 3);
    }

    #[test]
    fn test_local_notifies_once_per_action() {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let sink = pages.clone();
        let mut c = Controller::local(columns(), 10);
        c.set_callbacks(Callbacks::new().on_page_change(move |p| sink.lock().unwrap().push(p)));
        c.set_rows(classes(23));
        c.next_page();
        c.next_page();
        c.next_page(); // already on the last page
        assert_eq!(*pages.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_delegated_forwards_without_touching_state() {
        let log = Arc::new(Mutex::new(Vec::<String>::new()));
        let (a, b, d, e) = (log.clone(), log.clone(), log.clone(), log.clone());
        let mut c = Controller::delegated(
            columns(),
            DelegatedState {
                total_page_count: Some(5),
                ..DelegatedState::default()
            },
        );
        c.set_callbacks(
            Callbacks::new()
                .on_page_change(move |p| a.lock().unwrap().push(format!("page {p}")))
                .on_page_size_change(move |s| b.lock().unwrap().push(format!("size {s}")))
                .on_sorting_change(move |s| d.lock().unwrap().push(format!("sort {s:?}")))
                .on_search_change(move |t| e.lock().unwrap().push(format!("search {t}"))),
        );
        c.set_rows(classes(10));

        c.next_page();
        c.set_page_size(25);
        c.toggle_sort("name").unwrap();
        c.set_search_text("ab");
        c.set_search_text("ab");

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "page 1".to_string(),
                "size 25".to_string(),
                format!("sort {:?}", Some(SortState::ascending("name"))),
                "search ab".to_string(),
                "search ab".to_string(),
            ]
        );
        assert_eq!(c.state().page_index, 0);
        assert_eq!(c.state().page_size, 10);
        assert_eq!(c.state().sort, None);
        assert_eq!(ids(&c), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_delegated_sync_and_clamp() {
        let mut c = Controller::delegated(columns(), DelegatedState::default());
        c.set_rows(classes(3));
        // Unknown total: nothing to navigate, rows still shown as supplied.
        assert_eq!(c.page_count(), 0);
        assert_eq!(ids(&c), vec![1, 2, 3]);

        c.sync(DelegatedState {
            page_index: 7,
            page_size: 3,
            sort: Some(SortState::descending("name")),
            search_text: "x".into(),
            total_page_count: Some(4),
        });
        assert_eq!(c.page_index(), 3);
        assert_eq!(c.state().page_index, 7);
        assert_eq!(c.state().search_text, "x");
        // Rows are never re-sorted or filtered locally.
        assert_eq!(ids(&c), vec![1, 2, 3]);
    }

    #[test]
    fn test_delegated_without_callbacks_drops_intent() {
        let mut c = Controller::delegated(
            columns(),
            DelegatedState {
                total_page_count: Some(3),
                ..DelegatedState::default()
            },
        );
        c.next_page();
        assert_eq!(c.page_index(), 0);
    }

    #[test]
    fn test_local_ignores_sync() {
        let mut c = Controller::local(columns(), 10);
        c.set_rows(classes(23));
        c.sync(DelegatedState {
            page_index: 2,
            ..DelegatedState::default()
        });
        assert_eq!(c.page_index(), 0);
    }

    #[test]
    fn test_click_row() {
        let clicked = Arc::new(Mutex::new(None));
        let sink = clicked.clone();
        let mut c = Controller::local(columns(), 10);
        c.set_callbacks(Callbacks::new().on_row_click(move |r: &Class| {
            *sink.lock().unwrap() = Some(r.id);
        }));
        c.set_rows(classes(3));
        c.click_row(1);
        c.click_row(9);
        assert_eq!(*clicked.lock().unwrap(), Some(2));
    }
}
