//! Table state: pagination, sort, search and column visibility.

use std::collections::HashMap;

/// Page size used when the caller gives none.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the table's state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The table owns and derives pagination, sort and search from the full row set.
    Local,
    /// The caller owns that state; the table forwards every change request.
    Delegated,
}

/// Sort direction of the sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// The sorted column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column id.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Ascending sort on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// The sort after clicking `field`'s header.
    ///
    /// Each field cycles none → ascending → descending → none. Clicking a field
    /// other than the sorted one drops the old sort and starts at ascending.
    ///
    /// ```rust
    /// use bubbletea_datatable::table::SortState;
    ///
    /// let asc = SortState::next(None, "title");
    /// assert_eq!(asc, Some(SortState::ascending("title")));
    /// let desc = SortState::next(asc.as_ref(), "title");
    /// assert_eq!(desc, Some(SortState::descending("title")));
    /// assert_eq!(SortState::next(desc.as_ref(), "title"), None);
    /// ```
    pub fn next(current: Option<&SortState>, field: &str) -> Option<SortState> {
        match current {
            Some(sort) if sort.field == field => match sort.direction {
                SortDirection::Ascending => Some(Self::descending(field)),
                SortDirection::Descending => None,
            },
            _ => Some(Self::ascending(field)),
        }
    }
}

/// How the page size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// The caller fixed the page size; the fitter stays off.
    Fixed(usize),
    /// The page size follows the available height.
    Auto,
}

/// The single source of truth for what the table shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Zero-based current page.
    pub page_index: usize,
    /// Rows per page, at least 1.
    pub page_size: usize,
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// Current search text.
    pub search_text: String,
    /// Explicit visibility per column id; missing ids are visible.
    pub column_visibility: HashMap<String, bool>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search_text: String::new(),
            column_visibility: HashMap::new(),
        }
    }
}

impl TableState {
    /// Whether the column with `id` is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.column_visibility.get(id).copied().unwrap_or(true)
    }

    /// Direction of the sort on `field`, if that field is sorted.
    pub fn sort_direction(&self, field: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|s| s.field == field)
            .map(|s| s.direction)
    }
}

/// State a delegated-mode caller hands to the table after each remote fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedState {
    /// Page the supplied rows belong to.
    pub page_index: usize,
    /// Page size the rows were fetched with.
    pub page_size: usize,
    /// Sort the rows were fetched with.
    pub sort: Option<SortState>,
    /// Search the rows were fetched with.
    pub search_text: String,
    /// Total number of pages on the server; `None` while unknown.
    pub total_page_count: Option<usize>,
}

impl Default for DelegatedState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search_text: String::new(),
            total_page_count: None,
        }
    }
}
