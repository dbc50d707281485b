//! Key bindings for table navigation, sorting, search and column control.
//!
//! ## Rows and pages
//!
//! - **Cursor**: `↑/k`, `↓/j`
//! - **Pages**: `→/l/pgdn` (next), `←/h/pgup` (previous), `g/home`, `G/end`
//!
//! ## Columns
//!
//! - **Focus**: `tab`, `shift+tab`
//! - **Sort** the focused column: `s`
//! - **Resize** the focused column: `<`, `>`
//! - **Hide** the focused column: `x`; show all again: `X`
//!
//! ## Rows
//!
//! - **Select**: `space`; **activate**: `enter`
//!
//! ## Search
//!
//! - `/` starts, `enter` accepts, `esc` cancels (or clears an accepted search)

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings of the table model.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Move the cursor up one row.
    pub row_up: key::Binding,
    /// Move the cursor down one row.
    pub row_down: key::Binding,
    /// Go to the next page.
    pub next_page: key::Binding,
    /// Go to the previous page.
    pub prev_page: key::Binding,
    /// Go to the first page.
    pub first_page: key::Binding,
    /// Go to the last page.
    pub last_page: key::Binding,
    /// Focus the next visible column.
    pub next_column: key::Binding,
    /// Focus the previous visible column.
    pub prev_column: key::Binding,
    /// Cycle the sort of the focused column.
    pub sort: key::Binding,
    /// Narrow the focused column.
    pub shrink_column: key::Binding,
    /// Widen the focused column.
    pub grow_column: key::Binding,
    /// Hide the focused column.
    pub hide_column: key::Binding,
    /// Show every column.
    pub show_columns: key::Binding,
    /// Toggle selection of the cursor row.
    pub select: key::Binding,
    /// Activate the cursor row.
    pub activate: key::Binding,
    /// Start typing a search.
    pub search: key::Binding,
    /// Accept the search being typed.
    pub accept_search: key::Binding,
    /// Cancel the search being typed, or clear the accepted one.
    pub cancel_search: key::Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            row_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            row_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown])
                .with_help("→/l", "next page"),
            prev_page: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp])
                .with_help("←/h", "prev page"),
            first_page: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "first page"),
            last_page: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "last page"),
            next_column: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next column"),
            prev_column: key::new_binding(vec![
                key::with_keys_str(&["shift+tab"]),
                key::with_help("shift+tab", "prev column"),
            ]),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            shrink_column: key::Binding::new(vec![KeyCode::Char('<')]).with_help("<", "narrower"),
            grow_column: key::Binding::new(vec![KeyCode::Char('>')]).with_help(">", "wider"),
            hide_column: key::Binding::new(vec![KeyCode::Char('x')]).with_help("x", "hide column"),
            show_columns: key::Binding::new(vec![KeyCode::Char('X')]).with_help("X", "show all"),
            select: key::Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "select"),
            activate: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "open"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            accept_search: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            cancel_search: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}

impl key::KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.row_up,
            &self.row_down,
            &self.prev_page,
            &self.next_page,
            &self.sort,
            &self.search,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.row_up,
                &self.row_down,
                &self.next_page,
                &self.prev_page,
                &self.first_page,
                &self.last_page,
            ],
            vec![
                &self.next_column,
                &self.prev_column,
                &self.sort,
                &self.shrink_column,
                &self.grow_column,
                &self.hide_column,
                &self.show_columns,
            ],
            vec![
                &self.select,
                &self.activate,
                &self.search,
                &self.accept_search,
                &self.cancel_search,
            ],
        ]
    }
}
