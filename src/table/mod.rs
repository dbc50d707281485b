//! Data table component with local or delegated paging, sorting and search.
//!
//! This module exposes a generic `Model<R: Record>` plus its building blocks:
//! - [`Record`]: implement for your row type; hands out a [`CellValue`] per column
//! - [`Column`]: describes how one column is titled, sized, sorted and drawn
//! - [`Controller`]: the state controller the model renders from
//! - Submodules: `keys` and `style`
//!
//! ## Two ways to source data
//!
//! A table is built in one of two modes, and the rendering and key handling are the
//! same in both:
//!
//! - [`Model::local`] owns the complete row set and pages, sorts and searches it in
//!   memory. Callbacks are notifications only.
//! - [`Model::delegated`] shows exactly the rows it is given, which the caller
//!   already fetched for the requested page, sort and search. Every change the user
//!   asks for is forwarded to a callback, and nothing changes until the caller
//!   fetches again and calls [`Model::sync`].
//!
//! ```rust
//! use bubbletea_datatable::table::{Callbacks, CellValue, Column, Model, PageSize, Record};
//!
//! #[derive(Clone)]
//! struct Topic {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl Record for Topic {
//!     fn key(&self) -> String {
//!         self.id.to_string()
//!     }
//!     fn value(&self, column: &str) -> CellValue {
//!         match column {
//!             "name" => CellValue::Text(self.name.clone()),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let mut table = Model::local(vec![Column::text("name", "Name").sortable().searchable()])
//!     .with_page_size(PageSize::Fixed(10))
//!     .with_callbacks(Callbacks::new().on_row_click(|topic: &Topic| {
//!         let _ = &topic.name;
//!     }));
//! table.set_rows(
//!     (1..=23)
//!         .map(|id| Topic { id, name: format!("Topic {id}") })
//!         .collect(),
//! );
//! assert_eq!(table.controller().page_count(), 3);
//! ```
//!
//! ## Page size
//!
//! With [`PageSize::Auto`] the page size follows the height the host gives the
//! table: `WindowSizeMsg`s are coalesced into one [`FitFrameMsg`](crate::fitter::FitFrameMsg)
//! per frame and turned into a row count by the [`RowFitter`]. A fixed page size
//! turns the fitter off.

pub mod column;
pub mod controller;
pub mod keys;
pub mod state;
pub mod style;
mod view;

pub use column::{
    CellKind, CellValue, Column, ColumnWidth, Lookups, Record, RenderFn, DEFAULT_DATE_FORMAT,
};
pub use controller::{
    Callbacks, Change, Controller, DelegatedStrategy, LocalStrategy, MatchMode, SearchScope,
    Strategy,
};
pub use keys::TableKeyMap;
pub use state::{
    DelegatedState, Mode, PageSize, SortDirection, SortState, TableState, DEFAULT_PAGE_SIZE,
};
pub use style::{Glyphs, Styles};
pub use view::{resolve_widths, truncate};

use crate::badges::OverflowBadges;
use crate::error::{Result, TableError};
use crate::fitter::{FitFrameMsg, FrameScheduler, RowFitter};
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::paginator;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Lines the table draws around its body by default: the search/status line,
/// the detail line, the pagination strip and the help line.
pub const DEFAULT_CHROME_HEIGHT: usize = 4;

/// The table component.
pub struct Model<R: Record> {
    controller: Controller<R>,
    page_size: PageSize,
    fitter: RowFitter,
    frames: FrameScheduler,
    chrome_height: usize,
    width: usize,
    height: usize,
    cursor: usize,
    focus: usize,
    column_widths: HashMap<String, usize>,
    selection: HashSet<String>,
    searching: bool,
    search_input: String,
    search_before: String,
    striped: bool,
    show_help: bool,
    focused: bool,
    /// Key bindings.
    pub keymap: TableKeyMap,
    /// Styles of every element.
    pub styles: Styles,
    /// Symbols drawn by the table.
    pub glyphs: Glyphs,
    /// Renderer of relation cells.
    pub badges: OverflowBadges,
    /// The pagination strip; its page fields are filled in at render time.
    pub pagination: paginator::Model,
}

impl<R: Record> Model<R> {
    fn with_controller(controller: Controller<R>, page_size: PageSize) -> Self {
        let search_input = controller.state().search_text.clone();
        Self {
            controller,
            page_size,
            fitter: RowFitter::default(),
            frames: FrameScheduler::new(),
            chrome_height: DEFAULT_CHROME_HEIGHT,
            width: 0,
            height: 0,
            cursor: 0,
            focus: 0,
            column_widths: HashMap::new(),
            selection: HashSet::new(),
            searching: false,
            search_input,
            search_before: String::new(),
            striped: true,
            show_help: true,
            focused: true,
            keymap: TableKeyMap::default(),
            styles: Styles::default(),
            glyphs: Glyphs::default(),
            badges: OverflowBadges::default(),
            pagination: paginator::Model::default(),
        }
    }

    /// A table that owns its rows and pages, sorts and searches them itself.
    ///
    /// The page size follows the available height until
    /// [`with_page_size`](Self::with_page_size) fixes it.
    pub fn local(columns: Vec<Column<R>>) -> Self {
        Self::with_controller(
            Controller::local(columns, DEFAULT_PAGE_SIZE),
            PageSize::Auto,
        )
    }

    /// A table whose paging, sorting and search belong to the caller.
    ///
    /// The page size is the one in `inputs` and the fitter stays off unless
    /// [`PageSize::Auto`] is chosen, in which case fitted sizes are forwarded to
    /// `on_page_size_change`.
    pub fn delegated(columns: Vec<Column<R>>, inputs: DelegatedState) -> Self {
        let size = inputs.page_size;
        Self::with_controller(
            Controller::delegated(columns, inputs),
            PageSize::Fixed(size),
        )
    }

    /// Chooses a fixed or fitted page size (builder pattern).
    ///
    /// A fixed size of a local table becomes its page size; a delegated table always
    /// shows the page size it was last synced with.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        if let PageSize::Fixed(size) = page_size {
            self.controller.configure_page_size(size);
        }
        self.page_size = page_size;
        self
    }

    /// Sets the fitter's row-count floor (builder pattern).
    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.fitter = self.fitter.with_min_rows(min_rows);
        self
    }

    /// Sets the height of one body row in lines (builder pattern).
    pub fn with_row_height(mut self, height: usize) -> Self {
        self.fitter = self.fitter.with_row_height(height);
        self
    }

    /// Sets the height of the header in lines (builder pattern).
    pub fn with_header_height(mut self, height: usize) -> Self {
        self.fitter = self.fitter.with_header_height(height);
        self
    }

    /// Sets how many lines around the body the fitter leaves alone (builder pattern).
    pub fn with_chrome_height(mut self, height: usize) -> Self {
        self.chrome_height = height;
        self
    }

    /// Sets how many page numbers the pagination strip shows (builder pattern).
    pub fn with_page_window(mut self, window: usize) -> Self {
        self.pagination = self.pagination.with_window(window);
        self
    }

    /// Chooses substring or fuzzy search (builder pattern).
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.controller.set_match_mode(mode);
        self
    }

    /// Turns odd/even striping on or off (builder pattern).
    pub fn with_striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }

    /// Shows or hides the help line (builder pattern).
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Supplies relation labels and the date format (builder pattern).
    pub fn with_lookups(mut self, lookups: Lookups) -> Self {
        self.controller.set_lookups(lookups);
        self
    }

    /// Installs the outbound callbacks (builder pattern).
    pub fn with_callbacks(mut self, callbacks: Callbacks<R>) -> Self {
        self.controller.set_callbacks(callbacks);
        self
    }

    /// Sets the rendering width in columns (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the glyph set (builder pattern).
    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// The state controller.
    pub fn controller(&self) -> &Controller<R> {
        &self.controller
    }

    /// Mutable access to the state controller, for programmatic navigation.
    pub fn controller_mut(&mut self) -> &mut Controller<R> {
        &mut self.controller
    }

    /// Current table state.
    pub fn state(&self) -> &TableState {
        self.controller.state()
    }

    /// How the page size is chosen.
    pub fn page_size_mode(&self) -> PageSize {
        self.page_size
    }

    /// Replaces the row set. Selection is kept.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.controller.set_rows(rows);
        self.clamp_cursor();
    }

    /// Takes the state a delegated caller fetched rows with.
    pub fn sync(&mut self, inputs: DelegatedState) {
        if !self.searching {
            self.search_input = inputs.search_text.clone();
        }
        self.controller.sync(inputs);
        self.clamp_cursor();
    }

    /// Replaces rows and delegated state after a remote fetch.
    pub fn sync_rows(&mut self, rows: Vec<R>, inputs: DelegatedState) {
        self.controller.set_rows(rows);
        self.sync(inputs);
    }

    /// Replaces relation labels and the date format.
    pub fn set_lookups(&mut self, lookups: Lookups) {
        self.controller.set_lookups(lookups);
    }

    /// Installs the outbound callbacks.
    pub fn set_callbacks(&mut self, callbacks: Callbacks<R>) {
        self.controller.set_callbacks(callbacks);
    }

    /// Sets the rendering size. The height only matters with [`PageSize::Auto`].
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Rendering width in columns; 0 until known.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cursor position within the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The row under the cursor.
    pub fn cursor_row(&self) -> Option<&R> {
        let index = *self.controller.visible_indices().get(self.cursor)?;
        self.controller.rows().get(index)
    }

    /// Index into the visible columns of the focused column.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// The focused column, if any column is visible.
    pub fn focused_column(&self) -> Option<&Column<R>> {
        self.controller.visible_columns().get(self.focus).copied()
    }

    /// Whether a search is being typed.
    pub fn searching(&self) -> bool {
        self.searching
    }

    /// The search text shown in the search line.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    fn clamp_cursor(&mut self) {
        let rows = self.controller.visible_indices().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        let columns = self.controller.visible_columns().len();
        self.focus = self.focus.min(columns.saturating_sub(1));
    }

    // Selection

    /// Keys of the selected rows.
    pub fn selected_keys(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Whether the row with `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Selects or deselects the row with `key`.
    pub fn set_selected(&mut self, key: &str, selected: bool) {
        if selected {
            self.selection.insert(key.to_string());
        } else {
            self.selection.remove(key);
        }
    }

    /// Flips the selection of the row with `key` and returns the new value.
    pub fn toggle_selected(&mut self, key: &str) -> bool {
        let selected = !self.is_selected(key);
        self.set_selected(key, selected);
        selected
    }

    /// Rows of the current row set that are selected.
    pub fn selected_rows(&self) -> Vec<&R> {
        self.controller
            .rows()
            .iter()
            .filter(|row| self.selection.contains(&row.key()))
            .collect()
    }

    /// Forgets the selection. Nothing else clears it.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Column widths

    /// Width remembered for a resized column.
    pub fn column_width(&self, id: &str) -> Option<usize> {
        self.column_widths.get(id).copied()
    }

    /// Sets the width of a resizable column for the lifetime of this table.
    pub fn resize_column(&mut self, id: &str, width: usize) -> Result<()> {
        let column = self.controller.column(id)?;
        if !column.is_resizable() {
            return Err(TableError::NotResizable(id.to_string()));
        }
        self.column_widths.insert(id.to_string(), width.max(1));
        Ok(())
    }

    /// Forgets every resized width.
    pub fn reset_column_widths(&mut self) {
        self.column_widths.clear();
    }

    // Messages

    /// Handles key presses, window sizes and fitter frames.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.set_size(size.width as usize, size.height as usize);
            return self.schedule_fit();
        }
        if let Some(frame) = msg.downcast_ref::<FitFrameMsg>() {
            self.apply_fit(frame);
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused {
                return None;
            }
            if self.searching {
                self.handle_search_key(key_msg);
            } else {
                self.handle_key(key_msg);
            }
        }
        None
    }

    fn schedule_fit(&mut self) -> Option<Cmd> {
        if self.page_size != PageSize::Auto {
            return None;
        }
        let body = self.height.saturating_sub(self.chrome_height);
        if body == 0 {
            log::trace!("table has no height yet, not fitting");
            return None;
        }
        Some(self.frames.schedule(body))
    }

    fn apply_fit(&mut self, frame: &FitFrameMsg) {
        if self.page_size != PageSize::Auto {
            return;
        }
        let Some(height) = self.frames.take(frame) else {
            return;
        };
        if let Some(rows) = self.fitter.observe(height, self.controller.page_size()) {
            self.controller.set_page_size(rows);
            self.clamp_cursor();
        }
    }

    fn handle_key(&mut self, msg: &KeyMsg) {
        let keys = &self.keymap;
        if keys.row_up.matches(msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if keys.row_down.matches(msg) {
            let rows = self.controller.visible_indices().len();
            if self.cursor + 1 < rows {
                self.cursor += 1;
            }
        } else if keys.next_page.matches(msg) {
            self.controller.next_page();
            self.cursor = 0;
        } else if keys.prev_page.matches(msg) {
            self.controller.prev_page();
            self.cursor = 0;
        } else if keys.first_page.matches(msg) {
            self.controller.first_page();
            self.cursor = 0;
        } else if keys.last_page.matches(msg) {
            self.controller.last_page();
            self.cursor = 0;
        } else if keys.next_column.matches(msg) {
            let columns = self.controller.visible_columns().len();
            if columns > 0 {
                self.focus = (self.focus + 1) % columns;
            }
        } else if keys.prev_column.matches(msg) {
            let columns = self.controller.visible_columns().len();
            if columns > 0 {
                self.focus = (self.focus + columns - 1) % columns;
            }
        } else if keys.sort.matches(msg) {
            self.sort_focused();
        } else if keys.shrink_column.matches(msg) {
            self.resize_focused(-1);
        } else if keys.grow_column.matches(msg) {
            self.resize_focused(1);
        } else if keys.hide_column.matches(msg) {
            self.hide_focused();
        } else if keys.show_columns.matches(msg) {
            self.controller.show_all_columns();
        } else if keys.select.matches(msg) {
            if let Some(key) = self.cursor_row().map(|row| row.key()) {
                self.toggle_selected(&key);
            }
        } else if keys.activate.matches(msg) {
            if let Some(&index) = self.controller.visible_indices().get(self.cursor) {
                self.controller.click_row(index);
            }
        } else if keys.search.matches(msg) {
            self.searching = true;
            self.search_before = self.search_input.clone();
        } else if keys.cancel_search.matches(msg) && !self.search_input.is_empty() {
            self.search_input.clear();
            self.controller.set_search_text("");
            self.cursor = 0;
        }
    }

    fn handle_search_key(&mut self, msg: &KeyMsg) {
        if self.keymap.accept_search.matches(msg) {
            self.searching = false;
            return;
        }
        if self.keymap.cancel_search.matches(msg) {
            self.searching = false;
            if self.search_input != self.search_before {
                self.search_input = std::mem::take(&mut self.search_before);
                self.search();
            }
            return;
        }
        match msg.key {
            KeyCode::Char(c)
                if !msg
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search_input.push(c);
                self.search();
            }
            KeyCode::Backspace => {
                let cut = self
                    .search_input
                    .grapheme_indices(true)
                    .next_back()
                    .map(|(i, _)| i);
                if let Some(i) = cut {
                    self.search_input.truncate(i);
                    self.search();
                }
            }
            _ => {}
        }
    }

    fn search(&mut self) {
        self.controller.set_search_text(&self.search_input);
        self.cursor = 0;
        self.clamp_cursor();
    }

    fn sort_focused(&mut self) {
        let Some(id) = self
            .focused_column()
            .filter(|c| c.is_sortable())
            .map(|c| c.id().to_string())
        else {
            return;
        };
        if self.controller.toggle_sort(&id).is_ok() {
            self.cursor = 0;
        }
    }

    fn resize_focused(&mut self, delta: isize) {
        let Some(column) = self.focused_column().filter(|c| c.is_resizable()) else {
            return;
        };
        let id = column.id().to_string();
        let current = self
            .column_width(&id)
            .unwrap_or_else(|| self.resolved_width(&id));
        let width = current.saturating_add_signed(delta).max(1);
        if self.resize_column(&id, width).is_err() {
            log::debug!("could not resize column {id}");
        }
    }

    fn hide_focused(&mut self) {
        if self.controller.visible_columns().len() <= 1 {
            return;
        }
        let Some(id) = self
            .focused_column()
            .filter(|c| c.is_hideable())
            .map(|c| c.id().to_string())
        else {
            return;
        };
        if self.controller.set_column_visibility(&id, false).is_ok() {
            self.clamp_cursor();
        }
    }

    fn resolved_width(&self, id: &str) -> usize {
        self.layout()
            .into_iter()
            .find(|(column, _)| column.id() == id)
            .map(|(_, width)| width)
            .unwrap_or(1)
    }

    fn help_view(&self) -> String {
        let bindings = if self.searching {
            vec![&self.keymap.accept_search, &self.keymap.cancel_search]
        } else {
            self.keymap.short_help()
        };
        let text = bindings
            .into_iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect::<Vec<_>>()
            .join(" • ");
        self.styles.help.render(&text)
    }
}

impl<R: Record> Component for Model<R> {
    /// Lets the table react to keys again.
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Stops key handling; a search being typed is accepted as it is.
    fn blur(&mut self) {
        self.focused = false;
        self.searching = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

impl<R: Record> key::KeyMap for Model<R> {
    fn short_help(&self) -> Vec<&key::Binding> {
        self.keymap.short_help()
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}
