#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datatable/")]

//! # bubbletea-datatable
//!
//! A reusable data table component for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs). One table type backs every
//! management screen of an application, whether its rows live in memory or on a
//! server.
//!
//! ## Overview
//!
//! The table follows the Elm Architecture like the rest of the bubbletea-rs
//! ecosystem: feed it messages with `update()` and draw it with `view()`.
//!
//! - **Two data-sourcing modes** behind one API: a *local* table pages, sorts and
//!   searches its complete row set itself, a *delegated* table forwards every change
//!   to callbacks and shows the page the caller fetched
//! - **Auto-fitted page size** that follows the available height, with resize bursts
//!   coalesced into one recomputation per frame
//! - **Overflow badges** for relation cells: as many labels as fit, a `+N` for the
//!   rest and the full list on demand
//! - **Column control**: sort cycling, hiding and per-instance resizing
//! - **Row selection** that survives paging, sorting and searching
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`table`] | The table model, its columns, state controller, keys and styles |
//! | [`fitter`] | Height to row-count fitting and frame coalescing |
//! | [`badges`] | Overflow badge layout and rendering |
//! | [`paginator`] | The pagination strip |
//! | [`key`] | Type-safe key bindings |
//! | [`error`] | Errors of programmatic table operations |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! #[derive(Clone)]
//! struct Course {
//!     id: u32,
//!     title: String,
//! }
//!
//! impl Record for Course {
//!     fn key(&self) -> String {
//!         self.id.to_string()
//!     }
//!     fn value(&self, column: &str) -> CellValue {
//!         match column {
//!             "title" => CellValue::Text(self.title.clone()),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! struct App {
//!     courses: Table<Course>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut courses = Table::local(vec![
//!             Column::text("title", "Title").sortable().searchable(),
//!         ]);
//!         courses.set_rows(vec![Course { id: 1, title: "Rust 101".into() }]);
//!         (Self { courses }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.courses.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.courses.view()
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: dropped
//! delegated intents, clamped pages and page-size changes at `debug`, per-frame
//! measurements at `trace`. It never installs a logger.

pub mod badges;
pub mod error;
pub mod fitter;
pub mod key;
pub mod paginator;
pub mod table;

use bubbletea_rs::Cmd;

/// Components that take part in keyboard focus management.
///
/// A page that shows a table next to other widgets moves focus between them; a
/// blurred table ignores key presses but keeps reacting to window sizes and
/// fitter frames.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
///
/// # #[derive(Clone)] struct Row;
/// # impl Record for Row {
/// #     fn key(&self) -> String { String::new() }
/// #     fn value(&self, _: &str) -> CellValue { CellValue::Empty }
/// # }
/// let mut table: Table<Row> = Table::local(vec![Column::text("name", "Name")]);
/// assert!(table.focused());
/// table.blur();
/// assert!(!table.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use badges::{BadgeItem, BadgeLayout, OverflowBadges};
pub use error::{Result, TableError};
pub use fitter::{FitFrameMsg, FrameScheduler, RowFitter};
pub use key::{matches, new_binding, with_disabled, with_help, with_keys, Binding, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use table::Model as Table;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::badges::{BadgeItem, OverflowBadges};
    pub use crate::error::TableError;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::table::{
        Callbacks, CellKind, CellValue, Column, DelegatedState, Lookups, MatchMode, Mode,
        PageSize, Record, SortDirection, SortState,
    };
    pub use crate::Component;
    pub use crate::Table;
}
