//! Errors returned by programmatic table operations.
//!
//! Keyboard handling never produces these: it can only target columns the table
//! knows about. They surface when a caller names a column by id.

use thiserror::Error;

/// Errors raised when a caller asks the table for something it cannot do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No column with this id was configured.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),
    /// The column exists but was not declared sortable.
    #[error("column `{0}` is not sortable")]
    NotSortable(String),
    /// The column exists but was not declared hideable.
    #[error("column `{0}` cannot be hidden")]
    NotHideable(String),
    /// The column has a fixed width.
    #[error("column `{0}` is not resizable")]
    NotResizable(String),
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
