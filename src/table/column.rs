//! Column descriptors, cell values and the read-only lookups cells render with.
//!
//! A table is generic over its row type. Rows implement [`Record`], which hands out
//! a [`CellValue`] per column id; a [`Column`] decides how that value is shown.
//!
//! ```rust
//! use bubbletea_datatable::table::{CellValue, Column, Record};
//!
//! struct Course {
//!     id: u32,
//!     title: String,
//!     topics: Vec<String>,
//! }
//!
//! impl Record for Course {
//!     fn key(&self) -> String {
//!         self.id.to_string()
//!     }
//!
//!     fn value(&self, column: &str) -> CellValue {
//!         match column {
//!             "title" => CellValue::Text(self.title.clone()),
//!             "topics" => CellValue::Relations(self.topics.clone()),
//!             _ => CellValue::Empty,
//!         }
//!     }
//! }
//!
//! let columns: Vec<Column<Course>> = vec![
//!     Column::text("title", "Title").sortable().searchable(),
//!     Column::relations("topics", "Topics", "topic").with_width(24),
//! ];
//! assert_eq!(columns[1].relation_name(), Some("topic"));
//! ```

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Date format used when the caller has no preference.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row entity the table can display.
pub trait Record: Send + 'static {
    /// Stable identity of the row; selection is tracked by this key.
    fn key(&self) -> String;

    /// The value of the column with the given id.
    fn value(&self, column: &str) -> CellValue;
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value.
    Empty,
    /// Free text.
    Text(String),
    /// A number.
    Number(f64),
    /// A calendar date.
    Date(NaiveDate),
    /// A flag, shown as a toggle.
    Bool(bool),
    /// Key of one related entity.
    Relation(String),
    /// Keys of several related entities.
    Relations(Vec<String>),
}

impl CellValue {
    /// Whether the value is [`CellValue::Empty`] or an empty relation list.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Relations(keys) => keys.is_empty(),
            _ => false,
        }
    }

    /// Plain text of the value, used for searching and relation-less display.
    pub fn display_text(&self, relation: Option<&str>, lookups: &Lookups) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(d) => lookups.format_date(d),
            CellValue::Bool(true) => "yes".to_string(),
            CellValue::Bool(false) => "no".to_string(),
            CellValue::Relation(key) => lookups.label(relation, key),
            CellValue::Relations(keys) => keys
                .iter()
                .map(|k| lookups.label(relation, k))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Orders two values of the same column. Empty values compare greater than
    /// anything else so they end up last.
    pub fn compare(&self, other: &CellValue, relation: Option<&str>, lookups: &Lookups) -> Ordering {
        match (self, other) {
            (a, b) if a.is_empty() && b.is_empty() => Ordering::Equal,
            (a, _) if a.is_empty() => Ordering::Greater,
            (_, b) if b.is_empty() => Ordering::Less,
            (CellValue::Number(a), CellValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (a, b) => a
                .display_text(relation, lookups)
                .to_lowercase()
                .cmp(&b.display_text(relation, lookups).to_lowercase()),
        }
    }
}

/// Read-only collaborators cells render with: relation option maps and the
/// date-format preference. Treated as a snapshot for the current render.
#[derive(Debug, Clone)]
pub struct Lookups {
    relations: HashMap<String, HashMap<String, String>>,
    date_format: String,
}

impl Default for Lookups {
    fn default() -> Self {
        Self {
            relations: HashMap::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Lookups {
    /// Creates empty lookups with the default date format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the `key -> label` options of a relation (builder pattern).
    pub fn with_relation<I, K, V>(mut self, name: &str, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.relations.insert(
            name.to_string(),
            options
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets the chrono format string used for date cells (builder pattern).
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// The date format preference.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// The options of a relation, if any were supplied.
    pub fn relation(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.relations.get(name)
    }

    /// Label of `key` in `relation`, falling back to the key itself.
    pub fn label(&self, relation: Option<&str>, key: &str) -> String {
        relation
            .and_then(|r| self.relations.get(r))
            .and_then(|options| options.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Formats a date with the preference, falling back to ISO dates when the
    /// preference is not a valid format string.
    pub fn format_date(&self, date: &NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            log::debug!("invalid date format {:?}, using default", self.date_format);
            out.clear();
            let _ = write!(out, "{}", date.format(DEFAULT_DATE_FORMAT));
        }
        out
    }
}

/// How a column's cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Plain text, truncated to the column width.
    Text,
    /// A date formatted with the date-format preference.
    Date,
    /// A boolean shown as a toggle glyph.
    Toggle,
    /// A single relation shown as one badge.
    Relation,
    /// A relation list shown as overflow badges.
    Relations,
}

/// Column width policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Always this many columns.
    Fixed(usize),
    /// Shares the space left by fixed columns, never narrower than `min`.
    Flex {
        /// Narrowest the column may get.
        min: usize,
    },
}

/// Custom cell renderer: `(row, value, lookups) -> text`.
pub type RenderFn<R> = Box<dyn Fn(&R, &CellValue, &Lookups) -> String + Send + Sync>;

/// Describes one column. Supplied once and immutable for the table's lifetime.
pub struct Column<R> {
    id: String,
    title: String,
    width: ColumnWidth,
    kind: CellKind,
    relation: Option<String>,
    sortable: bool,
    hideable: bool,
    resizable: bool,
    searchable: bool,
    render: Option<RenderFn<R>>,
}

impl<R> Column<R> {
    /// Creates a column of the given kind with a flexible width.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: CellKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width: ColumnWidth::Flex { min: 8 },
            kind,
            relation: None,
            sortable: false,
            hideable: true,
            resizable: true,
            searchable: false,
            render: None,
        }
    }

    /// A text column.
    pub fn text(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, CellKind::Text)
    }

    /// A date column.
    pub fn date(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, CellKind::Date).with_width(10)
    }

    /// A boolean toggle column.
    pub fn toggle(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, CellKind::Toggle).with_width(6)
    }

    /// A single-relation column resolving labels through the `relation` options.
    pub fn relation(
        id: impl Into<String>,
        title: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        let mut column = Self::new(id, title, CellKind::Relation);
        column.relation = Some(relation.into());
        column
    }

    /// A multi-relation column rendered as overflow badges.
    pub fn relations(
        id: impl Into<String>,
        title: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        let mut column = Self::new(id, title, CellKind::Relations);
        column.relation = Some(relation.into());
        column
    }

    /// Gives the column a fixed width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = ColumnWidth::Fixed(width.max(1));
        self
    }

    /// Gives the column a flexible width with a minimum (builder pattern).
    pub fn with_flex(mut self, min: usize) -> Self {
        self.width = ColumnWidth::Flex { min: min.max(1) };
        self
    }

    /// Marks the column sortable (builder pattern).
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Marks the column searchable (builder pattern).
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Prevents the column from being hidden (builder pattern).
    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Prevents the column from being resized (builder pattern).
    pub fn fixed(mut self) -> Self {
        self.resizable = false;
        self
    }

    /// Replaces the built-in cell drawing with a custom renderer (builder pattern).
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R, &CellValue, &Lookups) -> String + Send + Sync + 'static,
    {
        self.render = Some(Box::new(render));
        self
    }

    /// Column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Width policy.
    pub fn width(&self) -> ColumnWidth {
        self.width
    }

    /// Cell kind.
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Name of the relation options used for labels.
    pub fn relation_name(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the column can be hidden.
    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    /// Whether the column can be resized.
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Whether the column takes part in search.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// The custom renderer, if one was set.
    pub fn custom_render(&self) -> Option<&RenderFn<R>> {
        self.render.as_ref()
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("resizable", &self.resizable)
            .field("searchable", &self.searchable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookups() -> Lookups {
        Lookups::new().with_relation("topic", [("t1", "Ownership"), ("t2", "async")])
    }

    #[test]
    fn test_display_text() {
        let l = lookups();
        assert_eq!(CellValue::Number(3.0).display_text(None, &l), "3");
        assert_eq!(CellValue::Number(2.5).display_text(None, &l), "2.5");
        assert_eq!(CellValue::Bool(true).display_text(None, &l), "yes");
        assert_eq!(
            CellValue::Relations(vec!["t1".into(), "t9".into()]).display_text(Some("topic"), &l),
            "Ownership, t9"
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(CellValue::Date(date).display_text(None, &l), "2024-03-09");
    }

    #[test]
    fn test_date_format_preference() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let l = Lookups::new().with_date_format("%d/%m/%Y");
        assert_eq!(l.format_date(&date), "09/03/2024");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let l = Lookups::new().with_date_format("%Q");
        assert_eq!(l.format_date(&date), "2024-03-09");
    }

    #[test]
    fn test_compare_puts_empty_last() {
        let l = lookups();
        let a = CellValue::Text("b".into());
        assert_eq!(a.compare(&CellValue::Empty, None, &l), Ordering::Less);
        assert_eq!(CellValue::Empty.compare(&a, None, &l), Ordering::Greater);
        assert_eq!(CellValue::Empty.compare(&CellValue::Empty, None, &l), Ordering::Equal);
    }

    #[test]
    fn test_compare_typed() {
        let l = lookups();
        assert_eq!(
            CellValue::Number(10.0).compare(&CellValue::Number(9.0), None, &l),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Text("apple".into()).compare(&CellValue::Text("Banana".into()), None, &l),
            Ordering::Less
        );
        // Relations compare by label, not key.
        assert_eq!(
            CellValue::Relation("t1".into()).compare(
                &CellValue::Relation("t2".into()),
                Some("topic"),
                &l
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn test_column_builders() {
        let c: Column<()> = Column::date("starts", "Starts").sortable().always_visible();
        assert_eq!(c.kind(), CellKind::Date);
        assert_eq!(c.width(), ColumnWidth::Fixed(10));
        assert!(c.is_sortable());
        assert!(!c.is_hideable());
        assert!(c.is_resizable());
        assert!(c.custom_render().is_none());
    }

    #[test]
    fn test_relation_constructors_name_their_options() {
        let single: Column<()> = Column::relation("lead", "Lead", "teacher");
        assert_eq!(single.kind(), CellKind::Relation);
        assert_eq!(single.relation_name(), Some("teacher"));

        let many: Column<()> = Column::relations("topics", "Topics", "topic");
        assert_eq!(many.kind(), CellKind::Relations);
        assert_eq!(many.relation_name(), Some("topic"));

        let plain: Column<()> = Column::text("title", "Title");
        assert_eq!(plain.relation_name(), None);
    }
}
