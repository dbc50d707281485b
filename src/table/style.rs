//! Styles and glyphs for the table.
//!
//! [`Styles`] holds one lipgloss style per visual element; every default uses an
//! `AdaptiveColor` so the table reads well on light and dark terminals. [`Glyphs`]
//! holds the symbols drawn by the table. Two glyph sets are predefined:
//! [`UNICODE`] (the default) and [`ASCII`] for terminals without box-drawing fonts.
//!
//! ```rust
//! use bubbletea_datatable::table::style::{Styles, ASCII};
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = Styles::default();
//! styles.header = Style::new()
//!     .foreground(AdaptiveColor { Light: "#1a1a1a", Dark: "#ffffff" })
//!     .bold(true);
//! assert_eq!(ASCII.sort_ascending, "^");
//! ```

use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;

/// Symbols drawn by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyphs {
    /// After the title of a column sorted ascending.
    pub sort_ascending: String,
    /// After the title of a column sorted descending.
    pub sort_descending: String,
    /// Resize handle after a resizable column's title.
    pub resize_handle: String,
    /// Repeated to draw the rule under the header.
    pub rule: String,
    /// Marks cut-off cell text.
    pub ellipsis: String,
    /// A true toggle cell.
    pub toggle_on: String,
    /// A false toggle cell.
    pub toggle_off: String,
    /// Marks the cursor row.
    pub cursor: String,
    /// Marks a selected row.
    pub selected: String,
}

/// Box-drawing and geometric symbols.
pub static UNICODE: Lazy<Glyphs> = Lazy::new(|| Glyphs {
    sort_ascending: "▲".to_string(),
    sort_descending: "▼".to_string(),
    resize_handle: "│".to_string(),
    rule: "─".to_string(),
    ellipsis: "…".to_string(),
    toggle_on: "●".to_string(),
    toggle_off: "○".to_string(),
    cursor: "›".to_string(),
    selected: "•".to_string(),
});

/// Plain ASCII symbols.
pub static ASCII: Lazy<Glyphs> = Lazy::new(|| Glyphs {
    sort_ascending: "^".to_string(),
    sort_descending: "v".to_string(),
    resize_handle: "|".to_string(),
    rule: "-".to_string(),
    ellipsis: "~".to_string(),
    toggle_on: "x".to_string(),
    toggle_off: "-".to_string(),
    cursor: ">".to_string(),
    selected: "*".to_string(),
});

impl Default for Glyphs {
    fn default() -> Self {
        UNICODE.clone()
    }
}

/// Style of every visual element of the table.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Column titles.
    pub header: Style,
    /// Title of the focused column.
    pub focused_header: Style,
    /// Sort arrow.
    pub sort_indicator: Style,
    /// Resize handle.
    pub resize_handle: Style,
    /// Rule under the header.
    pub header_rule: Style,
    /// Plain body cells.
    pub cell: Style,
    /// Every other body row.
    pub striped_row: Style,
    /// The cursor row.
    pub cursor_row: Style,
    /// Cursor and selection markers.
    pub marker: Style,
    /// The "No results." row.
    pub no_results: Style,
    /// The search prompt.
    pub search_prompt: Style,
    /// The search text.
    pub search_text: Style,
    /// The detail line under the body.
    pub detail: Style,
    /// The status text next to the pagination strip.
    pub status: Style,
    /// The help line.
    pub help: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        let very_subdued = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };

        Self {
            header: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true),
            focused_header: Style::new().foreground(accent.clone()).bold(true).underline(true),
            sort_indicator: Style::new().foreground(accent.clone()),
            resize_handle: Style::new().foreground(very_subdued.clone()),
            header_rule: Style::new().foreground(very_subdued),
            cell: Style::new(),
            striped_row: Style::new().foreground(AdaptiveColor {
                Light: "#4A4A4A",
                Dark: "#B2B2B2",
            }),
            cursor_row: Style::new().reverse(true),
            marker: Style::new().foreground(accent),
            no_results: Style::new().foreground(subdued.clone()),
            search_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            search_text: Style::new(),
            detail: Style::new().foreground(subdued.clone()),
            status: Style::new().foreground(subdued.clone()),
            help: Style::new().foreground(subdued),
        }
    }
}
