//! The pagination strip shown under a table.
//!
//! The strip renders `‹ prev`, a capped window of page numbers and `next ›`. When
//! there are more pages than the window holds, an ellipsis marks each side of the
//! window that does not reach the first or last page:
//!
//! ```text
//! ‹ prev  1 2 3 4 5 …  next ›
//! ‹ prev  … 4 5 6 7 8 …  next ›
//! ‹ prev  … 6 7 8 9 10  next ›
//! ```
//!
//! Like the rest of the table, the strip holds no state of its own: the table copies
//! its current page and page count in before rendering. The window computation is a
//! pure function, [`page_window`].
//!
//! ```rust
//! use bubbletea_datatable::paginator::{page_window, PageItem};
//!
//! let items = page_window(5, 10, 5);
//! assert_eq!(items.first(), Some(&PageItem::Ellipsis));
//! assert!(items.contains(&PageItem::Page(5)));
//! assert_eq!(items.last(), Some(&PageItem::Ellipsis));
//! ```

use lipgloss_extras::prelude::*;

/// Number of page buttons shown by default.
pub const DEFAULT_WINDOW: usize = 5;

/// One slot of the page-number window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A zero-based page index.
    Page(usize),
    /// Pages left out of the window.
    Ellipsis,
}

/// Computes the page-number window around `current`.
///
/// The window holds at most `window` pages, is centred on `current` where possible
/// and slides to stay inside `[0, count)`. An [`PageItem::Ellipsis`] precedes the
/// window when it does not start at the first page and follows it when it does not
/// end at the last page. Returns an empty list when `count` is 0.
pub fn page_window(current: usize, count: usize, window: usize) -> Vec<PageItem> {
    if count == 0 {
        return Vec::new();
    }
    let window = window.clamp(1, count);
    let current = current.min(count - 1);

    let mut start = current.saturating_sub(window / 2);
    let end = (start + window).min(count);
    start = end - window;

    let mut items = Vec::with_capacity(window + 2);
    if start > 0 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..end).map(PageItem::Page));
    if end < count {
        items.push(PageItem::Ellipsis);
    }
    items
}

/// Renders the pagination strip.
#[derive(Debug, Clone)]
pub struct Model {
    /// Current zero-based page.
    pub page: usize,
    /// Number of pages; 0 means nothing to page through.
    pub total_pages: usize,
    /// Maximum number of page buttons.
    pub window: usize,
    /// Label of the previous-page control.
    pub prev_label: String,
    /// Label of the next-page control.
    pub next_label: String,
    /// Style of the current page number.
    pub active_style: Style,
    /// Style of the other page numbers and ellipses.
    pub inactive_style: Style,
    /// Style of a control that cannot be used (prev on the first page, next on the last).
    pub disabled_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 0,
            total_pages: 0,
            window: DEFAULT_WINDOW,
            prev_label: "‹ prev".to_string(),
            next_label: "next ›".to_string(),
            active_style: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true)
                .underline(true),
            inactive_style: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            disabled_style: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#DDDADA",
                    Dark: "#3C3C3C",
                }),
        }
    }
}

impl Model {
    /// Creates a strip with the default labels and window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of page buttons (builder pattern). Values below 1 become 1.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Sets the current page and page count, clamping the page.
    pub fn set_pages(&mut self, page: usize, total_pages: usize) {
        self.total_pages = total_pages;
        self.page = if total_pages == 0 {
            0
        } else {
            page.min(total_pages - 1)
        };
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Renders the strip on one line.
    pub fn view(&self) -> String {
        let control = |label: &str, enabled: bool| {
            if enabled {
                self.inactive_style.render(label)
            } else {
                self.disabled_style.render(label)
            }
        };

        let mut parts = vec![control(&self.prev_label, self.has_prev())];
        let numbers = page_window(self.page, self.total_pages, self.window)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(i) if i == self.page => self.active_style.render(&(i + 1).to_string()),
                PageItem::Page(i) => self.inactive_style.render(&(i + 1).to_string()),
                PageItem::Ellipsis => self.inactive_style.render("…"),
            })
            .collect::<Vec<_>>();
        if !numbers.is_empty() {
            parts.push(numbers.join(" "));
        }
        parts.push(control(&self.next_label, self.has_next()));
        parts.join("  ")
    }
}
