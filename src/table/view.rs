//! View rendering for the table model.
//!
//! Everything here is a pure function of the controller state and the model's
//! presentation fields. The output is stacked top to bottom:
//!
//! 1. search/status line
//! 2. header (titles, sort arrows, resize handles) and its rule
//! 3. body rows, or a single "No results." row
//! 4. detail line for the focused cell of the cursor row
//! 5. pagination strip
//! 6. help line

use super::column::{CellKind, CellValue, Column, ColumnWidth, Record};
use super::state::{Mode, SortDirection};
use super::Model;
use crate::badges::BadgeItem;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of the cursor and selection markers in front of every row.
const MARKER_WIDTH: usize = 2;

/// Width of the gap after every column; holds the resize handle in the header.
const GUTTER_WIDTH: usize = 3;

const NO_RESULTS: &str = "No results.";

/// Cuts `text` to at most `width` display columns, ending in `ellipsis` when cut.
///
/// Line breaks become spaces and wide graphemes are never split.
///
/// ```rust
/// use bubbletea_datatable::table::truncate;
///
/// assert_eq!(truncate("Ownership", 20, "…"), "Ownership");
/// assert_eq!(truncate("Ownership", 6, "…"), "Owner…");
/// assert_eq!(truncate("日本語", 5, "…"), "日本…");
/// ```
pub fn truncate(text: &str, width: usize, ellipsis: &str) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if UnicodeWidthStr::width(text.as_str()) <= width {
        return text;
    }
    let ellipsis_width = UnicodeWidthStr::width(ellipsis);
    if width < ellipsis_width {
        return String::new();
    }

    let budget = width - ellipsis_width;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ellipsis);
    out
}

/// Pads a possibly styled string with spaces to `width` visible columns.
fn pad(text: String, width: usize) -> String {
    let visible = lipgloss::width_visible(&text);
    if visible >= width {
        return text;
    }
    text + &" ".repeat(width - visible)
}

/// Resolves column widths for `available` display columns.
///
/// Each entry is a column's width policy plus the width it was resized to, if
/// any. Resized and fixed columns keep their width; flexible columns share what is
/// left evenly (the leftmost get the remainder) and never drop below their minimum.
///
/// ```rust
/// use bubbletea_datatable::table::{resolve_widths, ColumnWidth};
///
/// let specs = [
///     (ColumnWidth::Fixed(10), None),
///     (ColumnWidth::Flex { min: 8 }, None),
///     (ColumnWidth::Flex { min: 8 }, Some(12)),
/// ];
/// assert_eq!(resolve_widths(&specs, 40), vec![10, 18, 12]);
/// ```
pub fn resolve_widths(specs: &[(ColumnWidth, Option<usize>)], available: usize) -> Vec<usize> {
    let fixed: usize = specs
        .iter()
        .map(|spec| match spec {
            (_, Some(width)) | (ColumnWidth::Fixed(width), None) => *width,
            (ColumnWidth::Flex { .. }, None) => 0,
        })
        .sum();
    let flexible = specs
        .iter()
        .filter(|spec| matches!(spec, (ColumnWidth::Flex { .. }, None)))
        .count();

    let remaining = available.saturating_sub(fixed);
    let (share, extra) = match flexible {
        0 => (0, 0),
        n => (remaining / n, remaining % n),
    };

    let mut seen = 0;
    specs
        .iter()
        .map(|spec| match spec {
            (_, Some(width)) | (ColumnWidth::Fixed(width), None) => *width,
            (ColumnWidth::Flex { min }, None) => {
                let bonus = usize::from(seen < extra);
                seen += 1;
                (share + bonus).max(*min)
            }
        })
        .collect()
}

impl<R: Record> Model<R> {
    /// Visible columns with their resolved widths.
    pub(super) fn layout(&self) -> Vec<(&Column<R>, usize)> {
        let columns = self.controller.visible_columns();
        let specs: Vec<(ColumnWidth, Option<usize>)> = columns
            .iter()
            .map(|c| (c.width(), self.column_widths.get(c.id()).copied()))
            .collect();
        let available = self
            .width
            .saturating_sub(MARKER_WIDTH + GUTTER_WIDTH * columns.len());
        let widths = resolve_widths(&specs, available);
        columns.into_iter().zip(widths).collect()
    }

    /// Renders the whole table.
    pub fn view(&self) -> String {
        let layout = self.layout();
        let mut lines = vec![
            self.view_search_line(),
            self.view_header(&layout),
            self.view_rule(&layout),
        ];
        lines.extend(self.view_rows(&layout));
        lines.push(self.view_detail(&layout));
        lines.push(self.view_pagination());
        if self.show_help {
            lines.push(self.help_view());
        }
        lines.join("\n")
    }

    fn view_search_line(&self) -> String {
        let text = (self.searching || !self.search_input.is_empty())
            .then_some(self.search_input.as_str());

        let mut parts = Vec::new();
        if let Some(text) = text {
            parts.push(format!(
                "{}{}",
                self.styles.search_prompt.render("/ "),
                self.styles.search_text.render(text)
            ));
        }
        let status = self.status_text();
        if !status.is_empty() {
            parts.push(self.styles.status.render(&status));
        }
        parts.join("  ")
    }

    fn status_text(&self) -> String {
        let mut parts = Vec::new();
        match self.controller.mode() {
            Mode::Local => {
                let n = self.controller.matched_len();
                parts.push(format!("{n} {}", if n == 1 { "row" } else { "rows" }));
            }
            Mode::Delegated => {
                let count = self.controller.page_count();
                if count > 0 {
                    parts.push(format!(
                        "page {} of {count}",
                        self.controller.page_index() + 1
                    ));
                }
            }
        }
        if !self.selection.is_empty() {
            parts.push(format!("{} selected", self.selection.len()));
        }
        parts.join(" · ")
    }

    fn view_header(&self, layout: &[(&Column<R>, usize)]) -> String {
        let mut line = " ".repeat(MARKER_WIDTH);
        for (i, (column, width)) in layout.iter().enumerate() {
            let arrow = match self.state().sort_direction(column.id()) {
                Some(SortDirection::Ascending) => self.glyphs.sort_ascending.as_str(),
                Some(SortDirection::Descending) => self.glyphs.sort_descending.as_str(),
                None => "",
            };
            let arrow_width = if arrow.is_empty() {
                0
            } else {
                UnicodeWidthStr::width(arrow) + 1
            };

            let style = if i == self.focus {
                &self.styles.focused_header
            } else {
                &self.styles.header
            };
            let title = truncate(
                column.title(),
                width.saturating_sub(arrow_width),
                &self.glyphs.ellipsis,
            );
            let mut cell = style.render(&title);
            if !arrow.is_empty() && *width >= arrow_width {
                cell.push(' ');
                cell.push_str(&self.styles.sort_indicator.render(arrow));
            }
            line.push_str(&pad(cell, *width));

            if column.is_resizable() {
                line.push(' ');
                line.push_str(&self.styles.resize_handle.render(&self.glyphs.resize_handle));
                line.push(' ');
            } else {
                line.push_str(&" ".repeat(GUTTER_WIDTH));
            }
        }
        line
    }

    fn view_rule(&self, layout: &[(&Column<R>, usize)]) -> String {
        let total = MARKER_WIDTH
            + layout
                .iter()
                .map(|(_, width)| width + GUTTER_WIDTH)
                .sum::<usize>();
        self.styles.header_rule.render(&self.glyphs.rule.repeat(total))
    }

    fn view_rows(&self, layout: &[(&Column<R>, usize)]) -> Vec<String> {
        let rows = self.controller.visible_rows();
        let unknown = self.controller.mode() == Mode::Delegated && self.controller.page_count() == 0;
        if rows.is_empty() || unknown {
            return vec![format!(
                "{}{}",
                " ".repeat(MARKER_WIDTH),
                self.styles.no_results.render(NO_RESULTS)
            )];
        }

        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let is_cursor = i == self.cursor;
                let highlight = if is_cursor {
                    Some(&self.styles.cursor_row)
                } else if self.striped && i % 2 == 1 {
                    Some(&self.styles.striped_row)
                } else {
                    None
                };

                let cursor = if is_cursor { self.glyphs.cursor.as_str() } else { " " };
                let selected = if self.selection.contains(&row.key()) {
                    self.glyphs.selected.as_str()
                } else {
                    " "
                };
                let mut line = self.styles.marker.render(&format!("{cursor}{selected}"));
                for (column, width) in layout {
                    line.push_str(&pad(self.view_cell(row, column, *width, highlight), *width));
                    line.push_str(&" ".repeat(GUTTER_WIDTH));
                }
                line
            })
            .collect()
    }

    /// Renders one cell. `highlight` is the cursor or stripe style of the row; it
    /// replaces the badge colors so the highlight runs through badge cells too.
    fn view_cell(
        &self,
        row: &R,
        column: &Column<R>,
        width: usize,
        highlight: Option<&Style>,
    ) -> String {
        let value = row.value(column.id());
        let lookups = self.controller.lookups();
        let style = highlight.unwrap_or(&self.styles.cell);
        let text_cell = |text: &str| style.render(&pad(truncate(text, width, &self.glyphs.ellipsis), width));
        let badge_cell = |badges: String| match highlight {
            Some(row_style) => row_style.render(&pad(lipgloss::strip_ansi(&badges), width)),
            None => badges,
        };

        if let Some(render) = column.custom_render() {
            return text_cell(&render(row, &value, lookups));
        }

        match (column.kind(), &value) {
            (CellKind::Relations, _) => {
                badge_cell(self.badges.render(&self.badge_items(column, &value), width))
            }
            (CellKind::Relation, CellValue::Relation(key)) => {
                let label = lookups.label(column.relation_name(), key);
                let badge = self.badges.badge(&label);
                if lipgloss::width_visible(&badge) <= width {
                    badge_cell(badge)
                } else {
                    text_cell(&label)
                }
            }
            (CellKind::Toggle, CellValue::Bool(on)) => text_cell(if *on {
                self.glyphs.toggle_on.as_str()
            } else {
                self.glyphs.toggle_off.as_str()
            }),
            _ => text_cell(&value.display_text(column.relation_name(), lookups)),
        }
    }

    fn badge_items(&self, column: &Column<R>, value: &CellValue) -> Vec<BadgeItem> {
        let options = column
            .relation_name()
            .and_then(|r| self.controller.lookups().relation(r));
        match value {
            CellValue::Relations(keys) => BadgeItem::from_keys(keys, options),
            CellValue::Relation(key) => BadgeItem::from_keys(std::slice::from_ref(key), options),
            _ => Vec::new(),
        }
    }

    /// Full content of the focused cell of the cursor row when the cell cannot show
    /// all of it: the tooltip of hidden badges, or the untruncated text.
    fn view_detail(&self, layout: &[(&Column<R>, usize)]) -> String {
        let (Some(row), Some((column, width))) = (self.cursor_row(), layout.get(self.focus)) else {
            return String::new();
        };
        let value = row.value(column.id());
        let lookups = self.controller.lookups();

        let text = match column.kind() {
            CellKind::Relations if column.custom_render().is_none() => {
                let items = self.badge_items(column, &value);
                match self.badges.layout(&items, *width) {
                    Some(layout) if layout.has_indicator() => self.badges.tooltip(&items),
                    _ => return String::new(),
                }
            }
            _ => {
                let text = match column.custom_render() {
                    Some(render) => render(row, &value, lookups),
                    None => value.display_text(column.relation_name(), lookups),
                };
                if UnicodeWidthStr::width(text.as_str()) <= *width {
                    return String::new();
                }
                text
            }
        };

        let line = format!("{}: {text}", column.title());
        let line = if self.width > 0 {
            truncate(&line, self.width, &self.glyphs.ellipsis)
        } else {
            line
        };
        self.styles.detail.render(&line)
    }

    fn view_pagination(&self) -> String {
        let mut strip = self.pagination.clone();
        strip.set_pages(self.controller.page_index(), self.controller.page_count());
        format!("{}{}", " ".repeat(MARKER_WIDTH), strip.view())
    }
}
