//! Overflow badges for relation cells.
//!
//! A relation cell shows an unbounded list of labels as a single line of badges.
//! Only the longest prefix that fits the cell is shown; the rest is summarised by a
//! `+N` indicator, and the full list stays available through [`OverflowBadges::tooltip`].
//!
//! Deciding how many badges fit is done in two passes. First every badge and the
//! indicator are rendered off-screen and measured ([`OverflowBadges::measure`]); then
//! [`visible_count`] decides from the measured widths alone. The second pass is a pure
//! function and can be exercised without rendering anything:
//!
//! ```rust
//! use bubbletea_datatable::badges::visible_count;
//!
//! // Eight 60-wide badges, gap 4, a 30-wide indicator, 250 available.
//! let widths = vec![60; 8];
//! assert_eq!(visible_count(&widths, 250, 30, 4), 3);
//! ```
//!
//! Layouts are recomputed from scratch on every render; nothing from a previous
//! width or item list is carried over.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::collections::HashMap;

/// Maximum number of labels listed in a tooltip before it is cut short.
pub const TOOLTIP_LIMIT: usize = 10;

/// One label of a relation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeItem {
    /// Identity of the related entity.
    pub key: String,
    /// Text shown on the badge.
    pub label: String,
}

impl BadgeItem {
    /// Creates a badge item.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Resolves relation keys to badge items through an option map.
    ///
    /// Keys missing from `options` are shown as-is.
    pub fn from_keys(keys: &[String], options: Option<&HashMap<String, String>>) -> Vec<Self> {
        keys.iter()
            .map(|key| {
                let label = options
                    .and_then(|o| o.get(key))
                    .cloned()
                    .unwrap_or_else(|| key.clone());
                Self::new(key.clone(), label)
            })
            .collect()
    }
}

/// Widths captured by rendering the badges off-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Width available to the cell.
    pub container_width: usize,
    /// Rendered width of every badge, in item order.
    pub item_widths: Vec<usize>,
    /// Rendered width of the widest indicator (`+N` for the full list).
    pub indicator_width: usize,
}

/// Outcome of a badge layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeLayout {
    /// Leading items rendered as badges.
    pub visible: usize,
    /// Items summarised by the indicator.
    pub hidden: usize,
}

impl BadgeLayout {
    /// Whether the `+N` indicator is shown.
    pub fn has_indicator(&self) -> bool {
        self.hidden > 0
    }
}

/// Decides how many leading badges fit on one line.
///
/// Every item after the first costs its width plus `gap`. When the whole list does
/// not fit, an item is only accepted if the `+N` indicator (preceded by a gap) still
/// fits after it. The result is `item_widths.len()` exactly when no indicator is
/// needed.
///
/// A container narrower than the indicator itself shows no badge, and the indicator
/// is then left out too (see [`OverflowBadges::render`]); nothing ever exceeds
/// `container_width`.
pub fn visible_count(
    item_widths: &[usize],
    container_width: usize,
    indicator_width: usize,
    gap: usize,
) -> usize {
    let n = item_widths.len();
    if n == 0 {
        return 0;
    }

    let total: usize = item_widths.iter().sum::<usize>() + gap * (n - 1);
    if total <= container_width {
        return n;
    }

    let reserve = gap + indicator_width;
    let mut used = 0;
    for (i, &width) in item_widths.iter().enumerate() {
        let added = if i == 0 { width } else { width + gap };
        if used + added > container_width {
            return i;
        }
        if container_width - (used + added) < reserve {
            return i;
        }
        used += added;
    }
    n
}

/// Renders relation lists as badges with an overflow indicator.
#[derive(Debug, Clone)]
pub struct OverflowBadges {
    /// Style of a single badge.
    pub badge_style: Style,
    /// Style of the `+N` indicator.
    pub indicator_style: Style,
    /// Columns between two badges.
    pub gap: usize,
    /// Labels listed by the tooltip before it is cut short.
    pub tooltip_limit: usize,
    /// Separator between tooltip labels.
    pub separator: String,
}

impl Default for OverflowBadges {
    fn default() -> Self {
        Self {
            badge_style: Style::new().foreground(AdaptiveColor {
                Light: "#5A56E0",
                Dark: "#A8A5F8",
            }),
            indicator_style: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            gap: 1,
            tooltip_limit: TOOLTIP_LIMIT,
            separator: ", ".to_string(),
        }
    }
}

impl OverflowBadges {
    /// Creates a renderer with the default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gap between badges (builder pattern).
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Renders one badge.
    pub fn badge(&self, label: &str) -> String {
        self.badge_style.render(&format!("[{label}]"))
    }

    fn indicator(&self, hidden: usize) -> String {
        self.indicator_style.render(&format!("+{hidden}"))
    }

    /// First pass: renders every badge and the widest indicator and measures them.
    pub fn measure(&self, items: &[BadgeItem], container_width: usize) -> Measurement {
        let item_widths = items
            .iter()
            .map(|item| lipgloss::width_visible(&self.badge(&item.label)))
            .collect();
        let indicator_width = lipgloss::width_visible(&self.indicator(items.len()));
        log::trace!(
            "badges: measured {} items for width {container_width}",
            items.len()
        );
        Measurement {
            container_width,
            item_widths,
            indicator_width,
        }
    }

    /// Second pass over a measurement.
    pub fn layout_measured(&self, measurement: &Measurement) -> BadgeLayout {
        let n = measurement.item_widths.len();
        let visible = visible_count(
            &measurement.item_widths,
            measurement.container_width,
            measurement.indicator_width,
            self.gap,
        );
        BadgeLayout {
            visible,
            hidden: n - visible,
        }
    }

    /// Measures and lays out `items`, or `None` when the cell has no width yet.
    pub fn layout(&self, items: &[BadgeItem], container_width: usize) -> Option<BadgeLayout> {
        if container_width == 0 {
            return None;
        }
        Some(self.layout_measured(&self.measure(items, container_width)))
    }

    /// Renders the visible badges followed by the `+N` indicator if needed.
    ///
    /// Returns an empty string when the cell has no width yet.
    pub fn render(&self, items: &[BadgeItem], container_width: usize) -> String {
        let Some(layout) = self.layout(items, container_width) else {
            return String::new();
        };
        let gap = " ".repeat(self.gap);
        let mut out = items[..layout.visible]
            .iter()
            .map(|item| self.badge(&item.label))
            .collect::<Vec<_>>()
            .join(&gap);
        if layout.has_indicator() {
            let indicator = self.indicator(layout.hidden);
            if layout.visible > 0 {
                out.push_str(&gap);
                out.push_str(&indicator);
            } else if lipgloss::width_visible(&indicator) <= container_width {
                out.push_str(&indicator);
            } else {
                log::trace!("badges: width {container_width} too narrow for the indicator");
            }
        }
        out
    }

    /// Full label list for the on-demand disclosure, capped at `tooltip_limit`.
    pub fn tooltip(&self, items: &[BadgeItem]) -> String {
        let shown = items
            .iter()
            .take(self.tooltip_limit)
            .map(|item| item.label.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator);
        if items.len() > self.tooltip_limit {
            format!("{shown} … and {} more", items.len() - self.tooltip_limit)
        } else {
            shown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<BadgeItem> {
        (1..=n)
            .map(|i| BadgeItem::new(format!("t{i}"), format!("Topic {i}")))
            .collect()
    }

    // Deterministic pseudo-random widths, no extra dependency needed.
    fn widths(seed: u64, n: usize) -> Vec<usize> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) % 40 + 3) as usize
            })
            .collect()
    }

    #[test]
    fn test_fixed_width_badges() {
        let widths = vec![60; 8];
        assert_eq!(visible_count(&widths, 250, 30, 4), 3);
    }

    #[test]
    fn test_everything_fits_without_indicator() {
        assert_eq!(visible_count(&[10, 10, 10], 32, 5, 1), 3);
        // Exactly full: fits, no indicator needed.
        assert_eq!(visible_count(&[100, 10, 10], 120, 30, 0), 3);
    }

    #[test]
    fn test_reserves_room_for_indicator() {
        // The second badge fits, but would leave no room for "+1".
        assert_eq!(visible_count(&[10, 10, 10], 25, 4, 1), 1);
    }

    #[test]
    fn test_empty_and_tiny_containers() {
        assert_eq!(visible_count(&[], 100, 3, 1), 0);
        assert_eq!(visible_count(&[20, 20], 5, 3, 1), 0);
    }

    #[test]
    fn test_soundness_and_completeness() {
        let (gap, indicator) = (1, 3);
        for seed in 0..200 {
            let w = widths(seed, (seed % 12) as usize);
            for container in [1, 2, indicator, 10, 25, 40, 80, 160] {
                let k = visible_count(&w, container, indicator, gap);
                assert!(k <= w.len());
                let used: usize = w[..k].iter().sum::<usize>() + gap * k.saturating_sub(1);
                if k == w.len() {
                    assert!(used <= container, "all shown but overflow: {w:?} in {container}");
                } else if k == 0 {
                    // The indicator alone is drawn only when it fits.
                    let total = if indicator <= container { indicator } else { 0 };
                    assert!(total <= container, "overflow: {w:?} in {container}");
                } else {
                    assert!(
                        used + gap + indicator <= container,
                        "overflow: {w:?} k={k} in {container}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_layout_is_idempotent() {
        let badges = OverflowBadges::new();
        let list = items(8);
        let first = badges.layout(&list, 30);
        assert_eq!(first, badges.layout(&list, 30));
        let layout = first.unwrap();
        assert_eq!(layout.visible + layout.hidden, 8);
    }

    #[test]
    fn test_zero_width_skips_cycle() {
        let badges = OverflowBadges::new();
        assert_eq!(badges.layout(&items(3), 0), None);
        assert_eq!(badges.render(&items(3), 0), "");
    }

    #[test]
    fn test_render_respects_width() {
        let badges = OverflowBadges::new();
        let list = items(8);
        for width in [1, 2, 8, 12, 20, 30, 45, 200] {
            let out = badges.render(&list, width);
            assert!(
                lipgloss::width_visible(&out) <= width,
                "width {width}: {:?}",
                lipgloss::strip_ansi(&out)
            );
        }
    }

    #[test]
    fn test_render_narrower_than_indicator() {
        let badges = OverflowBadges::new();
        let list = items(12);
        assert_eq!(visible_count(&[5, 5, 5], 2, 3, 1), 0);
        for width in [1, 2] {
            let layout = badges.layout(&list, width).unwrap();
            assert_eq!(layout.visible, 0);
            assert_eq!(layout.hidden, 12);
            assert_eq!(badges.render(&list, width), "");
        }
        // Three columns hold "+12" exactly.
        assert_eq!(lipgloss::strip_ansi(&badges.render(&list, 3)), "+12");
    }

    #[test]
    fn test_render_shows_hidden_count() {
        let badges = OverflowBadges::new();
        let list = items(4);
        let layout = badges.layout(&list, 22).unwrap();
        let out = lipgloss::strip_ansi(&badges.render(&list, 22));
        assert!(layout.has_indicator());
        assert!(out.starts_with("[Topic 1]"));
        assert!(out.ends_with(&format!("+{}", layout.hidden)));
    }

    #[test]
    fn test_tooltip_lists_everything_up_to_cap() {
        let badges = OverflowBadges::new();
        assert_eq!(badges.tooltip(&items(2)), "Topic 1, Topic 2");
        assert_eq!(badges.tooltip(&[]), "");

        let long = badges.tooltip(&items(13));
        assert!(long.starts_with("Topic 1, Topic 2"));
        assert!(long.contains("Topic 10"));
        assert!(!long.contains("Topic 11"));
        assert!(long.ends_with("… and 3 more"));
    }

    #[test]
    fn test_from_keys_falls_back_to_key() {
        let mut options = HashMap::new();
        options.insert("c1".to_string(), "Rust 101".to_string());
        let keys = vec!["c1".to_string(), "c9".to_string()];
        let items = BadgeItem::from_keys(&keys, Some(&options));
        assert_eq!(items[0].label, "Rust 101");
        assert_eq!(items[1].label, "c9");
    }
}
