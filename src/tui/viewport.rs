//! Windowed row viewport with full-list keyboard focus navigation.
//!
//! Renders only the rows that fall inside the visible area (plus overscan)
//! while letting focus travel over the whole logical list. Geometry is
//! expressed in terminal lines: `row_height` lines per row, `viewport_lines`
//! lines of content area. Lists shorter than `full_render_threshold` skip
//! the windowing math entirely and expose the whole list as the window.

use std::ops::Range;

/// Tunables for [`RowViewport`]. The threshold and overscan are presentation
/// knobs, not contracts; they are surfaced on the CLI.
#[derive(Debug, Clone, Copy)]
pub struct ViewportConfig {
    /// Lines occupied by one row (uniform; variable heights unsupported).
    pub row_height: usize,
    /// Extra rows kept rendered on each edge of the visible range.
    pub overscan: usize,
    /// Below this row count the whole list is rendered without windowing.
    pub full_render_threshold: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            row_height: 1,
            overscan: 4,
            full_render_threshold: 100,
        }
    }
}

/// Scroll and focus state for a windowed row list.
///
/// Invariants:
/// - `focused` stays in `[0, row_count-1]` (0 when the list is empty);
/// - `scroll_offset` never exceeds `total_lines - viewport_lines`;
/// - the visible range always contains `scroll_offset / row_height`.
#[derive(Debug, Clone)]
pub struct RowViewport {
    row_count: usize,
    viewport_lines: usize,
    row_height: usize,
    overscan: usize,
    full_render_threshold: usize,
    /// Scroll offset into the virtual list, in lines.
    scroll_offset: usize,
    /// Logically focused row, independent of what is rendered.
    focused: usize,
}

impl Default for RowViewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl RowViewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            row_count: 0,
            viewport_lines: 0,
            row_height: config.row_height,
            overscan: config.overscan,
            full_render_threshold: config.full_render_threshold,
            scroll_offset: 0,
            focused: 0,
        }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Updates the row count, clamping focus and scroll. Called on every
    /// data refresh and whenever filtering changes the list length.
    pub fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
        if rows == 0 {
            self.focused = 0;
            self.scroll_offset = 0;
            return;
        }
        if self.focused >= rows {
            self.focused = rows - 1;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Updates the content-area height in lines (on resize or layout change).
    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Rows that fit fully in the viewport; also the page size.
    pub fn visible_rows(&self) -> usize {
        if self.row_height == 0 {
            return 0;
        }
        self.viewport_lines / self.row_height
    }

    fn total_lines(&self) -> usize {
        self.row_count * self.row_height
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.viewport_lines)
    }

    /// Whether windowing is in effect (large list) or the whole list is
    /// rendered (small list).
    pub fn is_windowed(&self) -> bool {
        self.row_count >= self.full_render_threshold
    }

    /// Inclusive index range of rows intersecting the viewport, or `None`
    /// for degenerate geometry (zero height) or an empty list.
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        if self.row_height == 0 || self.viewport_lines == 0 || self.row_count == 0 {
            return None;
        }
        let first = (self.scroll_offset / self.row_height).min(self.row_count - 1);
        let end = (self.scroll_offset + self.viewport_lines).div_ceil(self.row_height);
        let last = end.min(self.row_count) - 1;
        Some((first, last.max(first)))
    }

    /// Index range of rows to materialize: the visible range padded with
    /// overscan, or the whole list below the full-render threshold.
    pub fn window(&self) -> Range<usize> {
        let Some((first, last)) = self.visible_range() else {
            return 0..0;
        };
        if !self.is_windowed() {
            return 0..self.row_count;
        }
        let start = first.saturating_sub(self.overscan);
        let end = (last + 1 + self.overscan).min(self.row_count);
        start..end
    }

    /// Scrolls so that `index` is fully visible, aligned at the nearest
    /// viewport edge (minimal scroll distance). No-op when already visible.
    pub fn scroll_to(&mut self, index: usize) {
        if self.row_height == 0 || self.viewport_lines == 0 || self.row_count == 0 {
            return;
        }
        let index = index.min(self.row_count - 1);
        let top = index * self.row_height;
        let bottom = top + self.row_height;
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport_lines {
            self.scroll_offset = bottom - self.viewport_lines;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Adjusts the scroll offset by whole lines (mouse wheel). Focus is left
    /// untouched; only the rendered window changes.
    pub fn scroll_by(&mut self, delta_lines: i64) {
        let offset = self.scroll_offset as i64 + delta_lines;
        self.scroll_offset = offset.max(0).min(self.max_scroll() as i64) as usize;
    }

    /// Moves focus to `index` (clamped) and scrolls it into view.
    pub fn set_focus(&mut self, index: usize) {
        if self.row_count == 0 {
            self.focused = 0;
            return;
        }
        self.focused = index.min(self.row_count - 1);
        self.scroll_to(self.focused);
    }

    pub fn focus_up(&mut self) {
        self.set_focus(self.focused.saturating_sub(1));
    }

    pub fn focus_down(&mut self) {
        self.set_focus(self.focused.saturating_add(1));
    }

    pub fn focus_page_up(&mut self) {
        self.set_focus(self.focused.saturating_sub(self.visible_rows()));
    }

    pub fn focus_page_down(&mut self) {
        self.set_focus(self.focused.saturating_add(self.visible_rows()));
    }

    pub fn focus_home(&mut self) {
        self.set_focus(0);
    }

    pub fn focus_end(&mut self) {
        self.set_focus(usize::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(rows: usize, viewport_lines: usize, row_height: usize) -> RowViewport {
        let mut vp = RowViewport::new(ViewportConfig {
            row_height,
            overscan: 4,
            full_render_threshold: 100,
        });
        vp.set_viewport_lines(viewport_lines);
        vp.set_row_count(rows);
        vp
    }

    #[test]
    fn small_list_renders_all_rows() {
        // 50 rows, below the threshold of 100: no windowing.
        let vp = viewport(50, 20, 1);
        assert!(!vp.is_windowed());
        assert_eq!(vp.window(), 0..50);
    }

    #[test]
    fn large_list_window_is_bounded() {
        let mut vp = viewport(1000, 40, 1);
        assert!(vp.is_windowed());
        let bound = vp.visible_rows() + 1 + 2 * 4;
        for offset in [0usize, 1, 39, 40, 500, 959, 960] {
            vp.scroll_by(offset as i64 - vp.scroll_offset() as i64);
            let w = vp.window();
            assert!(w.len() <= bound, "window {w:?} exceeds bound {bound}");
            assert!(w.len() < 1000);
        }
    }

    #[test]
    fn visible_range_contains_scroll_row() {
        let mut vp = viewport(500, 400, 35);
        for offset in [0usize, 1, 34, 35, 36, 399, 400, 7000] {
            vp.scroll_by(offset as i64 - vp.scroll_offset() as i64);
            let (first, last) = vp.visible_range().unwrap();
            let anchor = vp.scroll_offset() / 35;
            assert!(
                (first..=last).contains(&anchor),
                "range [{first},{last}] misses anchor {anchor} at offset {}",
                vp.scroll_offset()
            );
        }
    }

    #[test]
    fn page_navigation_matches_floor_of_viewport() {
        // 120 rows, row height 35, viewport 400 lines: page = floor(400/35) = 11.
        let mut vp = viewport(120, 400, 35);
        assert_eq!(vp.visible_rows(), 11);
        assert_eq!(vp.focused(), 0);
        vp.focus_page_down();
        assert_eq!(vp.focused(), 11);
        vp.focus_page_down();
        assert_eq!(vp.focused(), 22);
    }

    #[test]
    fn focus_never_leaves_bounds() {
        let mut vp = viewport(37, 10, 1);
        for _ in 0..100 {
            vp.focus_down();
            assert!(vp.focused() < 37);
        }
        assert_eq!(vp.focused(), 36);
        for _ in 0..100 {
            vp.focus_page_up();
            vp.focus_up();
        }
        assert_eq!(vp.focused(), 0);
        for _ in 0..20 {
            vp.focus_page_down();
        }
        assert_eq!(vp.focused(), 36);
    }

    #[test]
    fn boundary_transitions_are_idempotent() {
        let mut vp = viewport(5, 10, 1);
        vp.focus_up();
        assert_eq!(vp.focused(), 0);
        vp.focus_end();
        assert_eq!(vp.focused(), 4);
        vp.focus_down();
        assert_eq!(vp.focused(), 4);
    }

    #[test]
    fn focus_move_scrolls_target_into_view() {
        let mut vp = viewport(200, 10, 1);
        vp.set_focus(50);
        let (first, last) = vp.visible_range().unwrap();
        assert!((first..=last).contains(&50));
        // Nearest-edge alignment: moving down pins the row to the bottom.
        assert_eq!(vp.scroll_offset(), 41);
        // Moving back up pins to the top with minimal scroll.
        vp.set_focus(20);
        assert_eq!(vp.scroll_offset(), 20);
    }

    #[test]
    fn shrinking_row_count_clamps_focus_and_scroll() {
        let mut vp = viewport(200, 10, 1);
        vp.focus_end();
        assert_eq!(vp.focused(), 199);
        vp.set_row_count(30);
        assert_eq!(vp.focused(), 29);
        assert!(vp.scroll_offset() <= 20);
        vp.set_row_count(0);
        assert_eq!(vp.focused(), 0);
        assert_eq!(vp.window(), 0..0);
    }

    #[test]
    fn degenerate_geometry_renders_nothing() {
        let vp = viewport(100, 0, 1);
        assert_eq!(vp.window(), 0..0);
        let vp = viewport(100, 40, 0);
        assert_eq!(vp.visible_rows(), 0);
        assert_eq!(vp.window(), 0..0);
    }

    #[test]
    fn wheel_scroll_moves_window_not_focus() {
        let mut vp = viewport(300, 20, 1);
        vp.set_focus(5);
        vp.scroll_by(100);
        assert_eq!(vp.focused(), 5);
        assert_eq!(vp.scroll_offset(), 100);
        vp.scroll_by(-1000);
        assert_eq!(vp.scroll_offset(), 0);
        vp.scroll_by(i64::MAX / 2);
        assert_eq!(vp.scroll_offset(), 280);
    }
}
