//! Bidirectional scroll coupling between the editor and the preview
//!
//! Maps one side's scroll ratio onto the other. A programmatic sync marks
//! which side it wrote so the echo event the UI reports back is swallowed
//! instead of bouncing the offset between the two panes.

/// Which pane a programmatic scroll was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Editor,
    Preview,
}

/// Viewport and content heights of one scrollable pane (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub viewport: f32,
    pub content: f32,
}

impl Extent {
    /// Maximum scroll offset; zero when the content fits
    fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }
}

/// Scroll sync coordinator state
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    editor_offset: f32,
    preview_offset: f32,
    editor_extent: Extent,
    preview_extent: Extent,
    /// Side we last wrote programmatically; its next reported scroll is an
    /// echo and must not trigger a counter-sync
    pending_echo: Option<Side>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editor_offset(&self) -> f32 {
        self.editor_offset
    }

    pub fn preview_offset(&self) -> f32 {
        self.preview_offset
    }

    pub fn set_editor_extent(&mut self, extent: Extent) {
        self.editor_extent = extent;
    }

    pub fn set_preview_extent(&mut self, extent: Extent) {
        self.preview_extent = extent;
    }

    /// The editor reported a scroll. Returns the preview offset to apply,
    /// or `None` when nothing should move (echo, or nothing to scroll).
    pub fn editor_scrolled(&mut self, offset: f32) -> Option<f32> {
        self.editor_offset = offset;
        if self.consume_echo(Side::Editor) {
            return None;
        }
        let target = project(offset, self.editor_extent, self.preview_extent)?;
        self.preview_offset = target;
        self.pending_echo = Some(Side::Preview);
        Some(target)
    }

    /// The preview reported a scroll. Returns the editor offset to apply.
    pub fn preview_scrolled(&mut self, offset: f32) -> Option<f32> {
        self.preview_offset = offset;
        if self.consume_echo(Side::Preview) {
            return None;
        }
        let target = project(offset, self.preview_extent, self.editor_extent)?;
        self.editor_offset = target;
        self.pending_echo = Some(Side::Editor);
        Some(target)
    }

    fn consume_echo(&mut self, side: Side) -> bool {
        if self.pending_echo == Some(side) {
            self.pending_echo = None;
            true
        } else {
            false
        }
    }
}

/// Map an offset in `from` onto the proportional offset in `to`
fn project(offset: f32, from: Extent, to: Extent) -> Option<f32> {
    let from_max = from.max_offset();
    let to_max = to.max_offset();
    if from_max <= 0.0 || to_max <= 0.0 {
        return None;
    }
    let ratio = (offset / from_max).clamp(0.0, 1.0);
    Some(ratio * to_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync() -> ScrollSync {
        let mut s = ScrollSync::new();
        s.set_editor_extent(Extent {
            viewport: 100.0,
            content: 500.0,
        });
        s.set_preview_extent(Extent {
            viewport: 100.0,
            content: 900.0,
        });
        s
    }

    #[test]
    fn test_editor_scroll_projects_proportionally() {
        let mut s = sync();
        // Editor max 400, preview max 800: halfway maps to halfway
        assert_eq!(s.editor_scrolled(200.0), Some(400.0));
        assert_eq!(s.preview_offset(), 400.0);
    }

    #[test]
    fn test_preview_scroll_projects_back() {
        let mut s = sync();
        assert_eq!(s.preview_scrolled(800.0), Some(400.0));
        assert_eq!(s.editor_offset(), 400.0);
    }

    #[test]
    fn test_echo_is_swallowed() {
        let mut s = sync();
        let preview_target = s.editor_scrolled(100.0).unwrap();
        // The UI applies the target and reports it back; no counter-sync
        assert_eq!(s.preview_scrolled(preview_target), None);
        // A genuine preview scroll after that syncs again
        assert!(s.preview_scrolled(0.0).is_some());
    }

    #[test]
    fn test_nothing_to_scroll() {
        let mut s = ScrollSync::new();
        s.set_editor_extent(Extent {
            viewport: 100.0,
            content: 50.0,
        });
        s.set_preview_extent(Extent {
            viewport: 100.0,
            content: 900.0,
        });
        assert_eq!(s.editor_scrolled(10.0), None);
        // Offset is still recorded
        assert_eq!(s.editor_offset(), 10.0);
    }

    #[test]
    fn test_offset_clamped_to_ratio_bounds() {
        let mut s = sync();
        // Overscroll reports beyond max still land at the far end
        assert_eq!(s.editor_scrolled(1_000.0), Some(800.0));
    }
}
