//! Application state
//!
//! One explicit model struct, mutated only through `update` handlers so
//! invariants (zoom clamping, generation monotonicity) hold at a single
//! choke point.

pub mod preview;
pub mod ui;

pub use preview::PreviewSurface;
pub use ui::{TransientMessage, UiState};

use crate::classify::{self, Classification, ClassifyPolicy, ContentKind, DetectMode};
use crate::config::PreviewConfig;
use crate::scroll_sync::ScrollSync;
use crate::store::WorkspaceStore;
use crate::viewport::ViewportState;

/// Complete application state
#[derive(Debug)]
pub struct AppModel {
    /// Raw editor content
    pub content: String,
    /// Manual detection override
    pub detect_mode: DetectMode,
    /// Classification of the current content, recomputed on every edit
    pub classification: Classification,
    /// Render generation token; a completion applies only if its
    /// generation still matches
    pub generation: u64,
    /// What the preview pane currently shows
    pub preview: PreviewSurface,
    /// A render is in flight for the current generation
    pub rendering: bool,
    pub viewport: ViewportState,
    pub scroll: ScrollSync,
    pub store: WorkspaceStore,
    pub config: PreviewConfig,
    pub ui: UiState,
}

impl AppModel {
    /// Model with the given config and store (both usually loaded from
    /// disk; tests pass defaults)
    pub fn new(config: PreviewConfig, store: WorkspaceStore) -> Self {
        Self {
            content: String::new(),
            detect_mode: DetectMode::Auto,
            classification: classify::classify(""),
            generation: 0,
            preview: PreviewSurface::Empty,
            rendering: false,
            viewport: ViewportState::new(),
            scroll: ScrollSync::new(),
            store,
            config,
            ui: UiState::default(),
        }
    }

    pub fn classify_policy(&self) -> ClassifyPolicy {
        ClassifyPolicy {
            markdown_signal_threshold: self.config.markdown_signal_threshold,
        }
    }

    /// Re-run classification against the current content and mode
    pub fn reclassify(&mut self) {
        self.classification =
            classify::classify_for_mode(&self.content, self.detect_mode, &self.classify_policy());
    }

    /// Bump the generation token, invalidating all in-flight work
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.rendering = false;
        self.generation
    }

    pub fn kind(&self) -> ContentKind {
        self.classification.kind
    }

    /// Status-strip character count
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(PreviewConfig::default(), WorkspaceStore::in_memory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_is_empty() {
        let model = AppModel::default();
        assert_eq!(model.kind(), ContentKind::Empty);
        assert_eq!(model.generation, 0);
        assert!(matches!(model.preview, PreviewSurface::Empty));
    }

    #[test]
    fn test_reclassify_follows_mode() {
        let mut model = AppModel::default();
        model.content = "# Title".to_string();
        model.reclassify();
        assert_eq!(model.kind(), ContentKind::Markdown);

        model.detect_mode = DetectMode::Plain;
        model.reclassify();
        assert_eq!(model.kind(), ContentKind::Plain);
    }

    #[test]
    fn test_generation_is_monotonic() {
        let mut model = AppModel::default();
        let a = model.next_generation();
        let b = model.next_generation();
        assert!(b > a);
    }
}
