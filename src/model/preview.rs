//! Preview pane contents

use crate::tree::TreeView;

/// What the preview pane shows. Replaced wholesale by render completions;
/// the previous surface stays visible while a newer render is in flight.
#[derive(Debug, Clone, Default)]
pub enum PreviewSurface {
    /// Nothing rendered yet
    #[default]
    Empty,
    /// Diagram markup from the external layout engine
    Diagram { markup: String },
    /// Rendered Markdown HTML
    Markdown { html: String },
    /// Navigable tree over parsed JSON
    Tree(TreeView),
    /// Plain text shown as-is
    Plain { text: String },
    /// Non-fatal inline render error
    Error { message: String },
}

impl PreviewSurface {
    pub fn is_error(&self) -> bool {
        matches!(self, PreviewSurface::Error { .. })
    }

    /// The tree, when that is what is showing
    pub fn tree_mut(&mut self) -> Option<&mut TreeView> {
        match self {
            PreviewSurface::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}
