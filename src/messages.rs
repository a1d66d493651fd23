//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Each message is a
//! named action with a single handler in `update`, independent of whatever
//! UI layer produces it.

use crate::classify::{ContentKind, DetectMode};
use crate::store::ListKind;
use crate::tree::NodeId;
use crate::viewport::Point;

/// Editing-surface messages (content changes, detect mode)
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// The full editor content changed (typing, paste, file load)
    SetContent(String),
    /// Clear the editor content
    Clear,
    /// Switch the manual detection override
    SetDetectMode(DetectMode),
}

/// Render pipeline messages (debounce firing, async completions)
#[derive(Debug, Clone)]
pub enum RenderMsg {
    /// The debounce quiet period elapsed for this generation
    DebounceFired { generation: u64 },
    /// An external renderer finished (async result)
    Completed {
        generation: u64,
        kind: ContentKind,
        result: Result<String, String>,
    },
}

/// Lazy tree messages (fold/unfold, batched materialization)
#[derive(Debug, Clone)]
pub enum TreeMsg {
    /// Toggle fold state of a node; first expansion of a deferred node
    /// kicks off batched materialization
    ToggleNode(NodeId),
    /// Materialize the next batch of children for a node
    MaterializeBatch(NodeId),
}

/// Viewport messages (zoom, pan, pinch, fullscreen)
#[derive(Debug, Clone)]
pub enum ViewportMsg {
    /// Zoom in by one step
    ZoomIn,
    /// Zoom out by one step
    ZoomOut,
    /// Reset zoom and pan to identity
    ResetView,
    /// Toggle fullscreen preview
    ToggleFullscreen,
    /// Leave fullscreen (the Escape path); no-op outside fullscreen
    ExitFullscreen,
    /// Pointer pressed on the preview surface (pan start)
    PanStart(Point),
    /// Pointer moved while pressed
    PanMove(Point),
    /// Pointer released
    PanEnd,
    /// Touch points went down
    TouchStart(Vec<Point>),
    /// Touch points moved
    TouchMove(Vec<Point>),
    /// Touch points lifted; carries the points still down
    TouchEnd(Vec<Point>),
}

/// Scroll coupling between the editing surface and the preview
#[derive(Debug, Clone)]
pub enum ScrollMsg {
    /// The editor scrolled to this offset (pixels)
    EditorScrolled(f32),
    /// The preview scrolled to this offset (pixels)
    PreviewScrolled(f32),
    /// Editor viewport/content heights changed
    EditorExtent { viewport: f32, content: f32 },
    /// Preview viewport/content heights changed
    PreviewExtent { viewport: f32, content: f32 },
}

/// Workspace store messages (history + favorites)
#[derive(Debug, Clone)]
pub enum StoreMsg {
    /// Force-save the current content to history, bypassing the debounce
    SaveCurrent,
    /// Promote a history entry to favorites
    AddFavorite {
        history_id: u64,
        title: Option<String>,
    },
    /// Rename an entry; propagates to the content-matching entry in the
    /// other list
    RenameTitle {
        id: u64,
        list: ListKind,
        title: String,
    },
    /// Delete a single history entry
    DeleteHistory(u64),
    /// Delete a single favorite
    DeleteFavorite(u64),
    /// Clear one whole list
    ClearList(ListKind),
    /// Load an entry's content back into the editor
    LoadEntry { id: u64, list: ListKind },
}

/// UI chrome messages (side panel, toasts)
#[derive(Debug, Clone)]
pub enum UiMsg {
    /// Open or close the history/favorites side panel
    TogglePanel,
    /// Switch the active side panel tab
    SelectTab(ListKind),
    /// Show a transient toast-style message
    SetTransientMessage { text: String, duration_ms: u64 },
    /// Dismiss the transient message
    ClearTransientMessage,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Editing surface
    Edit(EditMsg),
    /// Render pipeline
    Render(RenderMsg),
    /// Lazy tree
    Tree(TreeMsg),
    /// Viewport transform
    Viewport(ViewportMsg),
    /// Scroll sync
    Scroll(ScrollMsg),
    /// Workspace store
    Store(StoreMsg),
    /// UI chrome
    Ui(UiMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Create a content change message
    pub fn set_content(text: impl Into<String>) -> Self {
        Msg::Edit(EditMsg::SetContent(text.into()))
    }

    /// Create a debounce-fired message
    pub fn debounce_fired(generation: u64) -> Self {
        Msg::Render(RenderMsg::DebounceFired { generation })
    }
}
