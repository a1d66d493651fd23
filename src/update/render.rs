//! Render pipeline handlers
//!
//! Debounce fires and async completions both carry a generation token;
//! anything that does not match the model's current generation is dropped
//! without touching the preview.

use crate::classify::ContentKind;
use crate::commands::Cmd;
use crate::messages::RenderMsg;
use crate::model::{AppModel, PreviewSurface};
use crate::tree::TreeView;

pub(super) fn update(model: &mut AppModel, msg: RenderMsg) -> Cmd {
    match msg {
        RenderMsg::DebounceFired { generation } => {
            if generation != model.generation {
                tracing::trace!(
                    fired = generation,
                    current = model.generation,
                    "stale debounce fire"
                );
                return Cmd::None;
            }
            begin(model)
        }
        RenderMsg::Completed {
            generation,
            kind,
            result,
        } => {
            if generation != model.generation {
                tracing::debug!(
                    completed = generation,
                    current = model.generation,
                    "dropping stale render result"
                );
                return Cmd::None;
            }
            model.rendering = false;
            match result {
                Ok(markup) => {
                    model.preview = match kind {
                        ContentKind::Diagram => PreviewSurface::Diagram { markup },
                        ContentKind::Markdown => PreviewSurface::Markdown { html: markup },
                        _ => PreviewSurface::Plain { text: markup },
                    };
                    model.store.save_to_history(&model.content, kind);
                }
                Err(message) => {
                    // Inline error; history untouched
                    model.preview = PreviewSurface::Error { message };
                }
            }
            Cmd::Redraw
        }
    }
}

/// Start rendering the current content. Structured and plain content
/// complete synchronously; diagram and Markdown go through the external
/// renderer seam.
pub(crate) fn begin(model: &mut AppModel) -> Cmd {
    let kind = model.kind();
    match kind {
        ContentKind::Empty => {
            model.preview = PreviewSurface::Empty;
            Cmd::Redraw
        }
        ContentKind::Plain => {
            model.preview = PreviewSurface::Plain {
                text: model.content.clone(),
            };
            model.store.save_to_history(&model.content, kind);
            Cmd::Redraw
        }
        ContentKind::Structured => {
            let parsed = {
                let slice = model
                    .classification
                    .structured_slice(&model.content)
                    .unwrap_or(model.content.trim());
                serde_json::from_str::<serde_json::Value>(slice)
            };
            match parsed {
                Ok(value) => {
                    model.preview = PreviewSurface::Tree(TreeView::build(&value));
                    model.store.save_to_history(&model.content, kind);
                }
                Err(e) => {
                    model.preview = PreviewSurface::Error {
                        message: format!("Invalid JSON: {}", e),
                    };
                }
            }
            Cmd::Redraw
        }
        ContentKind::Diagram | ContentKind::Markdown => {
            model.rendering = true;
            Cmd::RunRender {
                generation: model.generation,
                kind,
                text: model.content.clone(),
            }
        }
    }
}
