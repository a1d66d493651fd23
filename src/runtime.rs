//! Command execution harness
//!
//! The update layer is pure message-in, commands-out; this runtime owns
//! the side effects: the debounce timer, calls into the renderer
//! collaborators, and the queued continuations that keep batched tree
//! materialization cooperative. The front end feeds messages in via
//! [`Runtime::dispatch`] and calls [`Runtime::tick`] from its event loop.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::classify::ContentKind;
use crate::commands::Cmd;
use crate::messages::{Msg, RenderMsg, TreeMsg};
use crate::model::AppModel;
use crate::render::{DiagramRenderer, MarkdownRenderer, SourceBlockRenderer};
use crate::update::update;

/// The armed debounce timer; a newer one replaces it
#[derive(Debug, Clone, Copy)]
struct PendingDebounce {
    generation: u64,
    deadline: Instant,
}

pub struct Runtime {
    pub model: AppModel,
    markdown: MarkdownRenderer,
    diagrams: Box<dyn DiagramRenderer>,
    pending_debounce: Option<PendingDebounce>,
    /// Immediate continuations (render completions, tree batches)
    queue: VecDeque<Msg>,
}

impl Runtime {
    /// Runtime with the built-in placeholder diagram renderer
    pub fn new(model: AppModel) -> Self {
        Self::with_diagram_renderer(model, Box::new(SourceBlockRenderer))
    }

    /// Runtime with an external diagram engine plugged in
    pub fn with_diagram_renderer(model: AppModel, diagrams: Box<dyn DiagramRenderer>) -> Self {
        Self {
            model,
            markdown: MarkdownRenderer::new(),
            diagrams,
            pending_debounce: None,
            queue: VecDeque::new(),
        }
    }

    /// Apply a message and run all resulting work to quiescence.
    /// Returns whether the UI should redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let cmd = update(&mut self.model, msg);
        let mut redraw = cmd.needs_redraw();
        self.execute(cmd);
        while let Some(next) = self.queue.pop_front() {
            let cmd = update(&mut self.model, next);
            redraw |= cmd.needs_redraw();
            self.execute(cmd);
        }
        redraw
    }

    /// Fire the debounce timer if its quiet period has elapsed.
    /// Call this from the event loop; returns whether anything ran.
    pub fn tick(&mut self) -> bool {
        match self.pending_debounce {
            Some(pending) if Instant::now() >= pending.deadline => {
                self.pending_debounce = None;
                self.dispatch(Msg::debounce_fired(pending.generation))
            }
            _ => false,
        }
    }

    /// Fire a pending debounce immediately, skipping the quiet period.
    /// Used by one-shot rendering and tests.
    pub fn flush_debounce(&mut self) -> bool {
        match self.pending_debounce.take() {
            Some(pending) => self.dispatch(Msg::debounce_fired(pending.generation)),
            None => false,
        }
    }

    /// When the armed debounce timer will fire
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_debounce.map(|p| p.deadline)
    }

    fn execute(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::Debounce {
                generation,
                delay_ms,
            } => {
                self.pending_debounce = Some(PendingDebounce {
                    generation,
                    deadline: Instant::now() + Duration::from_millis(delay_ms),
                });
            }
            Cmd::RunRender {
                generation,
                kind,
                text,
            } => {
                let result = match kind {
                    ContentKind::Diagram => self.diagrams.render(&text),
                    ContentKind::Markdown => Ok(self.markdown.render(&text, self.diagrams.as_ref())),
                    // Other kinds complete inside the update layer
                    _ => Ok(text),
                };
                self.queue.push_back(Msg::Render(RenderMsg::Completed {
                    generation,
                    kind,
                    result,
                }));
            }
            Cmd::ScheduleTreeBatch(id) => {
                self.queue.push_back(Msg::Tree(TreeMsg::MaterializeBatch(id)));
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PreviewSurface;

    #[test]
    fn test_edit_then_flush_renders() {
        let mut rt = Runtime::new(AppModel::default());
        rt.dispatch(Msg::set_content("graph TD\nA-->B"));
        assert!(rt.next_deadline().is_some());
        assert!(matches!(rt.model.preview, PreviewSurface::Empty));

        rt.flush_debounce();
        assert!(matches!(rt.model.preview, PreviewSurface::Diagram { .. }));
        assert_eq!(rt.model.store.history().len(), 1);
    }

    #[test]
    fn test_rapid_edits_render_only_the_last() {
        let mut rt = Runtime::new(AppModel::default());
        rt.dispatch(Msg::set_content("graph TD\nA-->B"));
        rt.dispatch(Msg::set_content("graph TD\nA-->C"));
        rt.dispatch(Msg::set_content("graph TD\nA-->D"));
        rt.flush_debounce();

        match &rt.model.preview {
            PreviewSurface::Diagram { markup } => assert!(markup.contains("A--&gt;D")),
            other => panic!("expected diagram, got {:?}", other),
        }
        // Only the final content reached history
        assert_eq!(rt.model.store.history().len(), 1);
    }

    #[test]
    fn test_markdown_renders_with_embedded_diagram() {
        let mut rt = Runtime::new(AppModel::default());
        rt.dispatch(Msg::set_content(
            "# Doc\n\n```mermaid\ngraph TD\nA-->B\n```",
        ));
        rt.flush_debounce();
        match &rt.model.preview {
            PreviewSurface::Markdown { html } => {
                assert!(html.contains("<h1>"));
                assert!(html.contains("embedded-diagram"));
            }
            other => panic!("expected markdown, got {:?}", other),
        }
    }

    #[test]
    fn test_tree_expansion_runs_to_completion() {
        let mut rt = Runtime::new(AppModel::default());
        let json = serde_json::to_string(&(0..500).collect::<Vec<_>>()).unwrap();
        rt.dispatch(Msg::set_content(json));
        rt.flush_debounce();

        let root = match &rt.model.preview {
            PreviewSurface::Tree(t) => t.root(),
            other => panic!("expected tree, got {:?}", other),
        };
        rt.dispatch(Msg::Tree(TreeMsg::ToggleNode(root)));

        match &rt.model.preview {
            PreviewSurface::Tree(t) => {
                assert_eq!(t.node(root).unwrap().built_children(), 500);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_diagram_error_is_inline() {
        let mut rt = Runtime::new(AppModel::default());
        // Falls back to diagram classification but has no valid header
        rt.dispatch(Msg::set_content("definitely not a diagram"));
        rt.flush_debounce();
        assert!(rt.model.preview.is_error());
        assert!(rt.model.store.history().is_empty());
    }
}
