//! Message handlers
//!
//! `update` is the single entry point for state changes: it applies a
//! message to the model and returns the side effects to perform. Handlers
//! for the larger domains live in submodules.

pub mod render;
pub mod tree;
pub mod viewport;
pub mod workspace;

use crate::commands::Cmd;
use crate::messages::{EditMsg, Msg, ScrollMsg, UiMsg};
use crate::model::{AppModel, PreviewSurface};
use crate::scroll_sync::Extent;

/// Apply a message to the model, returning the commands to execute
pub fn update(model: &mut AppModel, msg: Msg) -> Cmd {
    match msg {
        Msg::Edit(msg) => edit(model, msg),
        Msg::Render(msg) => render::update(model, msg),
        Msg::Tree(msg) => tree::update(model, msg),
        Msg::Viewport(msg) => viewport::update(model, msg),
        Msg::Scroll(msg) => scroll(model, msg),
        Msg::Store(msg) => workspace::update(model, msg),
        Msg::Ui(msg) => ui(model, msg),
    }
}

fn edit(model: &mut AppModel, msg: EditMsg) -> Cmd {
    match msg {
        EditMsg::SetContent(text) => {
            model.content = text;
            model.reclassify();
            let generation = model.next_generation();
            tracing::trace!(generation, kind = ?model.kind(), "content changed");
            Cmd::batch(vec![
                Cmd::Debounce {
                    generation,
                    delay_ms: model.config.debounce_ms,
                },
                Cmd::Redraw,
            ])
        }
        EditMsg::Clear => {
            model.content.clear();
            model.reclassify();
            model.next_generation();
            model.preview = PreviewSurface::Empty;
            Cmd::Redraw
        }
        EditMsg::SetDetectMode(mode) => {
            model.detect_mode = mode;
            model.reclassify();
            model.next_generation();
            model.ui.toast(format!("Detect mode: {}", mode.label()));
            // Mode switches re-render immediately, no debounce
            Cmd::batch(vec![render::begin(model), Cmd::Redraw])
        }
    }
}

fn scroll(model: &mut AppModel, msg: ScrollMsg) -> Cmd {
    match msg {
        ScrollMsg::EditorScrolled(offset) => {
            if !model.config.sync_scroll {
                return Cmd::None;
            }
            match model.scroll.editor_scrolled(offset) {
                Some(_) => Cmd::Redraw,
                None => Cmd::None,
            }
        }
        ScrollMsg::PreviewScrolled(offset) => {
            if !model.config.sync_scroll {
                return Cmd::None;
            }
            match model.scroll.preview_scrolled(offset) {
                Some(_) => Cmd::Redraw,
                None => Cmd::None,
            }
        }
        ScrollMsg::EditorExtent { viewport, content } => {
            model.scroll.set_editor_extent(Extent { viewport, content });
            Cmd::None
        }
        ScrollMsg::PreviewExtent { viewport, content } => {
            model.scroll.set_preview_extent(Extent { viewport, content });
            Cmd::None
        }
    }
}

fn ui(model: &mut AppModel, msg: UiMsg) -> Cmd {
    match msg {
        UiMsg::TogglePanel => {
            model.ui.panel_open = !model.ui.panel_open;
            Cmd::Redraw
        }
        UiMsg::SelectTab(tab) => {
            model.ui.active_tab = tab;
            model.ui.panel_open = true;
            Cmd::Redraw
        }
        UiMsg::SetTransientMessage { text, duration_ms } => {
            model.ui.transient = Some(crate::model::TransientMessage { text, duration_ms });
            Cmd::Redraw
        }
        UiMsg::ClearTransientMessage => {
            model.ui.transient = None;
            Cmd::Redraw
        }
    }
}
