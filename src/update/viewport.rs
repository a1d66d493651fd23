//! Viewport gesture handlers

use crate::commands::Cmd;
use crate::messages::ViewportMsg;
use crate::model::AppModel;
use crate::viewport::ZOOM_STEP;

pub(super) fn update(model: &mut AppModel, msg: ViewportMsg) -> Cmd {
    let vp = &mut model.viewport;
    match msg {
        ViewportMsg::ZoomIn => vp.adjust_zoom(ZOOM_STEP),
        ViewportMsg::ZoomOut => vp.adjust_zoom(-ZOOM_STEP),
        ViewportMsg::ResetView => vp.reset(),
        ViewportMsg::ToggleFullscreen => vp.toggle_fullscreen(),
        ViewportMsg::ExitFullscreen => vp.exit_fullscreen(),
        ViewportMsg::PanStart(p) => vp.begin_pan(p),
        ViewportMsg::PanMove(p) => vp.pan_to(p),
        ViewportMsg::PanEnd => vp.end_pan(),
        ViewportMsg::TouchStart(points) => vp.touch_start(&points),
        ViewportMsg::TouchMove(points) => vp.touch_move(&points),
        ViewportMsg::TouchEnd(points) => vp.touch_end(&points),
    }
    Cmd::Redraw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Msg;
    use crate::update::update as dispatch;
    use crate::viewport::{Point, ZOOM_MAX};

    #[test]
    fn test_zoom_messages_clamp() {
        let mut model = AppModel::default();
        for _ in 0..50 {
            dispatch(&mut model, Msg::Viewport(ViewportMsg::ZoomIn));
        }
        assert_eq!(model.viewport.zoom(), ZOOM_MAX);
        dispatch(&mut model, Msg::Viewport(ViewportMsg::ResetView));
        assert_eq!(model.viewport.zoom(), 1.0);
    }

    #[test]
    fn test_escape_leaves_fullscreen() {
        let mut model = AppModel::default();
        dispatch(&mut model, Msg::Viewport(ViewportMsg::ToggleFullscreen));
        assert!(model.viewport.is_fullscreen());
        dispatch(&mut model, Msg::Viewport(ViewportMsg::ExitFullscreen));
        assert!(!model.viewport.is_fullscreen());
        // Escape outside fullscreen stays put
        dispatch(&mut model, Msg::Viewport(ViewportMsg::ExitFullscreen));
        assert!(!model.viewport.is_fullscreen());
    }

    #[test]
    fn test_drag_sequence() {
        let mut model = AppModel::default();
        dispatch(
            &mut model,
            Msg::Viewport(ViewportMsg::PanStart(Point::new(10.0, 10.0))),
        );
        dispatch(
            &mut model,
            Msg::Viewport(ViewportMsg::PanMove(Point::new(35.0, 10.0))),
        );
        dispatch(&mut model, Msg::Viewport(ViewportMsg::PanEnd));
        assert_eq!(model.viewport.pan(), Point::new(25.0, 0.0));
    }
}
