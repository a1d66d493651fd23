//! End-to-end pipeline tests
//!
//! Drives the runtime the way a front end would: content edits, debounce
//! flushes, detect mode overrides, and the workspace flows that hang off a
//! finished render.

use glimpse::classify::{ContentKind, DetectMode};
use glimpse::config::PreviewConfig;
use glimpse::messages::{EditMsg, Msg, StoreMsg, UiMsg};
use glimpse::model::{AppModel, PreviewSurface};
use glimpse::runtime::Runtime;
use glimpse::store::{ListKind, WorkspaceStore};

fn runtime() -> Runtime {
    Runtime::new(AppModel::default())
}

fn render(rt: &mut Runtime, content: &str) {
    rt.dispatch(Msg::set_content(content));
    rt.flush_debounce();
}

// ============================================================================
// Classification routing
// ============================================================================

#[test]
fn test_each_kind_reaches_its_surface() {
    let mut rt = runtime();

    render(&mut rt, "sequenceDiagram\nA->>B: hi");
    assert_eq!(rt.model.kind(), ContentKind::Diagram);
    assert!(matches!(rt.model.preview, PreviewSurface::Diagram { .. }));

    render(&mut rt, "# Title\n\nSome *prose*.");
    assert_eq!(rt.model.kind(), ContentKind::Markdown);
    assert!(matches!(rt.model.preview, PreviewSurface::Markdown { .. }));

    render(&mut rt, r#"{"servers": [{"host": "a"}, {"host": "b"}]}"#);
    assert_eq!(rt.model.kind(), ContentKind::Structured);
    assert!(matches!(rt.model.preview, PreviewSurface::Tree(_)));
}

#[test]
fn test_empty_input_renders_nothing() {
    let mut rt = runtime();
    render(&mut rt, "   \n\t");
    assert_eq!(rt.model.kind(), ContentKind::Empty);
    assert!(matches!(rt.model.preview, PreviewSurface::Empty));
    assert!(rt.model.store.history().is_empty());
}

#[test]
fn test_forced_plain_bypasses_detection() {
    let mut rt = runtime();
    rt.dispatch(Msg::Edit(EditMsg::SetDetectMode(DetectMode::Plain)));
    render(&mut rt, "graph TD\nA-->B");
    assert_eq!(rt.model.kind(), ContentKind::Plain);
    match &rt.model.preview {
        PreviewSurface::Plain { text } => assert!(text.contains("graph TD")),
        other => panic!("expected plain, got {:?}", other),
    }
}

#[test]
fn test_forced_json_on_invalid_input_is_an_inline_error() {
    let mut rt = runtime();
    rt.dispatch(Msg::Edit(EditMsg::SetDetectMode(DetectMode::Json)));
    render(&mut rt, "not json");
    assert!(rt.model.preview.is_error());
    assert!(rt.model.store.history().is_empty());
}

#[test]
fn test_switching_mode_rerenders_without_debounce() {
    let mut rt = runtime();
    render(&mut rt, "just ordinary prose with *one* emphasis");
    assert_eq!(rt.model.kind(), ContentKind::Markdown);

    // No flush after the mode switch: the render is immediate
    rt.dispatch(Msg::Edit(EditMsg::SetDetectMode(DetectMode::Plain)));
    assert!(rt.next_deadline().is_none());
    assert!(matches!(rt.model.preview, PreviewSurface::Plain { .. }));
}

#[test]
fn test_markdown_threshold_is_tunable() {
    let config = PreviewConfig {
        markdown_signal_threshold: 3,
        ..PreviewConfig::default()
    };
    let mut rt = Runtime::new(AppModel::new(config, WorkspaceStore::in_memory()));
    // One signal is no longer enough to classify as Markdown
    rt.dispatch(Msg::set_content("prose with *one* emphasis"));
    assert_ne!(rt.model.kind(), ContentKind::Markdown);
}

// ============================================================================
// Workspace flows
// ============================================================================

#[test]
fn test_save_favorite_rename_load_cycle() {
    let mut rt = runtime();
    render(&mut rt, "# Release notes\n\n- item");
    let hid = rt.model.store.history()[0].id;

    rt.dispatch(Msg::Store(StoreMsg::AddFavorite {
        history_id: hid,
        title: Some("Notes".into()),
    }));
    let fid = rt.model.store.favorites()[0].id;

    rt.dispatch(Msg::Store(StoreMsg::RenameTitle {
        id: fid,
        list: ListKind::Favorites,
        title: "Release notes v2".into(),
    }));
    // Title sync reaches the history twin
    assert_eq!(
        rt.model.store.history()[0].title.as_deref(),
        Some("Release notes v2")
    );

    render(&mut rt, "replacement content");
    rt.dispatch(Msg::Store(StoreMsg::LoadEntry {
        id: fid,
        list: ListKind::Favorites,
    }));
    assert!(rt.model.content.starts_with("# Release notes"));
    assert!(matches!(rt.model.preview, PreviewSurface::Markdown { .. }));
}

#[test]
fn test_save_current_shows_a_toast() {
    let mut rt = runtime();
    render(&mut rt, "> a note worth keeping");
    rt.dispatch(Msg::Ui(UiMsg::ClearTransientMessage));

    rt.dispatch(Msg::Store(StoreMsg::SaveCurrent));
    let toast = rt.model.ui.transient.as_ref().expect("toast after save");
    assert!(!toast.text.is_empty());
}

#[test]
fn test_rerendering_same_content_keeps_one_history_entry() {
    let mut rt = runtime();
    render(&mut rt, "# stable content");
    render(&mut rt, "# other");
    render(&mut rt, "# stable content");
    let dupes = rt
        .model
        .store
        .history()
        .iter()
        .filter(|e| e.content == "# stable content")
        .count();
    assert_eq!(dupes, 1);
    assert_eq!(rt.model.store.history()[0].content, "# stable content");
}
