//! Workspace store handlers
//!
//! Every store mutation already persists write-through; these handlers add
//! the user feedback (toasts) and the load-back-into-editor path.

use crate::classify::ContentKind;
use crate::commands::Cmd;
use crate::messages::StoreMsg;
use crate::model::AppModel;
use crate::store::{ListKind, SaveOutcome};
use crate::update::render;

pub(super) fn update(model: &mut AppModel, msg: StoreMsg) -> Cmd {
    match msg {
        StoreMsg::SaveCurrent => {
            let kind = model.kind();
            if kind == ContentKind::Empty {
                model.ui.toast("Nothing to save");
                return Cmd::Redraw;
            }
            match model.store.save_to_history(&model.content, kind) {
                SaveOutcome::Added => model.ui.toast("Saved to history"),
                SaveOutcome::Refreshed => model.ui.toast("Already in history, moved to top"),
                SaveOutcome::Skipped => model.ui.toast("Nothing to save"),
            }
            Cmd::Redraw
        }
        StoreMsg::AddFavorite { history_id, title } => {
            match model.store.add_favorite(history_id, title) {
                Ok(_) => model.ui.toast("Added to favorites"),
                Err(e) => model.ui.toast(e),
            }
            Cmd::Redraw
        }
        StoreMsg::RenameTitle { id, list, title } => {
            let title = title.trim();
            if title.is_empty() {
                model.ui.toast("Title cannot be empty");
                return Cmd::Redraw;
            }
            match model.store.rename(id, list, title) {
                Ok(()) => model.ui.toast("Renamed"),
                Err(e) => model.ui.toast(e),
            }
            Cmd::Redraw
        }
        StoreMsg::DeleteHistory(id) => {
            model.store.delete(id, ListKind::History);
            model.ui.toast("Entry deleted");
            Cmd::Redraw
        }
        StoreMsg::DeleteFavorite(id) => {
            model.store.delete(id, ListKind::Favorites);
            model.ui.toast("Favorite removed");
            Cmd::Redraw
        }
        StoreMsg::ClearList(list) => {
            model.store.clear(list);
            model.ui.toast(format!("{} cleared", list.label()));
            Cmd::Redraw
        }
        StoreMsg::LoadEntry { id, list } => {
            let Some(entry) = model.store.entry(id, list) else {
                model.ui.toast("Entry not found");
                return Cmd::Redraw;
            };
            model.content = entry.content.clone();
            model.reclassify();
            model.next_generation();
            model.ui.toast("Loaded into editor");
            // Loaded content renders immediately, no debounce wait
            Cmd::batch(vec![render::begin(model), Cmd::Redraw])
        }
    }
}
