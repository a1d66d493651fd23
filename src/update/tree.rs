//! Lazy tree handlers
//!
//! Expanding a deferred node schedules materialization batches as queued
//! continuations so the UI stays responsive between batches.

use crate::commands::Cmd;
use crate::messages::TreeMsg;
use crate::model::AppModel;
use crate::tree::{BatchOutcome, ToggleOutcome};

pub(super) fn update(model: &mut AppModel, msg: TreeMsg) -> Cmd {
    let Some(tree) = model.preview.tree_mut() else {
        // Tree messages can outlive the tree they were aimed at
        return Cmd::None;
    };
    match msg {
        TreeMsg::ToggleNode(id) => match tree.toggle(id) {
            ToggleOutcome::StartMaterialize | ToggleOutcome::ResumeMaterialize => {
                Cmd::batch(vec![Cmd::ScheduleTreeBatch(id), Cmd::Redraw])
            }
            ToggleOutcome::VisibilityOnly => Cmd::Redraw,
            ToggleOutcome::Noop => Cmd::None,
        },
        TreeMsg::MaterializeBatch(id) => match tree.materialize_batch(id) {
            BatchOutcome::More => Cmd::batch(vec![Cmd::ScheduleTreeBatch(id), Cmd::Redraw]),
            BatchOutcome::Done => Cmd::Redraw,
            BatchOutcome::Stopped => Cmd::None,
        },
    }
}
