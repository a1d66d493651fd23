//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an
//! update: debounce timers, calls into the external renderer collaborators,
//! and scheduled tree-materialization batches. The runtime executes them
//! and feeds resulting messages back into `update`.

use crate::classify::ContentKind;
use crate::tree::NodeId;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the UI
    Redraw,
    /// (Re)start the render debounce timer
    ///
    /// After `delay_ms` of no further edits, the runtime sends
    /// `RenderMsg::DebounceFired` with this generation. A newer `Debounce`
    /// replaces a pending one; the generation check drops late fires anyway.
    Debounce { generation: u64, delay_ms: u64 },
    /// Invoke the external renderer for this text
    ///
    /// Completion arrives as `RenderMsg::Completed` carrying the same
    /// generation, which is the staleness check.
    RunRender {
        generation: u64,
        kind: ContentKind,
        text: String,
    },
    /// Queue the next materialization batch for a tree node
    ///
    /// Queued as an immediate continuation so a large expansion yields
    /// control between batches instead of freezing the interface.
    ScheduleTreeBatch(NodeId),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Timers and renders trigger redraws via their completion messages
            Cmd::Debounce { .. } => false,
            Cmd::RunRender { .. } => false,
            Cmd::ScheduleTreeBatch(_) => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
