//! UI chrome state: side panel and transient notifications

use crate::store::ListKind;

/// Toast-style notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    pub text: String,
    /// How long the UI should keep it visible
    pub duration_ms: u64,
}

/// Default toast lifetime
pub const TOAST_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct UiState {
    /// History/favorites side panel visibility
    pub panel_open: bool,
    /// Active side panel tab
    pub active_tab: ListKind,
    pub transient: Option<TransientMessage>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            panel_open: false,
            active_tab: ListKind::History,
            transient: None,
        }
    }
}

impl UiState {
    /// Show a toast with the default lifetime
    pub fn toast(&mut self, text: impl Into<String>) {
        self.transient = Some(TransientMessage {
            text: text.into(),
            duration_ms: TOAST_DURATION_MS,
        });
    }
}
