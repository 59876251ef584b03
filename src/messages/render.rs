//! Render state - data structure sent from App layer to UI for rendering

use crate::forms::{ActionKind, QuickForms};
use crate::models::{HistoryEntry, RequestState, ResponseRecord};
use crate::messages::ui_events::{InputMode, Panel, RequestField};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request draft
    pub request: RequestState,
    pub full_url: String,

    // Quick actions
    pub forms: QuickForms,
    pub selected_action: ActionKind,
    pub selected_form_field: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub request_field: RequestField,
    pub cursor_position: usize,
    pub selected_preset: usize,

    // Response
    pub response: ResponseRecord,
    pub response_scroll: u16,
    pub last_duration_ms: Option<u64>,
    pub is_loading: bool,

    // History, newest first
    pub history: Vec<HistoryEntry>,
    pub history_scroll: u16,

    // Transient error
    pub notification: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        crate::app::AppState::new().to_render_state()
    }
}
