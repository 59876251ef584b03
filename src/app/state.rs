//! App state - pure data structure with no I/O logic

use thiserror::Error;

use crate::forms::{ActionKind, FormField, QuickForms};
use crate::history::HistoryLog;
use crate::messages::ui_events::{InputMode, Panel, RequestField};
use crate::messages::RenderState;
use crate::models::{HttpMethod, RequestState, ResponseRecord};

/// Lifecycle of the single outstanding request
#[derive(Clone, Debug, PartialEq)]
pub enum RequestPhase {
    Idle,
    /// Dispatched; method and URL are the snapshot that was sent
    InFlight {
        id: u64,
        method: HttpMethod,
        url: String,
    },
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("request {0} is still in flight")]
    Busy(u64),
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request draft
    pub request: RequestState,

    // Quick-action forms
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
    pub phase: RequestPhase,
    pub next_request_id: u64,

    // History
    pub history: HistoryLog,
    pub history_scroll: u16,

    // Transient error, cleared by the next key press
    pub notification: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_request(RequestState::default())
    }

    pub fn with_request(request: RequestState) -> Self {
        AppState {
            request,
            forms: QuickForms::default(),
            selected_action: ActionKind::Disks,
            selected_form_field: 0,
            active_panel: Panel::Actions,
            input_mode: InputMode::Normal,
            request_field: RequestField::Path,
            cursor_position: 0,
            selected_preset: 0,
            response: ResponseRecord::default(),
            response_scroll: 0,
            last_duration_ms: None,
            phase: RequestPhase::Idle,
            next_request_id: 1,
            history: HistoryLog::new(),
            history_scroll: 0,
            notification: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, RequestPhase::InFlight { .. })
    }

    /// Form field under the cursor in the actions panel
    pub fn current_form_field(&self) -> Option<FormField> {
        self.selected_action
            .fields()
            .get(self.selected_form_field)
            .copied()
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Request => match self.request_field {
                RequestField::BaseUrl => &self.request.base_url,
                RequestField::AuthToken => &self.request.auth_token,
                RequestField::Path => &self.request.path,
                RequestField::Body => &self.request.body,
            },
            Panel::Actions => self
                .current_form_field()
                .and_then(|field| self.forms.text(field))
                .unwrap_or(""),
            _ => "",
        }
    }

    /// Get mutable reference to current input field, if it takes text
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Request => Some(match self.request_field {
                RequestField::BaseUrl => &mut self.request.base_url,
                RequestField::AuthToken => &mut self.request.auth_token,
                RequestField::Path => &mut self.request.path,
                RequestField::Body => &mut self.request.body,
            }),
            Panel::Actions => {
                let field = self.current_form_field()?;
                self.forms.text_mut(field)
            }
            _ => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            request: self.request.clone(),
            full_url: self.request.full_url(),
            forms: self.forms.clone(),
            selected_action: self.selected_action,
            selected_form_field: self.selected_form_field,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            request_field: self.request_field,
            cursor_position: self.cursor_position,
            selected_preset: self.selected_preset,
            response: self.response.clone(),
            response_scroll: self.response_scroll,
            last_duration_ms: self.last_duration_ms,
            is_loading: self.is_loading(),
            history: self.history.iter().cloned().collect(),
            history_scroll: self.history_scroll,
            notification: self.notification.clone(),
            show_help: self.show_help,
        }
    }
}
