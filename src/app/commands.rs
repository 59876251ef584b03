//! Command handlers - business logic for processing UI events

use crate::app::state::{DispatchError, RequestPhase};
use crate::app::AppState;
use crate::forms::{ActionKind, FormError};
use crate::messages::ui_events::{InputMode, Panel, RequestField};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HistoryEntry, ResponseRecord};
use crate::presets::{self, PRESET_ENDPOINTS};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn next_item(&mut self) {
        match self.active_panel {
            Panel::Actions => {
                let count = self.selected_action.fields().len();
                if count > 0 {
                    self.selected_form_field = (self.selected_form_field + 1) % count;
                }
            }
            Panel::Request => {
                let pos = RequestField::ALL
                    .iter()
                    .position(|f| *f == self.request_field)
                    .unwrap_or(0);
                self.request_field = RequestField::ALL[(pos + 1) % RequestField::ALL.len()];
            }
            Panel::Presets => {
                self.selected_preset = (self.selected_preset + 1) % PRESET_ENDPOINTS.len();
            }
            Panel::Response => self.response_scroll = self.response_scroll.saturating_add(1),
            Panel::History => self.history_scroll = self.history_scroll.saturating_add(1),
        }
    }

    pub fn prev_item(&mut self) {
        match self.active_panel {
            Panel::Actions => {
                let count = self.selected_action.fields().len();
                if count > 0 {
                    self.selected_form_field = self
                        .selected_form_field
                        .checked_sub(1)
                        .unwrap_or(count - 1);
                }
            }
            Panel::Request => {
                let len = RequestField::ALL.len();
                let pos = RequestField::ALL
                    .iter()
                    .position(|f| *f == self.request_field)
                    .unwrap_or(0);
                self.request_field = RequestField::ALL[(pos + len - 1) % len];
            }
            Panel::Presets => {
                self.selected_preset = self
                    .selected_preset
                    .checked_sub(1)
                    .unwrap_or(PRESET_ENDPOINTS.len() - 1);
            }
            Panel::Response => self.response_scroll = self.response_scroll.saturating_sub(1),
            Panel::History => self.history_scroll = self.history_scroll.saturating_sub(1),
        }
    }

    // ========================
    // Input editing
    // ========================

    /// Start editing the focused text field; choice fields cycle instead.
    pub fn start_editing(&mut self) {
        if self.active_panel == Panel::Actions {
            match self.current_form_field() {
                Some(field) if field.is_choice() => {
                    self.forms.cycle_choice(field);
                    return;
                }
                Some(_) => {}
                None => return,
            }
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        self.request.method = self.request.method.next();
    }

    // ========================
    // Presets
    // ========================

    pub fn apply_preset(&mut self) {
        if let Some(preset) = presets::preset(self.selected_preset) {
            preset.apply(&mut self.request);
        }
    }

    // ========================
    // Quick actions
    // ========================

    pub fn next_action(&mut self) {
        self.selected_action = self.selected_action.next();
        self.selected_form_field = 0;
    }

    pub fn prev_action(&mut self) {
        self.selected_action = self.selected_action.prev();
        self.selected_form_field = 0;
    }

    /// Compile an action's form into the request draft
    pub fn compile_action(&mut self, kind: ActionKind) -> Result<(), FormError> {
        let compiled = self.forms.action(kind).compile()?;
        compiled.apply(&mut self.request);
        Ok(())
    }

    /// Compile the selected action, reporting form errors transiently
    pub fn generate_action(&mut self) {
        if let Err(e) = self.compile_action(self.selected_action) {
            self.notify(e.to_string());
        }
    }

    /// Compile the selected action and dispatch it
    pub fn run_action(&mut self) -> Option<NetworkCommand> {
        if let Some(id) = self.pending_id() {
            self.notify(DispatchError::Busy(id).to_string());
            return None;
        }
        match self.compile_action(self.selected_action) {
            Ok(()) => self.prepare_request(),
            Err(e) => {
                self.notify(e.to_string());
                None
            }
        }
    }

    // ========================
    // Request sending
    // ========================

    fn pending_id(&self) -> Option<u64> {
        match self.phase {
            RequestPhase::InFlight { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Move to in-flight and snapshot the draft for execution.
    pub fn begin_dispatch(&mut self) -> Result<NetworkCommand, DispatchError> {
        if let Some(id) = self.pending_id() {
            return Err(DispatchError::Busy(id));
        }

        let id = self.next_id();
        self.phase = RequestPhase::InFlight {
            id,
            method: self.request.method,
            url: self.request.full_url(),
        };
        self.response = ResponseRecord::default();
        self.response_scroll = 0;
        self.last_duration_ms = None;

        Ok(NetworkCommand::ExecuteRequest {
            id,
            request: self.request.clone(),
        })
    }

    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        match self.begin_dispatch() {
            Ok(cmd) => Some(cmd),
            Err(e) => {
                self.notify(e.to_string());
                None
            }
        }
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let RequestPhase::InFlight { id, method, url } = &self.phase else {
            return;
        };
        // Stale responses are ignored
        if *id != response.id() {
            return;
        }
        let (method, url) = (*method, url.clone());

        match response {
            NetworkResponse::Success { record, time_ms, .. } => {
                self.history.record(HistoryEntry {
                    timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
                    method,
                    url,
                    status: record.status.clone(),
                });
                self.response = record;
                self.last_duration_ms = Some(time_ms);
                self.phase = RequestPhase::Completed;
            }
            NetworkResponse::Error { message, time_ms, .. } => {
                self.response = ResponseRecord::transport_failure(message.clone());
                self.last_duration_ms = Some(time_ms);
                self.phase = RequestPhase::Failed;
                self.notify(format!("Request failed: {}", message));
            }
        }
    }

    // ========================
    // History
    // ========================

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_scroll = 0;
    }

    // ========================
    // Notifications & help
    // ========================

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, RequestState};

    fn completed(id: u64, status: &str, ok: bool) -> NetworkResponse {
        NetworkResponse::Success {
            id,
            record: ResponseRecord {
                ok,
                status: status.to_string(),
                headers: vec![("x-a".to_string(), "1".to_string())],
                body: "{}".to_string(),
                error: None,
            },
            time_ms: 12,
        }
    }

    fn dispatched_id(state: &mut AppState) -> u64 {
        match state.prepare_request() {
            Some(NetworkCommand::ExecuteRequest { id, .. }) => id,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_completed_exchange_recorded_at_front() {
        let mut state = AppState::new();

        let id = dispatched_id(&mut state);
        state.handle_response(completed(id, "200 OK", true));

        state.request.path = "/missing".to_string();
        let id = dispatched_id(&mut state);
        state.handle_response(completed(id, "404 Not Found", false));

        assert_eq!(state.history.len(), 2);
        let newest = state.history.get(0).unwrap();
        assert_eq!(newest.status, "404 Not Found");
        assert_eq!(newest.url, "http://127.0.0.1:35182/missing");
        assert!(!state.response.ok);
        assert_eq!(state.phase, RequestPhase::Completed);
        assert_eq!(state.last_duration_ms, Some(12));
    }

    #[test]
    fn test_transport_failure_not_recorded() {
        let mut state = AppState::new();
        let id = dispatched_id(&mut state);
        state.handle_response(NetworkResponse::Error {
            id,
            message: "Connection failed: refused".to_string(),
            time_ms: 3,
        });

        assert!(state.history.is_empty());
        assert_eq!(state.phase, RequestPhase::Failed);
        assert_eq!(state.response.error.as_deref(), Some("Connection failed: refused"));
        assert!(state.response.status.is_empty());
        assert!(state.response.headers.is_empty());
        assert!(state.notification.is_some());
        assert_eq!(state.last_duration_ms, Some(3));
    }

    #[test]
    fn test_dispatch_rejected_while_in_flight() {
        let mut state = AppState::new();
        let id = dispatched_id(&mut state);
        assert!(state.is_loading());
        assert_eq!(state.begin_dispatch().unwrap_err(), DispatchError::Busy(id));
        assert!(state.run_action().is_none());

        state.handle_response(completed(id, "200 OK", true));
        assert!(!state.is_loading());
        assert!(state.prepare_request().is_some());
    }

    #[test]
    fn test_dispatch_resets_previous_attempt() {
        let mut state = AppState::new();
        let id = dispatched_id(&mut state);
        state.handle_response(completed(id, "200 OK", true));
        assert!(state.last_duration_ms.is_some());

        dispatched_id(&mut state);
        assert_eq!(state.response, ResponseRecord::default());
        assert_eq!(state.last_duration_ms, None);
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = AppState::new();
        let id = dispatched_id(&mut state);
        state.handle_response(completed(id + 100, "200 OK", true));
        assert!(state.is_loading());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_history_uses_dispatch_snapshot() {
        let mut state = AppState::new();
        let id = dispatched_id(&mut state);
        state.request.path = "/edited-while-waiting".to_string();
        state.request.method = HttpMethod::DELETE;
        state.handle_response(completed(id, "200 OK", true));

        let entry = state.history.get(0).unwrap();
        assert_eq!(entry.url, "http://127.0.0.1:35182/status");
        assert_eq!(entry.method, HttpMethod::GET);
    }

    #[test]
    fn test_run_action_compiles_then_dispatches() {
        let mut state = AppState::new();
        state.selected_action = ActionKind::ClipboardPut;
        state.forms.clipboard_content = "hello".to_string();

        match state.run_action() {
            Some(NetworkCommand::ExecuteRequest { request, .. }) => {
                assert_eq!(request.method, HttpMethod::PUT);
                assert_eq!(request.path, "/clipboard");
                assert_eq!(request.body, r#"{"content":"hello"}"#);
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_form_error_leaves_draft_untouched() {
        let mut state = AppState::new();
        state.selected_action = ActionKind::Search;
        state.forms.search_max = "5000".to_string();
        let before = state.request.clone();

        assert!(state.run_action().is_none());
        assert_eq!(state.request, before);
        assert!(!state.is_loading());
        assert!(state.notification.as_deref().unwrap_or("").contains("max"));
    }

    #[test]
    fn test_preset_keeps_body_and_token() {
        let mut state = AppState::with_request(RequestState {
            auth_token: "tok".to_string(),
            body: "payload".to_string(),
            ..RequestState::default()
        });
        state.selected_preset = PRESET_ENDPOINTS.len() - 1;
        state.apply_preset();

        assert_eq!(state.request.method, HttpMethod::POST);
        assert_eq!(state.request.path, "/exit");
        assert_eq!(state.request.auth_token, "tok");
        assert_eq!(state.request.body, "payload");
    }

    #[test]
    fn test_clear_history() {
        let mut state = AppState::new();
        for _ in 0..3 {
            let id = dispatched_id(&mut state);
            state.handle_response(completed(id, "200 OK", true));
        }
        assert_eq!(state.history.len(), 3);
        state.clear_history();
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_editing_form_fields() {
        let mut state = AppState::new();
        state.active_panel = Panel::Actions;
        state.selected_action = ActionKind::Search;
        state.next_item();
        state.start_editing();
        for c in "needle".chars() {
            state.enter_char(c);
        }
        state.delete_char();
        state.stop_editing();
        assert_eq!(state.forms.search_query, "needl");

        // case is a choice field and toggles instead of editing
        state.next_item();
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.forms.search_case.as_str(), "sensitive");
    }

    #[test]
    fn test_editing_request_fields() {
        let mut state = AppState::new();
        state.active_panel = Panel::Request;
        state.request_field = RequestField::AuthToken;
        state.start_editing();
        state.enter_char('k');
        state.enter_char('é');
        state.move_cursor_left();
        state.enter_char('x');
        assert_eq!(state.request.auth_token, "kxé");
    }
}
