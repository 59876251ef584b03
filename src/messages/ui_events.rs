//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    NextItem,
    PrevItem,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    CycleMethod,
    SendRequest,

    // Quick actions
    NextAction,
    PrevAction,
    GenerateAction,
    RunAction,

    // Presets
    ApplyPreset,

    // History
    ClearHistory,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Actions,
    Request,
    Presets,
    Response,
    History,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Actions => Panel::Request,
            Panel::Request => Panel::Presets,
            Panel::Presets => Panel::Response,
            Panel::Response => Panel::History,
            Panel::History => Panel::Actions,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Actions => Panel::History,
            Panel::Request => Panel::Actions,
            Panel::Presets => Panel::Request,
            Panel::Response => Panel::Presets,
            Panel::History => Panel::Response,
        }
    }
}

/// Editable fields of the request panel
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RequestField {
    BaseUrl,
    AuthToken,
    Path,
    Body,
}

impl RequestField {
    pub const ALL: [RequestField; 4] = [
        RequestField::BaseUrl,
        RequestField::AuthToken,
        RequestField::Path,
        RequestField::Body,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequestField::BaseUrl => "Base URL",
            RequestField::AuthToken => "Token",
            RequestField::Path => "Path",
            RequestField::Body => "Body",
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Up => Some(UiEvent::PrevItem),
            KeyCode::Down => Some(UiEvent::NextItem),
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('x') => Some(UiEvent::ClearHistory),
            KeyCode::Char('g') => Some(UiEvent::GenerateAction),
            KeyCode::Char('r') => Some(UiEvent::RunAction),
            KeyCode::Left if active_panel == Panel::Actions => Some(UiEvent::PrevAction),
            KeyCode::Right if active_panel == Panel::Actions => Some(UiEvent::NextAction),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Actions | Panel::Request => Some(UiEvent::StartEditing),
                Panel::Presets => Some(UiEvent::ApplyPreset),
                Panel::Response | Panel::History => None,
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
