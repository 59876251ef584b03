//! # ctlprobe
//!
//! A terminal console for exploring a local control-plane service that
//! exposes filesystem, clipboard and screenshot operations over HTTP.
//!
//! ## Features
//! - Quick-action forms compiled into encoded requests
//! - Free-form method, path, body and bearer token editing
//! - Endpoint presets
//! - Pretty-printed JSON responses with the full header list
//! - Session history of completed exchanges
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod models;
pub mod constants;
pub mod config;
pub mod forms;
pub mod presets;
pub mod normalize;
pub mod history;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{HistoryEntry, HttpMethod, RequestState, ResponseRecord};
pub use forms::{ActionKind, CompiledRequest, FormError, QuickAction, QuickForms};
pub use presets::{PresetEndpoint, PRESET_ENDPOINTS};
pub use history::HistoryLog;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{execute_request, Attempt, NetworkActor, TransportError};
