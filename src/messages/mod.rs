//! Channel message types
//!
//! Key events flow UI -> App, execution commands App -> Network, classified
//! attempts Network -> App, and render snapshots App -> UI.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::UiEvent;
pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;
