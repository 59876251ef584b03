//! Static catalog of endpoint templates exposed by the control-plane service

use crate::models::{HttpMethod, RequestState};

/// A named method/path template
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetEndpoint {
    pub label: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
}

impl PresetEndpoint {
    const fn new(label: &'static str, method: HttpMethod, path: &'static str) -> Self {
        PresetEndpoint { label, method, path }
    }

    /// Overwrite method and path; body and auth token stay as they are.
    pub fn apply(&self, request: &mut RequestState) {
        request.method = self.method;
        request.path = self.path.to_string();
    }
}

/// Presets in display order
pub const PRESET_ENDPOINTS: &[PresetEndpoint] = &[
    PresetEndpoint::new("GET /", HttpMethod::GET, "/"),
    PresetEndpoint::new("GET /status", HttpMethod::GET, "/status"),
    PresetEndpoint::new("GET /sts", HttpMethod::GET, "/sts"),
    PresetEndpoint::new("GET /health", HttpMethod::GET, "/health"),
    PresetEndpoint::new("GET /disks", HttpMethod::GET, "/disks"),
    PresetEndpoint::new("GET /clipboard", HttpMethod::GET, "/clipboard"),
    PresetEndpoint::new("GET /screenshot?format=png", HttpMethod::GET, "/screenshot?format=png"),
    PresetEndpoint::new("POST /status", HttpMethod::POST, "/status"),
    PresetEndpoint::new("POST /exit", HttpMethod::POST, "/exit"),
];

/// Look up a preset by position
pub fn preset(index: usize) -> Option<&'static PresetEndpoint> {
    PRESET_ENDPOINTS.get(index)
}
