/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::GET,
        }
    }

    /// GET is the only method that never carries a staged body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

/// The draft of the next request
#[derive(Clone, Debug, PartialEq)]
pub struct RequestState {
    pub base_url: String,
    pub auth_token: String,
    pub method: HttpMethod,
    pub path: String,
    pub body: String,
}

impl RequestState {
    /// Base URL and path joined with exactly one `/` between them.
    pub fn full_url(&self) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }

    /// Bearer token to send, if any
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.auth_token.trim();
        (!token.is_empty()).then_some(token)
    }

    /// Body to transmit, if the method and staged content allow one
    pub fn outgoing_body(&self) -> Option<&str> {
        if self.method.allows_body() && !self.body.trim().is_empty() {
            Some(&self.body)
        } else {
            None
        }
    }
}

impl Default for RequestState {
    fn default() -> Self {
        use crate::constants::{DEFAULT_BASE_URL, DEFAULT_PATH};
        RequestState {
            base_url: String::from(DEFAULT_BASE_URL),
            auth_token: String::new(),
            method: HttpMethod::GET,
            path: String::from(DEFAULT_PATH),
            body: String::new(),
        }
    }
}

/// Display model of the last attempt
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseRecord {
    pub ok: bool,
    pub status: String,
    /// Header pairs in received order, duplicates kept
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub error: Option<String>,
}

impl ResponseRecord {
    /// Record for an attempt that never produced a status.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        ResponseRecord {
            error: Some(message.into()),
            ..ResponseRecord::default()
        }
    }
}

/// History entry
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub method: HttpMethod,
    pub url: String,
    pub status: String,
}
