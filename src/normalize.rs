//! Response normalization - turns a raw exchange into its display model

use reqwest::header::HeaderMap;

use crate::models::ResponseRecord;

/// Pretty-print the body when it is valid JSON, otherwise return it unchanged.
pub fn display_body(raw: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(raw),
        Err(_) => raw,
    }
}

/// Flatten a header map into ordered pairs, one per value.
///
/// Repeated keys stay as separate entries; names and values are not merged
/// or rewritten.
pub fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// `"<code> <reason>"`, or just the code when the reason is unknown
pub fn status_line(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Build the display model for a completed exchange
pub fn normalize(status: reqwest::StatusCode, headers: &HeaderMap, body: String) -> ResponseRecord {
    ResponseRecord {
        ok: status.is_success(),
        status: status_line(status),
        headers: header_pairs(headers),
        body: display_body(body),
        error: None,
    }
}
