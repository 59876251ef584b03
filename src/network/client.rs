//! HTTP client wrapper - executes one request and classifies the outcome

use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use thiserror::Error;

use crate::models::{HttpMethod, RequestState, ResponseRecord};
use crate::normalize;

/// Failure that prevented a status and body from being obtained
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Error reading body: {0}")]
    Body(String),
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Result of one attempt plus its wall-clock duration
#[derive(Debug, Clone)]
pub struct Attempt {
    pub outcome: Result<ResponseRecord, TransportError>,
    pub time_ms: u64,
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    }
}

/// Build a request from the staged draft
pub fn build_request(client: &reqwest::Client, request: &RequestState) -> reqwest::RequestBuilder {
    let mut req_builder = client
        .request(to_reqwest_method(request.method), request.full_url())
        .header(CONTENT_TYPE, "application/json");

    if let Some(token) = request.bearer_token() {
        req_builder = req_builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }

    if let Some(body) = request.outgoing_body() {
        req_builder = req_builder.body(body.to_string());
    }

    req_builder
}

async fn exchange(req_builder: reqwest::RequestBuilder) -> Result<ResponseRecord, TransportError> {
    let resp = req_builder.send().await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.text().await?;
    Ok(normalize::normalize(status, &headers, body))
}

fn round_millis(start: Instant) -> u64 {
    (start.elapsed().as_secs_f64() * 1000.0).round() as u64
}

/// Execute the draft and wait for the full body.
///
/// Any status code counts as a completed exchange; only failures before a
/// status and body are available become a [`TransportError`].
pub async fn execute_request(client: &reqwest::Client, request: &RequestState) -> Attempt {
    let req_builder = build_request(client, request);

    let start = Instant::now();
    let outcome = exchange(req_builder).await;
    let time_ms = round_millis(start);

    Attempt { outcome, time_ms }
}

/// Create an HTTP client with default configuration.
///
/// No overall timeout is set; a stalled attempt waits on the transport.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
