use axum::{
    body::Body,
    http::{header, HeaderMap, Response, StatusCode},
    routing::{any, get},
    Json, Router,
};
use ctlprobe::network::client::create_client;
use ctlprobe::{execute_request, HttpMethod, RequestState, TransportError};
use serde_json::{json, Value};
use tokio::net::TcpListener;

fn mock_app() -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/dup", get(duplicate_headers))
        .route("/fail", get(fail))
        .route("/echo", any(echo))
}

async fn status() -> Json<Value> {
    Json(json!({ "version": "1.2.0", "uptime": 42, "ok": true }))
}

async fn duplicate_headers() -> Response<Body> {
    Response::builder()
        .header("x-multi", "first")
        .header("x-multi", "second")
        .body(Body::from("plain text"))
        .unwrap()
}

async fn fail() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "len": body.len(),
        "auth": header_value(header::AUTHORIZATION),
        "content_type": header_value(header::CONTENT_TYPE),
    }))
}

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock_app()).await.unwrap();
    });
    format!("http://{}", addr)
}

fn draft(base_url: &str, method: HttpMethod, path: &str) -> RequestState {
    RequestState {
        base_url: base_url.to_string(),
        method,
        path: path.to_string(),
        ..RequestState::default()
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

// --- completed exchanges ---

#[tokio::test]
async fn json_body_is_pretty_printed() {
    let base = spawn_server().await;
    let attempt = execute_request(&create_client(), &draft(&base, HttpMethod::GET, "/status")).await;

    let record = attempt.outcome.unwrap();
    assert!(record.ok);
    assert_eq!(record.status, "200 OK");
    assert!(record.error.is_none());
    assert!(record.body.contains("\n  \"version\": \"1.2.0\""));
    assert_eq!(parse(&record.body), json!({ "version": "1.2.0", "uptime": 42, "ok": true }));
}

#[tokio::test]
async fn server_error_is_a_completed_exchange() {
    let base = spawn_server().await;
    let attempt = execute_request(&create_client(), &draft(&base, HttpMethod::GET, "fail")).await;

    let record = attempt.outcome.unwrap();
    assert!(!record.ok);
    assert_eq!(record.status, "500 Internal Server Error");
    assert_eq!(record.body, "boom");
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let base = spawn_server().await;
    let attempt = execute_request(&create_client(), &draft(&base, HttpMethod::GET, "/nope")).await;

    let record = attempt.outcome.unwrap();
    assert!(!record.ok);
    assert_eq!(record.status, "404 Not Found");
}

#[tokio::test]
async fn duplicate_headers_are_kept_in_order() {
    let base = spawn_server().await;
    let attempt = execute_request(&create_client(), &draft(&base, HttpMethod::GET, "/dup")).await;

    let record = attempt.outcome.unwrap();
    let values: Vec<&str> = record
        .headers
        .iter()
        .filter(|(k, _)| k == "x-multi")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(values, vec!["first", "second"]);
    assert_eq!(record.body, "plain text");
}

// --- outgoing request shape ---

#[tokio::test]
async fn get_never_transmits_a_body() {
    let base = spawn_server().await;
    let mut request = draft(&base, HttpMethod::GET, "/echo");
    request.body = r#"{"content":"ignored"}"#.to_string();

    let record = execute_request(&create_client(), &request).await.outcome.unwrap();
    let echoed = parse(&record.body);
    assert_eq!(echoed["len"], 0);
    assert_eq!(echoed["content_type"], "application/json");
}

#[tokio::test]
async fn post_transmits_the_body_verbatim() {
    let base = spawn_server().await;
    let body = "{\"content\":\"hello\"}\n";
    let mut request = draft(&base, HttpMethod::POST, "/echo");
    request.body = body.to_string();

    let record = execute_request(&create_client(), &request).await.outcome.unwrap();
    assert_eq!(parse(&record.body)["len"], body.len());
}

#[tokio::test]
async fn authorization_only_with_a_token() {
    let base = spawn_server().await;
    let client = create_client();

    let mut request = draft(&base, HttpMethod::GET, "/echo");
    request.auth_token = "   ".to_string();
    let record = execute_request(&client, &request).await.outcome.unwrap();
    assert_eq!(parse(&record.body)["auth"], Value::Null);

    request.auth_token = " secret ".to_string();
    let record = execute_request(&client, &request).await.outcome.unwrap();
    assert_eq!(parse(&record.body)["auth"], "Bearer secret");
}

// --- transport failures ---

#[tokio::test]
async fn closed_port_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = draft(&format!("http://{}", addr), HttpMethod::GET, "/status");
    let attempt = execute_request(&create_client(), &request).await;

    let err = attempt.outcome.unwrap_err();
    assert!(matches!(err, TransportError::Connect(_) | TransportError::Other(_)));
    assert!(!err.to_string().is_empty());
}
