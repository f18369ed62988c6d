//! End-to-end header injection through `SessionFetch` against a `wiremock` server.
//!
//! Every test inspects `MockServer::received_requests()` so that both the
//! presence and the absence of the session headers can be asserted.

use kodegen_helicone_session::{
    ClientError, HeliconeSession, RequestOptions, Session, SessionEvent, SessionFetch,
    SessionTracker, Transport, session_to_uuid,
};
use reqwest::{
    Method, Url,
    header::{HeaderMap, HeaderValue},
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn start_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    server
}

fn messages_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/v1/messages", server.uri())).expect("valid url")
}

/// The single request the server received
async fn only_request(server: &MockServer) -> wiremock::Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

fn header_str<'a>(request: &'a wiremock::Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_injects_session_headers() {
    let server = start_server().await;
    let tracker = SessionTracker::new();
    let fetch = SessionFetch::new(reqwest::Client::new(), tracker.clone());

    tracker.handle_event(SessionEvent::created(
        Session::new("abc123").with_title("My Session"),
    ));

    let response = fetch
        .fetch(
            messages_url(&server),
            RequestOptions::new(Method::POST).body(r#"{"model":"claude"}"#),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), 200);

    let request = only_request(&server).await;
    let expected_id = session_to_uuid("abc123");
    assert_eq!(
        header_str(&request, "helicone-session-id"),
        Some(expected_id.as_str())
    );
    assert_eq!(header_str(&request, "helicone-session-name"), Some("My Session"));
}

#[tokio::test]
async fn test_fetch_preserves_method_body_and_headers() {
    let server = start_server().await;
    let tracker = SessionTracker::new();
    let fetch = SessionFetch::new(reqwest::Client::new(), tracker.clone());
    tracker.observe(Some(&Session::new("abc123").with_title("My Session")));

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_static("sk-test"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    let body = r#"{"messages":[]}"#;

    fetch
        .fetch(
            messages_url(&server),
            RequestOptions::new(Method::POST).headers(headers).body(body),
        )
        .await
        .expect("request should succeed");

    let request = only_request(&server).await;
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.url.path(), "/v1/messages");
    assert_eq!(request.body, body.as_bytes());
    assert_eq!(header_str(&request, "x-api-key"), Some("sk-test"));
    assert_eq!(header_str(&request, "content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_fetch_keeps_caller_session_id() {
    let server = start_server().await;
    let tracker = SessionTracker::new();
    let fetch = SessionFetch::new(reqwest::Client::new(), tracker.clone());
    tracker.observe(Some(&Session::new("abc123").with_title("My Session")));

    let mut headers = HeaderMap::new();
    headers.insert("helicone-session-id", HeaderValue::from_static("custom-value"));

    fetch
        .fetch(
            messages_url(&server),
            RequestOptions::new(Method::POST).headers(headers),
        )
        .await
        .expect("request should succeed");

    let request = only_request(&server).await;
    assert_eq!(header_str(&request, "helicone-session-id"), Some("custom-value"));
    assert_eq!(header_str(&request, "helicone-session-name"), Some("My Session"));
}

#[tokio::test]
async fn test_fetch_without_session_adds_nothing() {
    let server = start_server().await;
    let fetch = SessionFetch::new(reqwest::Client::new(), SessionTracker::new());

    fetch
        .fetch(messages_url(&server), RequestOptions::new(Method::POST))
        .await
        .expect("request should succeed");

    let request = only_request(&server).await;
    assert!(request.headers.get("helicone-session-id").is_none());
    assert!(request.headers.get("helicone-session-name").is_none());
}

#[tokio::test]
async fn test_fetch_reads_state_at_call_time() {
    let server = start_server().await;
    let tracker = SessionTracker::new();
    let fetch = SessionFetch::new(reqwest::Client::new(), tracker.clone());

    tracker.observe(Some(&Session::new("ses_a").with_title("A")));
    tracker.observe(Some(&Session::new("ses_b").with_title("B")));

    fetch
        .fetch(messages_url(&server), RequestOptions::new(Method::POST))
        .await
        .expect("request should succeed");

    let request = only_request(&server).await;
    let expected_id = session_to_uuid("ses_b");
    assert_eq!(
        header_str(&request, "helicone-session-id"),
        Some(expected_id.as_str())
    );
    assert_eq!(header_str(&request, "helicone-session-name"), Some("B"));
}

#[tokio::test]
async fn test_transport_execute_decorates_prebuilt_request() {
    let server = start_server().await;
    let client = reqwest::Client::new();
    let tracker = SessionTracker::new();
    let fetch = SessionFetch::new(client.clone(), tracker.clone());
    tracker.observe(Some(&Session::new("abc123").with_title("Prebuilt")));

    let request = client
        .post(messages_url(&server))
        .body("payload")
        .build()
        .expect("valid request");
    fetch.execute(request).await.expect("request should succeed");

    let request = only_request(&server).await;
    assert_eq!(header_str(&request, "helicone-session-name"), Some("Prebuilt"));
    assert_eq!(request.body, b"payload");
}

#[tokio::test]
async fn test_transport_error_propagates() {
    // Nothing listens on port 9 (discard) on test hosts
    let fetch = SessionFetch::new(reqwest::Client::new(), SessionTracker::new());
    let url = Url::parse("http://127.0.0.1:9/v1/messages").expect("valid url");

    let result = fetch.fetch(url, RequestOptions::new(Method::GET)).await;
    match result {
        Err(ClientError::Transport(e)) => assert!(e.is_connect() || e.is_request()),
        other => panic!("Expected Transport error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_helicone_session_end_to_end() {
    let server = start_server().await;
    let helicone = HeliconeSession::builder()
        .base_url(server.uri())
        .build()
        .expect("valid configuration");

    helicone
        .tracker()
        .handle_host_event(&serde_json::json!({
            "type": "session.created",
            "properties": { "info": { "id": "ses_e2e", "title": "End to end" } }
        }))
        .expect("valid event");

    let url = helicone.endpoint("v1/messages").expect("valid endpoint");
    helicone
        .fetch()
        .fetch(url, RequestOptions::new(Method::POST).body("{}"))
        .await
        .expect("request should succeed");

    let request = only_request(&server).await;
    let expected_id = session_to_uuid("ses_e2e");
    assert_eq!(
        header_str(&request, "helicone-session-id"),
        Some(expected_id.as_str())
    );
    assert_eq!(header_str(&request, "helicone-session-name"), Some("End to end"));
    assert!(
        header_str(&request, "user-agent")
            .is_some_and(|ua| ua.starts_with("kodegen-helicone-session/"))
    );
}
