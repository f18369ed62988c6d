// Demo: feed host session events into a tracker and show the headers that
// would be attached to outbound requests.
//
// Run with: RUST_LOG=kodegen_helicone_session=debug cargo run --example session_tracking

use kodegen_helicone_session::{HeliconeSession, SessionTracker};
use reqwest::header::HeaderMap;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn print_headers(label: &str, tracker: &SessionTracker) {
    let mut headers = HeaderMap::new();
    tracker.apply_headers(&mut headers);

    println!("{label}:");
    if headers.is_empty() {
        println!("  (no session headers)");
    }
    for (name, value) in &headers {
        println!("  {name}: {}", value.to_str().unwrap_or("<non-ascii>"));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let helicone = HeliconeSession::builder().build()?;
    let tracker = helicone.tracker();
    println!("Gateway: {}", helicone.endpoint("v1/messages")?);

    print_headers("Before any session", tracker);

    let events = [
        json!({
            "type": "session.created",
            "properties": { "info": { "id": "ses_01JDEMO" } }
        }),
        json!({
            "type": "message.updated",
            "properties": { "info": { "id": "msg_01JDEMO" } }
        }),
        json!({
            "type": "session.updated",
            "properties": { "info": { "id": "ses_01JDEMO", "title": "Fix flaky CI\r\nX-Injected: 1" } }
        }),
    ];

    for event in &events {
        let tracked = tracker.handle_host_event(event)?;
        print_headers(&format!("After {} (tracked: {tracked})", event["type"]), tracker);
    }

    Ok(())
}
