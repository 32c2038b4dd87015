use super::*;
use axum::Router;
use axum::extract::WebSocketUpgrade;
use axum::extract::ws::Message as WsMessage;
use axum::routing::get;
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// Serve `frames` as text messages to every client, then close.
async fn serve_frames(frames: Vec<String>) -> SocketAddr {
    let app = Router::new().route(
        "/api/v1/events/{id}",
        get(move |ws: WebSocketUpgrade| {
            let frames = frames.clone();
            async move {
                ws.on_upgrade(move |mut socket| async move {
                    for frame in frames {
                        if socket.send(WsMessage::Text(frame.into())).await.is_err() {
                            return;
                        }
                    }
                    let _ = socket.send(WsMessage::Close(None)).await;
                })
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn events_url(addr: SocketAddr) -> String {
    format!("ws://{addr}/api/v1/events/test-id")
}

struct Recorder {
    events: mpsc::UnboundedSender<Event>,
    malformed: mpsc::UnboundedSender<String>,
}

impl EventHandler for Recorder {
    fn on_event(&mut self, event: Event) {
        let _ = self.events.send(event);
    }

    fn on_malformed(&mut self, raw: &str, _error: &serde_json::Error) {
        let _ = self.malformed.send(raw.to_owned());
    }
}

#[test]
fn hook_state_changed_frame_decodes_to_variant() {
    let event = decode(r#"{"EventType":"HookStateChanged","HookState":"OnHook"}"#).expect("decode");
    assert_eq!(event, Event::HookStateChanged(HookStateChanged { hook_state: HookState::OnHook }));
    assert_eq!(event.event_type(), "HookStateChanged");
}

#[test]
fn initial_snapshot_keeps_calls_and_extra_fields() {
    let raw = json!({
        "EventType": "Initial",
        "HookState": "OffHook",
        "Calls": [{ "Id": "c-1", "CallState": "Connected" }],
        "Version": "4.2"
    })
    .to_string();

    let Event::Initial(snapshot) = decode(&raw).expect("decode") else {
        panic!("expected Initial");
    };
    assert_eq!(snapshot.hook_state, Some(HookState::OffHook));
    assert_eq!(snapshot.calls.len(), 1);
    assert_eq!(snapshot.calls[0].id, "c-1");
    assert_eq!(snapshot.details.get("Version"), Some(&json!("4.2")));
    assert!(!snapshot.details.contains_key("EventType"));
}

#[test]
fn calls_changed_without_calls_defaults_to_empty() {
    let event = decode(r#"{"EventType":"CallsChanged"}"#).expect("decode");
    assert_eq!(event, Event::CallsChanged(CallsChanged::default()));
}

#[test]
fn call_history_changed_passes_payload_through() {
    let event = decode(r#"{"EventType":"CallHistoryChanged","Count":3}"#).expect("decode");
    let Event::CallHistoryChanged(history) = event else {
        panic!("expected CallHistoryChanged");
    };
    assert_eq!(history.details.get("Count"), Some(&json!(3)));
}

#[test]
fn unknown_or_missing_event_type_is_an_error() {
    assert!(decode(r#"{"EventType":"Bogus"}"#).is_err());
    assert!(decode(r#"{"HookState":"OnHook"}"#).is_err());
    assert!(decode("not json").is_err());
}

#[test]
fn event_serializes_with_discriminator() {
    let event = Event::HookStateChanged(HookStateChanged { hook_state: HookState::Ringing });
    assert_eq!(
        serde_json::to_value(&event).expect("encode"),
        json!({ "EventType": "HookStateChanged", "HookState": "Ringing" })
    );
}

#[test]
fn subscribe_targets_secure_events_path() {
    let config = Config {
        secure: false,
        id: "session-1".into(),
        ..Config::default()
    };
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().expect("runtime");
    let _guard = rt.enter();

    let conn = subscribe(&config, |_event: Event| {});
    assert_eq!(conn.url(), "wss://localhost:10443/api/v1/events/session-1");
}

#[tokio::test]
async fn frames_dispatch_in_order_then_connection_closes() {
    let addr = serve_frames(vec![
        r#"{"EventType":"Initial","HookState":"OnHook"}"#.to_owned(),
        r#"{"EventType":"HookStateChanged","HookState":"Ringing"}"#.to_owned(),
        r#"{"EventType":"CallsChanged","Calls":[]}"#.to_owned(),
    ])
    .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let conn = connect(events_url(addr), move |event: Event| {
        let _ = tx.send(event);
    });

    let mut received = Vec::new();
    for _ in 0..3 {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("event timed out")
            .expect("handler channel closed");
        received.push(event.event_type());
    }
    assert_eq!(received, vec!["Initial", "HookStateChanged", "CallsChanged"]);

    timeout(Duration::from_secs(2), conn.finished())
        .await
        .expect("close timed out")
        .expect("clean close");
}

#[tokio::test]
async fn malformed_frames_reach_on_malformed_and_stream_continues() {
    let addr = serve_frames(vec![
        "{oops".to_owned(),
        r#"{"EventType":"HookStateChanged","HookState":"Held"}"#.to_owned(),
    ])
    .await;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (malformed_tx, mut malformed_rx) = mpsc::unbounded_channel();
    let conn = connect(events_url(addr), Recorder { events: events_tx, malformed: malformed_tx });

    let raw = timeout(Duration::from_secs(2), malformed_rx.recv())
        .await
        .expect("malformed timed out")
        .expect("malformed channel closed");
    assert_eq!(raw, "{oops");

    let event = timeout(Duration::from_secs(2), events_rx.recv())
        .await
        .expect("event timed out")
        .expect("event channel closed");
    assert_eq!(event, Event::HookStateChanged(HookStateChanged { hook_state: HookState::Held }));

    let _ = conn.finished().await;
}

#[tokio::test]
async fn state_moves_to_closed_after_server_close() {
    let addr = serve_frames(Vec::new()).await;
    let mut conn = connect(events_url(addr), |_event: Event| {});

    let reached = timeout(Duration::from_secs(2), conn.wait_for(ConnectionState::Closed))
        .await
        .expect("state timed out");
    assert_eq!(reached, ConnectionState::Closed);
    assert_eq!(conn.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn refused_connection_reports_ws_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let conn = connect(events_url(addr), |_event: Event| {});
    let err = timeout(Duration::from_secs(2), conn.finished())
        .await
        .expect("finish timed out")
        .expect_err("connect should fail");
    assert!(matches!(err, Error::WsConnect(_)));
}

#[tokio::test]
async fn close_ends_an_open_connection() {
    let app = Router::new().route(
        "/api/v1/events/{id}",
        get(|ws: WebSocketUpgrade| async move {
            ws.on_upgrade(|mut socket| async move {
                // Hold the socket open until the client goes away.
                while let Some(Ok(_)) = socket.recv().await {}
            })
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let mut conn = connect(events_url(addr), |_event: Event| {});
    let reached = timeout(Duration::from_secs(2), conn.wait_for(ConnectionState::Open))
        .await
        .expect("open timed out");
    assert_eq!(reached, ConnectionState::Open);

    timeout(Duration::from_secs(2), conn.close())
        .await
        .expect("close timed out")
        .expect("clean close");
}

struct PanickingHandler;

impl EventHandler for PanickingHandler {
    fn on_event(&mut self, _event: Event) {
        panic!("handler failed");
    }
}

#[tokio::test]
async fn panicking_handler_leaves_state_closed() {
    let addr = serve_frames(vec![r#"{"EventType":"HookStateChanged","HookState":"Ringing"}"#.to_owned()]).await;
    let mut conn = connect(events_url(addr), PanickingHandler);

    let reached = timeout(Duration::from_secs(2), conn.wait_for(ConnectionState::Closed))
        .await
        .expect("state timed out");
    assert_eq!(reached, ConnectionState::Closed);
    assert_eq!(conn.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn unusable_root_certificate_fails_the_subscription() {
    let config = Config {
        id: "session-1".into(),
        root_certificate_pem: Some(b"not a certificate".to_vec()),
        ..Config::default()
    };

    let conn = subscribe(&config, |_event: Event| {});
    let err = timeout(Duration::from_secs(2), conn.finished())
        .await
        .expect("finish timed out")
        .expect_err("connector should fail");
    assert!(matches!(err, Error::InvalidConfig(_)));
}
