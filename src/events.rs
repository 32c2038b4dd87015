//! Server-pushed events over the session's WebSocket.
//!
//! DESIGN
//! ======
//! One connection per subscription, owned by one spawned task. Each text
//! frame is parsed as JSON and interpreted by its `EventType` field; the
//! handler is called inline on the reader task, so a slow handler delays the
//! next frame. There is no buffering, replay, or reconnection: when the
//! socket closes the task ends and the handle reports [`ConnectionState::Closed`].
//!
//! Frames that fail to decode go to [`EventHandler::on_malformed`] instead of
//! being dropped silently.

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async_tls_with_config;
use tokio_tungstenite::tungstenite::Message;

use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::tls;
use crate::types::{Call, HookState, null_as_default};

// =============================================================================
// EVENT VARIANTS
// =============================================================================

/// Closed set of events the service pushes, tagged by `EventType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "EventType")]
pub enum Event {
    Initial(InitialSnapshot),
    CallsChanged(CallsChanged),
    HookStateChanged(HookStateChanged),
    CallHistoryChanged(CallHistoryChanged),
}

impl Event {
    /// Wire name of the variant.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Initial(_) => "Initial",
            Self::CallsChanged(_) => "CallsChanged",
            Self::HookStateChanged(_) => "HookStateChanged",
            Self::CallHistoryChanged(_) => "CallHistoryChanged",
        }
    }
}

/// First event after connecting: the current state of the seat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialSnapshot {
    #[serde(rename = "HookState", default, skip_serializing_if = "Option::is_none")]
    pub hook_state: Option<HookState>,
    #[serde(rename = "Calls", default, deserialize_with = "null_as_default")]
    pub calls: Vec<Call>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallsChanged {
    #[serde(rename = "Calls", default, deserialize_with = "null_as_default")]
    pub calls: Vec<Call>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookStateChanged {
    #[serde(rename = "HookState")]
    pub hook_state: HookState,
}

/// The call history changed; the payload is passed through as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallHistoryChanged {
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Decode one text frame.
///
/// # Errors
///
/// Returns the `serde_json` error for invalid JSON, a missing or unknown
/// `EventType`, or a payload that does not match its variant.
pub fn decode(text: &str) -> Result<Event, serde_json::Error> {
    serde_json::from_str(text)
}

// =============================================================================
// HANDLER
// =============================================================================

/// Receives decoded events on the connection's reader task.
///
/// Any `FnMut(Event) + Send + 'static` closure is a handler; malformed frames
/// are then logged at `warn`.
pub trait EventHandler: Send + 'static {
    fn on_event(&mut self, event: Event);

    fn on_malformed(&mut self, raw: &str, error: &serde_json::Error) {
        tracing::warn!(%error, frame_len = raw.len(), "dropping malformed integrator event");
    }
}

impl<F> EventHandler for F
where
    F: FnMut(Event) + Send + 'static,
{
    fn on_event(&mut self, event: Event) {
        self(event);
    }
}

fn dispatch<H: EventHandler>(handler: &mut H, raw: &str) {
    match decode(raw) {
        Ok(event) => {
            tracing::debug!(event_type = event.event_type(), "integrator event");
            handler.on_event(event);
        }
        Err(error) => handler.on_malformed(raw, &error),
    }
}

// =============================================================================
// CONNECTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Handle to a live event subscription.
///
/// Dropping the handle closes the socket.
#[must_use = "dropping the connection handle closes the event socket"]
pub struct EventConnection {
    url: String,
    state: watch::Receiver<ConnectionState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), Error>>,
}

impl EventConnection {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Wait until the connection reaches `target` or closes, returning the
    /// state actually reached.
    pub async fn wait_for(&mut self, target: ConnectionState) -> ConnectionState {
        match self
            .state
            .wait_for(|state| *state == target || *state == ConnectionState::Closed)
            .await
        {
            Ok(state) => *state,
            Err(_) => ConnectionState::Closed,
        }
    }

    /// Close the socket and wait for the reader task to finish.
    ///
    /// # Errors
    ///
    /// Returns the socket error that ended the connection, if any.
    pub async fn close(mut self) -> Result<(), Error> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.finished().await
    }

    /// Wait for the server to end the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WsConnect`] when the handshake failed or the socket
    /// broke mid-stream. A clean close is `Ok`.
    pub async fn finished(mut self) -> Result<(), Error> {
        // Keep the shutdown sender alive while waiting so the task is not
        // told to stop.
        let _shutdown = self.shutdown.take();
        match (&mut self.task).await {
            Ok(result) => result,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(_) => Ok(()),
        }
    }
}

/// Open the events socket for this session's configuration.
///
/// The URL is always `wss://<host>:<secure_port>/api/v1/events/<id>`; the
/// security flag does not apply to events. Returns immediately in
/// [`ConnectionState::Connecting`].
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn subscribe<H: EventHandler>(config: &Config, handler: H) -> EventConnection {
    let url = Endpoint::new(config).events_url(&config.id);
    start(url, config.root_certificate_pem.clone(), handler)
}

/// Open an events socket at an explicit URL (`ws://` or `wss://`).
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn connect<H: EventHandler>(url: String, handler: H) -> EventConnection {
    start(url, None, handler)
}

fn start<H: EventHandler>(url: String, root_pem: Option<Vec<u8>>, handler: H) -> EventConnection {
    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(run(url.clone(), root_pem, handler, state_tx, shutdown_rx));

    EventConnection { url, state: state_rx, shutdown: Some(shutdown_tx), task }
}

/// Publishes `Closed` when the reader task ends, including by panic.
struct ClosedOnExit<'a>(&'a watch::Sender<ConnectionState>);

impl Drop for ClosedOnExit<'_> {
    fn drop(&mut self) {
        self.0.send_replace(ConnectionState::Closed);
    }
}

async fn run<H: EventHandler>(
    url: String,
    root_pem: Option<Vec<u8>>,
    mut handler: H,
    state: watch::Sender<ConnectionState>,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<(), Error> {
    let result = {
        let _closed = ClosedOnExit(&state);
        pump(&url, root_pem.as_deref(), &mut handler, &state, &mut shutdown).await
    };
    match &result {
        Ok(()) => tracing::debug!(%url, "integrator event socket closed"),
        Err(error) => tracing::warn!(%url, %error, "integrator event socket failed"),
    }
    result
}

async fn pump<H: EventHandler>(
    url: &str,
    root_pem: Option<&[u8]>,
    handler: &mut H,
    state: &watch::Sender<ConnectionState>,
    shutdown: &mut oneshot::Receiver<()>,
) -> Result<(), Error> {
    let connector = root_pem.map(tls::ws_connector).transpose()?;
    let (mut stream, _) = tokio::select! {
        connected = connect_async_tls_with_config(url, None, false, connector) => connected?,
        _ = &mut *shutdown => return Ok(()),
    };
    state.send_replace(ConnectionState::Open);
    tracing::info!(%url, "integrator event socket open");

    loop {
        let message = tokio::select! {
            message = stream.next() => message,
            _ = &mut *shutdown => {
                let _ = stream.close(None).await;
                return Ok(());
            }
        };
        let Some(message) = message else {
            return Ok(());
        };

        match message? {
            Message::Text(text) => dispatch(handler, text.as_str()),
            Message::Close(_) => return Ok(()),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
