//! Crate-wide error type.
//!
//! Only hard failures live here: construction-time misuse and transport
//! faults. Application-level failures (non-2xx statuses) are never errors;
//! they come back as [`crate::Response::Err`].

/// Error returned by client construction, requests, and event subscription.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is unusable (for example an empty session id).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The session id cannot be carried in the `ApplicationId` header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    /// The HTTP client could not be built, or the request never completed.
    #[error("http transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A request body did not serialize to a key/value object.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    /// A request body could not be converted to JSON before form encoding.
    #[error("body serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Form encoding of the request body failed.
    #[error("form encoding failed: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    /// A trust root was rejected or the TLS configuration could not be built.
    #[error("tls configuration failed: {0}")]
    Tls(#[from] rustls::Error),
    /// The event socket could not be opened or failed mid-stream.
    #[error("websocket failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WsConnect(Box::new(error))
    }
}
