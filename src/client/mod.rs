//! Transport client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `IntegratorClient` owns the session identity and the default headers and
//! is the only thing that talks HTTP. Every business action (see
//! `actions.rs`) is a one-line call into [`IntegratorClient::call`], which
//! resolves the route, form-encodes POST bodies, sends the request once, and
//! hands the status and raw body to [`envelope::classify`].
//!
//! Requests take `&self` and hold no lock; overlapping calls are independent.

mod actions;

pub use actions::route;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{Config, ConfigOverrides};
use crate::endpoint::Endpoint;
use crate::envelope::{self, Response};
use crate::error::Error;
use crate::events::{self, EventConnection, EventHandler};
use crate::form;
use crate::tls;
use crate::types::RegisterBody;

pub const APPLICATION_ID: HeaderName = HeaderName::from_static("applicationid");
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Status the service answers a successful `Register` with.
const REGISTERED_STATUS: u16 = 204;

/// Result of [`IntegratorClient::init`].
#[derive(Debug)]
pub enum InitOutcome {
    Initialized,
    NotInitialized(InitFailure),
}

/// Why registration did not initialize the session.
#[derive(Debug)]
pub enum InitFailure {
    /// The service answered, but not with 204.
    Status(u16),
    /// The request never completed (service not running, refused, ...).
    Transport(Error),
}

impl InitOutcome {
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized)
    }
}

impl fmt::Display for InitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "registration returned status {status}"),
            Self::Transport(error) => write!(f, "integrator unreachable: {error}"),
        }
    }
}

pub struct IntegratorClient {
    config: Config,
    endpoint: Endpoint,
    headers: HeaderMap,
    http: reqwest::Client,
    initialized: AtomicBool,
}

impl IntegratorClient {
    /// Build a client from caller overrides merged over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, an id that is not a valid
    /// header value, or when the HTTP client cannot be built.
    pub fn new(overrides: ConfigOverrides) -> Result<Self, Error> {
        Self::with_config(Config::from_overrides(overrides)?)
    }

    /// Build a client from an already merged configuration.
    ///
    /// # Errors
    ///
    /// Same as [`IntegratorClient::new`].
    pub fn with_config(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let headers = default_headers(&config.id)?;

        let mut builder = reqwest::Client::builder().default_headers(headers.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(pem) = &config.root_certificate_pem {
            for cert in tls::http_roots(pem)? {
                builder = builder.add_root_certificate(cert);
            }
        }
        let http = builder.build()?;

        Ok(Self {
            endpoint: Endpoint::new(&config),
            config,
            headers,
            http,
            initialized: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Headers attached to every request.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the last [`init`](Self::init) registered the session.
    #[must_use]
    pub fn initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Register this session with the service.
    ///
    /// The flag is cleared first, then set only on a 204 reply. Transport
    /// failures are logged and reported as [`InitFailure::Transport`] rather
    /// than returned as errors.
    pub async fn init(&self) -> InitOutcome {
        self.initialized.store(false, Ordering::SeqCst);

        let body = RegisterBody { name: self.config.name.clone(), id: self.config.id.clone() };
        let outcome = match self.register(&body).await {
            Ok(res) if res.status() == REGISTERED_STATUS => InitOutcome::Initialized,
            Ok(res) => {
                tracing::info!(status = res.status(), "integrator registration rejected");
                InitOutcome::NotInitialized(InitFailure::Status(res.status()))
            }
            Err(error) => {
                tracing::warn!(%error, "network error: integrator is not running");
                InitOutcome::NotInitialized(InitFailure::Transport(error))
            }
        };

        self.initialized.store(outcome.is_initialized(), Ordering::SeqCst);
        outcome
    }

    /// Call a named route and classify the reply.
    ///
    /// GET requests carry only the default headers. Any other method sends
    /// `body` form-encoded; `None` sends an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the request does not complete and
    /// encoding errors for bodies that cannot be form-encoded. Non-2xx
    /// statuses are not errors; they come back as [`Response::Err`].
    pub async fn call<B, T>(&self, method: Method, route: &str, body: Option<&B>) -> Result<Response<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint.route_url(route);
        let mut request = self.http.request(method.clone(), &url);
        if method != Method::GET {
            let encoded = match body {
                Some(body) => form::encode(body)?,
                None => String::new(),
            };
            request = request.body(encoded);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(%method, route, %error, "integrator request failed");
                return Err(error.into());
            }
        };

        let status = response.status().as_u16();
        // An unreadable body degrades to an absent payload.
        let bytes = response.bytes().await.ok();
        tracing::debug!(%method, route, status, "integrator response");

        Ok(envelope::classify(status, bytes.as_deref()))
    }

    /// # Errors
    ///
    /// See [`IntegratorClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<Response<T>, Error> {
        self.call::<(), T>(Method::GET, route, None).await
    }

    /// # Errors
    ///
    /// See [`IntegratorClient::call`].
    pub async fn post<B, T>(&self, route: &str, body: &B) -> Result<Response<T>, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, route, Some(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, route: &str) -> Result<Response<T>, Error> {
        self.call::<(), T>(Method::POST, route, None).await
    }

    /// Open the session's event socket. See [`events::subscribe`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn subscribe_events<H: EventHandler>(&self, handler: H) -> EventConnection {
        events::subscribe(&self.config, handler)
    }
}

fn default_headers(id: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    headers.insert(APPLICATION_ID, HeaderValue::from_str(id)?);
    Ok(headers)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
