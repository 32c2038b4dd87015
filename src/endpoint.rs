//! URL construction for API routes and the event socket.

use crate::config::{API_VERSION, Config};

/// Resolves route names to fully-qualified URLs for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    secure: bool,
    host: String,
    secure_port: u16,
    insecure_port: u16,
}

impl Endpoint {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            secure: config.secure,
            host: config.host.clone(),
            secure_port: config.secure_port,
            insecure_port: config.insecure_port,
        }
    }

    /// Scheme, host, and port selected by the security flag.
    #[must_use]
    pub fn origin(&self) -> String {
        if self.secure {
            format!("https://{}:{}", self.host, self.secure_port)
        } else {
            format!("http://{}:{}", self.host, self.insecure_port)
        }
    }

    /// URL for a named route, e.g. `Version` → `https://localhost:10443/api/v1/Version`.
    #[must_use]
    pub fn route_url(&self, route: &str) -> String {
        format!("{}/api/{API_VERSION}/{route}", self.origin())
    }

    /// Event socket URL. Always `wss` on the secure port, whatever the flag.
    #[must_use]
    pub fn events_url(&self, session_id: &str) -> String {
        format!(
            "wss://{}:{}/api/{API_VERSION}/events/{session_id}",
            self.host, self.secure_port
        )
    }
}

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;
