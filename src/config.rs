//! Session configuration.
//!
//! Callers describe only what they want to change in a [`ConfigOverrides`];
//! [`Config::from_overrides`] merges it over the defaults once, at client
//! construction. The resulting [`Config`] is never mutated afterwards.

use std::time::Duration;

use uuid::Uuid;

use crate::error::Error;
use crate::tls;

pub const DEFAULT_NAME: &str = "Integrator App";
pub const DEFAULT_HOST: &str = "localhost";
pub const SECURE_PORT: u16 = 10443;
pub const INSECURE_PORT: u16 = 10080;
pub const API_VERSION: &str = "v1";

/// Optional caller overrides. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Use HTTPS on the secure port (default `true`).
    pub https: Option<bool>,
    /// Display name sent on registration (default `"Integrator App"`).
    pub name: Option<String>,
    /// Session id sent as `ApplicationId` (default: fresh UUID v4).
    pub id: Option<String>,
    /// Host the service listens on (default `"localhost"`).
    pub host: Option<String>,
    pub secure_port: Option<u16>,
    pub insecure_port: Option<u16>,
    /// Per-request HTTP timeout. Absent means wait indefinitely.
    pub timeout: Option<Duration>,
    /// Extra PEM trust roots for HTTPS and the event socket, for a service
    /// certificate that is not in the system store.
    pub root_certificate_pem: Option<Vec<u8>>,
}

/// Effective, immutable session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub secure: bool,
    pub name: String,
    pub id: String,
    pub host: String,
    pub secure_port: u16,
    pub insecure_port: u16,
    pub timeout: Option<Duration>,
    pub root_certificate_pem: Option<Vec<u8>>,
}

impl Config {
    /// Merge caller overrides over the defaults.
    ///
    /// A fresh session id is generated only when none is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the merged id, name, or host is
    /// empty, or when the root certificate PEM holds no readable certificate.
    pub fn from_overrides(overrides: ConfigOverrides) -> Result<Self, Error> {
        let config = Self {
            secure: overrides.https.unwrap_or(true),
            name: overrides.name.unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            id: overrides.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            host: overrides.host.unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            secure_port: overrides.secure_port.unwrap_or(SECURE_PORT),
            insecure_port: overrides.insecure_port.unwrap_or(INSECURE_PORT),
            timeout: overrides.timeout,
            root_certificate_pem: overrides.root_certificate_pem,
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidConfig("session id must not be empty".to_owned()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig("display name must not be empty".to_owned()));
        }
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host must not be empty".to_owned()));
        }
        if let Some(pem) = &self.root_certificate_pem {
            tls::parse_pem(pem)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secure: true,
            name: DEFAULT_NAME.to_owned(),
            id: Uuid::new_v4().to_string(),
            host: DEFAULT_HOST.to_owned(),
            secure_port: SECURE_PORT,
            insecure_port: INSECURE_PORT,
            timeout: None,
            root_certificate_pem: None,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
