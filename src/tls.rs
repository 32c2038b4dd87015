//! Extra trust roots for a locally issued service certificate.
//!
//! Without an override both transports trust the bundled public roots and the
//! operating system's store. A PEM supplied through
//! [`ConfigOverrides::root_certificate_pem`](crate::ConfigOverrides) is added on
//! top, to the HTTP client and to the event socket alike.

use std::io::Cursor;
use std::sync::Arc;

use rustls::pki_types::CertificateDer;
use rustls::{ClientConfig, RootCertStore};
use tokio_tungstenite::Connector;

use crate::error::Error;

/// Split a PEM bundle into DER certificates.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] when the PEM cannot be read or holds no
/// certificate.
pub fn parse_pem(pem: &[u8]) -> Result<Vec<CertificateDer<'static>>, Error> {
    let certs = rustls_pemfile::certs(&mut Cursor::new(pem))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::InvalidConfig(format!("unreadable root certificate PEM: {e}")))?;
    if certs.is_empty() {
        return Err(Error::InvalidConfig("root certificate PEM contains no certificates".to_owned()));
    }
    Ok(certs)
}

/// Extra roots in the form the HTTP client takes.
pub(crate) fn http_roots(pem: &[u8]) -> Result<Vec<reqwest::Certificate>, Error> {
    parse_pem(pem)?
        .iter()
        .map(|cert| reqwest::Certificate::from_der(cert.as_ref()).map_err(Error::from))
        .collect()
}

/// TLS connector for the event socket: public roots plus the PEM's certificates.
pub(crate) fn ws_connector(pem: &[u8]) -> Result<Connector, Error> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    for cert in parse_pem(pem)? {
        roots.add(cert)?;
    }

    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Connector::Rustls(Arc::new(config)))
}
