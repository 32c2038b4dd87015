//! Client for the locally running Integrator telephony/CRM service.
//!
//! Two independent pieces share one [`Config`]:
//!
//! - [`IntegratorClient`] issues HTTP(S) requests to
//!   `<scheme>://localhost:<port>/api/v1/<Route>` and classifies every reply
//!   into a [`Response`] envelope by status code alone.
//! - [`events::subscribe`] opens the session's WebSocket event feed and hands
//!   each decoded [`Event`] to a caller-supplied handler.
//!
//! ```no_run
//! use integrator_api::{ConfigOverrides, IntegratorClient};
//!
//! # async fn demo() -> Result<(), integrator_api::Error> {
//! let client = IntegratorClient::new(ConfigOverrides::default())?;
//! if client.init().await.is_initialized() {
//!     let version = client.version().await?;
//!     println!("{:?}", version.data());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod events;
pub mod form;
pub mod tls;
pub mod types;

pub use client::{InitFailure, InitOutcome, IntegratorClient, route};
pub use config::{Config, ConfigOverrides};
pub use endpoint::Endpoint;
pub use envelope::{ErrorBody, ErrorFields, Response};
pub use error::Error;
pub use events::{ConnectionState, Event, EventConnection, EventHandler};
