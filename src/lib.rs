//! Helicone session tracking for AI agent HTTP traffic.
//!
//! The host application reports session lifecycle events to a [`SessionTracker`].
//! A [`SessionFetch`] built on the same tracker wraps the HTTP transport and tags
//! every outbound request with `Helicone-Session-Id` (a stable pseudo-UUID derived
//! from the session id) and `Helicone-Session-Name` (the sanitized session title).
//! Headers the caller already set are left alone.
//!
//! # Example
//!
//! ```ignore
//! use kodegen_helicone_session::{HeliconeSession, RequestOptions};
//! use reqwest::Method;
//!
//! let helicone = HeliconeSession::builder().build()?;
//!
//! // From the host's event callback
//! helicone.tracker().handle_host_event(&event)?;
//!
//! // From the provider integration
//! let url = helicone.endpoint("v1/messages")?;
//! let response = helicone
//!     .fetch()
//!     .fetch(url, RequestOptions::new(Method::POST).body(body))
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod headers;
pub mod identifier;
pub mod session;
pub mod tracker;
pub mod transport;

pub use config::{HeliconeSession, HeliconeSessionBuilder};
pub use error::ClientError;
pub use headers::{HELICONE_SESSION_ID, HELICONE_SESSION_NAME, sanitize_header_value};
pub use identifier::session_to_uuid;
pub use session::{Session, SessionEvent};
pub use tracker::{SessionSnapshot, SessionTracker};
pub use transport::{RequestOptions, SessionFetch, Transport};
