//! Session tracking state shared between the host event handler and the fetch wrapper

use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::{
    ClientError,
    headers::{SESSION_ID_HEADER, SESSION_NAME_HEADER, sanitize_header_value},
    identifier::session_to_uuid,
    session::{Session, SessionEvent},
};

/// Prefix of the generated session name used when the host session has no title
pub const DEFAULT_FALLBACK_PREFIX: &str = "Session";

/// Derived tracking state for the most recently observed session
///
/// Both fields are empty until the first session is observed. A snapshot is
/// immutable once published, so the id and name always describe the same session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Pseudo-UUID derived from the session id
    pub session_uuid: String,
    /// Sanitized session title or generated fallback name
    pub session_name: String,
    /// The session the fields were derived from
    pub session: Option<Session>,
}

impl SessionSnapshot {
    fn derive(session: &Session, fallback_prefix: &str) -> Self {
        let name = session
            .display_title()
            .map(sanitize_header_value)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| sanitize_header_value(&fallback_name(fallback_prefix)));
        Self {
            session_uuid: session_to_uuid(&session.id),
            session_name: name,
            session: Some(session.clone()),
        }
    }

    /// True until a session has been observed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session_uuid.is_empty() && self.session_name.is_empty()
    }
}

fn fallback_name(prefix: &str) -> String {
    format!(
        "{prefix} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Cheap-to-clone handle to the session tracking state
///
/// The host event handler and every [`SessionFetch`](crate::SessionFetch) built from
/// the same tracker share one state. Cloning only copies an `Arc`.
///
/// Updates build a complete [`SessionSnapshot`] and swap it in under the lock;
/// readers clone the current `Arc<SessionSnapshot>` and release the lock, so a
/// request never sees the id of one session with the name of another.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    state: Arc<RwLock<Arc<SessionSnapshot>>>,
    fallback_prefix: Arc<str>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    /// Create a tracker with no observed session
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback_prefix(DEFAULT_FALLBACK_PREFIX)
    }

    /// Create a tracker whose generated names start with `prefix`
    ///
    /// Generated names are used for sessions without a title and look like
    /// `"{prefix} 2025-01-31T12:00:00.000Z"`.
    #[must_use]
    pub fn with_fallback_prefix(prefix: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Arc::new(SessionSnapshot::default()))),
            fallback_prefix: Arc::from(prefix.into()),
        }
    }

    /// Record a created or updated session
    ///
    /// `None` means no session is known yet; the current state is left untouched.
    pub fn observe(&self, session: Option<&Session>) {
        let Some(session) = session else {
            return;
        };

        let snapshot = Arc::new(SessionSnapshot::derive(session, &self.fallback_prefix));
        debug!(
            session_id = %session.id,
            session_uuid = %snapshot.session_uuid,
            session_name = %snapshot.session_name,
            "Tracking Helicone session"
        );
        *self.state.write() = snapshot;
    }

    /// Handle a typed session lifecycle event
    pub fn handle_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Created(props) | SessionEvent::Updated(props) => {
                self.observe(Some(&props.info));
            }
        }
    }

    /// Handle a raw host event
    ///
    /// Returns `Ok(true)` if the event was a session lifecycle event and the state
    /// was updated, `Ok(false)` if the event kind is not tracked.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::MalformedEvent` if a session event payload cannot be decoded.
    pub fn handle_host_event(&self, payload: &serde_json::Value) -> Result<bool, ClientError> {
        match SessionEvent::from_host_event(payload)? {
            Some(event) => {
                self.handle_event(event);
                Ok(true)
            }
            None => {
                trace!(event_type = ?payload.get("type"), "Ignoring host event");
                Ok(false)
            }
        }
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.state.read().clone()
    }

    /// The most recently observed session, if any
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.snapshot().session.clone()
    }

    /// Add the Helicone session headers the caller has not set
    ///
    /// Headers already present in `headers` (matched case-insensitively) are never
    /// overwritten. Nothing is added before the first session is observed.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        let snapshot = self.snapshot();

        if !snapshot.session_uuid.is_empty() && !headers.contains_key(&SESSION_ID_HEADER) {
            match HeaderValue::from_str(&snapshot.session_uuid) {
                Ok(value) => {
                    headers.insert(SESSION_ID_HEADER, value);
                }
                Err(e) => warn!(error = %e, "Skipping unencodable Helicone session id"),
            }
        }

        if !snapshot.session_name.is_empty() && !headers.contains_key(&SESSION_NAME_HEADER) {
            match HeaderValue::from_bytes(snapshot.session_name.as_bytes()) {
                Ok(value) => {
                    headers.insert(SESSION_NAME_HEADER, value);
                }
                Err(e) => warn!(error = %e, "Skipping unencodable Helicone session name"),
            }
        }
    }
}
