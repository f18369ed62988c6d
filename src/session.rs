//! Host session model and lifecycle events
//!
//! The host reports session lifecycle changes as JSON events of the form
//! `{"type": "session.created", "properties": {"info": {...}}}`. Only the
//! fields needed for tracking are decoded; everything else the host sends
//! (project id, directory, timestamps, ...) is ignored.

use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Event type emitted when the host creates a session
pub const SESSION_CREATED: &str = "session.created";

/// Event type emitted when the host updates a session (e.g. a new title)
pub const SESSION_UPDATED: &str = "session.updated";

/// A session as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque id, stable for the lifetime of the session
    pub id: String,

    /// Display title, may be absent and may change over time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title if present and non-empty
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Payload carried by session lifecycle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEventProperties {
    pub info: Session,
}

/// Session lifecycle event
///
/// Both variants are handled identically by the tracker; they are kept apart so
/// callers can log or filter by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties")]
pub enum SessionEvent {
    #[serde(rename = "session.created")]
    Created(SessionEventProperties),
    #[serde(rename = "session.updated")]
    Updated(SessionEventProperties),
}

impl SessionEvent {
    pub fn created(session: Session) -> Self {
        Self::Created(SessionEventProperties { info: session })
    }

    pub fn updated(session: Session) -> Self {
        Self::Updated(SessionEventProperties { info: session })
    }

    /// The session carried by this event
    #[must_use]
    pub fn session(&self) -> &Session {
        match self {
            Self::Created(props) | Self::Updated(props) => &props.info,
        }
    }

    #[must_use]
    pub fn into_session(self) -> Session {
        match self {
            Self::Created(props) | Self::Updated(props) => props.info,
        }
    }

    /// Event type string as the host spells it
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => SESSION_CREATED,
            Self::Updated(_) => SESSION_UPDATED,
        }
    }

    /// Decode a raw host event
    ///
    /// Returns `Ok(None)` for event kinds that are not session lifecycle events
    /// (message updates, file edits, ...), which the host sends on the same bus.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::MalformedEvent` if the event claims to be a session
    /// event but its payload cannot be decoded.
    pub fn from_host_event(payload: &serde_json::Value) -> Result<Option<Self>, ClientError> {
        let kind = payload.get("type").and_then(serde_json::Value::as_str);
        match kind {
            Some(kind @ (SESSION_CREATED | SESSION_UPDATED)) => {
                Self::deserialize(payload)
                    .map(Some)
                    .map_err(|source| ClientError::MalformedEvent {
                        kind: kind.to_string(),
                        source,
                    })
            }
            _ => Ok(None),
        }
    }
}
