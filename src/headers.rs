// packages/kodegen-helicone-session/src/headers.rs
//! Helicone session headers attached to outbound LLM provider requests.
//!
//! These headers let the Helicone gateway group every request issued during one
//! assistant session under a single session id and display name.
//!
//! Note: Header names are matched case-insensitively by `HeaderMap`, so a caller
//! that already set `helicone-session-id` keeps its own value.

use reqwest::header::HeaderName;

/// Header carrying the deterministic pseudo-UUID derived from the host session id.
pub const HELICONE_SESSION_ID: &str = "Helicone-Session-Id";

/// Header carrying the human-readable session name (sanitized session title).
pub const HELICONE_SESSION_NAME: &str = "Helicone-Session-Name";

// `HeaderName` stores names lowercased
pub(crate) const SESSION_ID_HEADER: HeaderName = HeaderName::from_static("helicone-session-id");
pub(crate) const SESSION_NAME_HEADER: HeaderName =
    HeaderName::from_static("helicone-session-name");

/// Strip characters that could split a header or a request.
///
/// Removes CR, LF and every other ASCII control character (`0x00..=0x1F`, `0x7F`),
/// then trims surrounding whitespace. A value made only of control characters and
/// whitespace becomes the empty string, which callers treat as "no value".
///
/// # Example
///
/// ```
/// use kodegen_helicone_session::headers::sanitize_header_value;
///
/// assert_eq!(sanitize_header_value("  evil\r\nX-Injected: 1 "), "evilX-Injected: 1");
/// assert_eq!(sanitize_header_value(" \n\t "), "");
/// ```
#[must_use]
pub fn sanitize_header_value(value: &str) -> String {
    let stripped: String = value.chars().filter(|c| !c.is_ascii_control()).collect();
    stripped.trim().to_string()
}
