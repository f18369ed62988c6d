//! Deterministic session identifiers
//!
//! Host session ids are opaque strings. Helicone groups requests by a UUID-shaped
//! session id, so the host id is hashed into a stable pseudo-UUID that can be
//! correlated across runs.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Group lengths of the canonical 8-4-4-4-12 layout
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Length of a rendered pseudo-UUID including hyphens
pub const SESSION_UUID_LEN: usize = 36;

/// Convert a host session id into a pseudo-UUID.
///
/// The id is hashed with zero-keyed SipHash-1-3 into 64 bits, rendered as 16
/// lowercase hex digits, mirrored to 32 digits and grouped 8-4-4-4-12. No
/// version or variant bits are set. The mirroring means the identifier carries
/// only 64 bits of entropy; downstream correlation relies on that exact layout.
///
/// # Example
///
/// ```
/// use kodegen_helicone_session::identifier::session_to_uuid;
///
/// let id = session_to_uuid("ses_01JABCDEF");
/// assert_eq!(id.len(), 36);
/// assert_eq!(id, session_to_uuid("ses_01JABCDEF"));
/// ```
#[must_use]
pub fn session_to_uuid(session_id: &str) -> String {
    let mut hasher = SipHasher13::new();
    hasher.write(session_id.as_bytes());
    let hash_hex = format!("{:016x}", hasher.finish());

    let full_hex = hash_hex.repeat(2);
    let mut out = String::with_capacity(SESSION_UUID_LEN);
    let mut start = 0;
    for (idx, len) in GROUPS.iter().enumerate() {
        if idx > 0 {
            out.push('-');
        }
        out.push_str(&full_hex[start..start + len]);
        start += len;
    }
    out
}

/// Check whether `value` has the pseudo-UUID shape produced by [`session_to_uuid`]
///
/// 36 characters, hyphens at offsets 8, 13, 18 and 23, lowercase hex elsewhere.
#[must_use]
pub fn is_session_uuid(value: &str) -> bool {
    value.len() == SESSION_UUID_LEN
        && value.char_indices().all(|(idx, c)| match idx {
            8 | 13 | 18 | 23 => c == '-',
            _ => matches!(c, '0'..='9' | 'a'..='f'),
        })
}
