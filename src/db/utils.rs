//! Id and timestamp helpers shared by the store and lifecycle operations.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Generate a prefix-tagged id, e.g. `card-0b5c6f0e-...`.
///
/// The suffix is a random v4 UUID, so ids can be minted by independent
/// operations without a counter or collision check.
pub fn make_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Current UTC time as RFC 3339 with millisecond precision.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Trimmed copy of `value`, or `None` when it is blank.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
