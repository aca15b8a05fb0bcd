//! Timestamps stored in `createdAt` and `updatedAt`.
//!
//! Serialized as RFC 3339 strings in UTC (`2024-01-01T00:00:00Z`).

use chrono::{DateTime, Utc};

pub type Timestamp = DateTime<Utc>;

/// Current wall-clock time, used for every create and update.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
