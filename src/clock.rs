//! Wall-clock timestamps for ledger and counter rows.
//!
//! Rows are stamped in a fixed UTC offset rather than the host zone so that
//! a database file reads the same wherever it is opened.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use tracing::warn;

/// Timestamp format stored in `updated_at` columns.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Produces `updated_at` stamps.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: FixedOffset,
}

impl Clock {
    /// Clock for a UTC offset in minutes. Out-of-range offsets fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!("UTC offset of {} minutes is out of range; using UTC", minutes);
                Utc.fix()
            });
        Self { offset }
    }

    /// Stamp for the current instant.
    pub fn now(&self) -> String {
        self.stamp(Utc::now())
    }

    /// Stamp for a given instant.
    pub fn stamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset).format(STAMP_FORMAT).to_string()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::with_offset_minutes(0)
    }
}
