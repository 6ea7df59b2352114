//! Timestamp representation and conversion.
//!
//! All timestamps are stored as [`Ticks`]: 100-nanosecond units counted from
//! 1 Jan 1601 UTC (the representation the WinPhone backup format uses on the
//! wire). The Android backup format uses milliseconds since 1 Jan 1970 UTC;
//! conversion between the two is exact integer arithmetic in the millisecond
//! domain, with no timezone or calendar step involved.

use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds between 1 Jan 1601 and 1 Jan 1970 (both UTC).
const EPOCH_DIFF_MS: i64 = 11_644_473_600_000;

/// A point in time in 100ns units since 1 Jan 1601 UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub i64);

impl Ticks {
    /// Convert milliseconds since the Unix epoch to ticks.
    pub fn from_epoch_ms(ms: i64) -> Self {
        Ticks((ms + EPOCH_DIFF_MS) * 10_000)
    }

    /// Convert ticks to milliseconds since the Unix epoch.
    ///
    /// Sub-millisecond precision is truncated; values produced by
    /// [`Ticks::from_epoch_ms`] round-trip exactly.
    pub fn to_epoch_ms(self) -> i64 {
        self.0 / 10_000 - EPOCH_DIFF_MS
    }

    /// The current time, at millisecond precision.
    pub fn now() -> Self {
        Self::from_epoch_ms(Utc::now().timestamp_millis())
    }

    /// The corresponding UTC calendar time, for display only.
    /// Returns `None` for values outside chrono's representable range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.to_epoch_ms()).single()
    }
}
