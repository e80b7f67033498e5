//! Relative time formatting ("5m ago") and the clock it reads.

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant, for reproducible output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock fixed at `secs` seconds since the epoch.
    #[must_use]
    pub fn at(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert fractional epoch seconds to a UTC time, if representable.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    // i64::MIN is exact as f64; its negation is the exclusive upper bound.
    let bound = -(i64::MIN as f64);
    if secs < -bound || secs >= bound {
        return None;
    }
    let nanos = (((ts - secs) * 1e9) as u32).min(999_999_999);
    DateTime::from_timestamp(secs as i64, nanos)
}

/// Seconds elapsed between `then` and `now`; negative for future times.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_secs(then: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let diff = now.signed_duration_since(then);
    diff.num_microseconds()
        .map_or_else(|| diff.num_seconds() as f64, |us| us as f64 / 1e6)
}

/// "Time ago" for `ts` against the wall clock.
#[must_use]
pub fn format_time(ts: f64) -> String {
    format_time_at(ts, Utc::now())
}

/// "Time ago" for `ts` against `now`.
///
/// `0` means "never" and renders blank. Timestamps outside the calendar
/// range are returned as given.
#[must_use]
pub fn format_time_at(ts: f64, now: DateTime<Utc>) -> String {
    if ts == 0.0 {
        return String::new();
    }
    let Some(then) = to_datetime(ts) else {
        return ts.to_string();
    };
    let secs = elapsed_secs(then, now);
    let ago = if secs > HOUR {
        format!("{:.0}h", secs / HOUR)
    } else if secs > MINUTE {
        format!("{:.0}m", secs / MINUTE)
    } else {
        format!("{secs:.0}s")
    };
    format!("{ago} ago")
}
