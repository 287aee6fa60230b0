use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of one logical schedule cycle, in seconds.
///
/// This is the period of the repeating daily profile and is always exactly
/// 86 400 seconds. It is distinct from the absolute length of a bound
/// calendar day, which the day-boundary resolver may report as 23, 24 or 25
/// hours across a DST transition.
pub const SECONDS_PER_DAY: i64 = 86_400;

const SECONDS_PER_HOUR: i64 = 3_600;

/// A time of day, counted in seconds past local midnight.
///
/// The type itself does not restrict its range; schedule construction
/// rejects values outside `[0, 86400)` with a validation error rather than
/// panicking here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(i64);

impl TimeOfDay {
    /// Create from raw seconds past midnight.
    pub fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Create from hours, minutes and seconds past midnight.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self(hours * SECONDS_PER_HOUR + minutes * 60 + seconds)
    }

    /// Raw seconds past midnight.
    pub fn seconds(&self) -> i64 {
        self.0
    }

    /// Fractional hours past midnight.
    pub fn hours(&self) -> f64 {
        self.0 as f64 / SECONDS_PER_HOUR as f64
    }

    /// This offset as a [`chrono::Duration`] from the day start.
    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.0)
    }

    /// Whether this offset lies inside the daily cycle `[0, 86400)`.
    pub fn is_in_cycle(&self) -> bool {
        (0..SECONDS_PER_DAY).contains(&self.0)
    }
}

impl From<i64> for TimeOfDay {
    fn from(seconds: i64) -> Self {
        TimeOfDay::new(seconds)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_in_cycle() {
            write!(
                f,
                "{:02}:{:02}:{:02}",
                self.0 / SECONDS_PER_HOUR,
                (self.0 % SECONDS_PER_HOUR) / 60,
                self.0 % 60
            )
        } else {
            write!(f, "{}s", self.0)
        }
    }
}
