//! Day-boundary resolution.
//!
//! Range queries walk a schedule forward one calendar day at a time, and the
//! length of a calendar day in absolute seconds is not a constant: across a
//! daylight-saving transition a civil day may last 23, 24 or 25 hours. The
//! [`DayBoundaries`] trait is the seam through which the surrounding system
//! supplies that knowledge; the query engine never assumes a fixed day
//! length and re-resolves every day boundary it visits.
//!
//! Two implementations are provided:
//!
//! - [`chrono_tz::Tz`]: DST-correct local midnight for an IANA timezone
//! - [`chrono::Utc`]: fixed 86 400-second days, for callers that have no
//!   civil-timezone concern

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Result type for day-boundary resolution.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Failure to resolve a day boundary.
///
/// Surfaced verbatim from range queries; the query engine never substitutes
/// a default day start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolverError {
    /// No valid start-of-day instant could be found for a local calendar
    /// day. Not produced by the bundled resolvers for any real IANA zone;
    /// custom resolvers may report it for unresolvable environments.
    #[error("no valid start-of-day instant for {date} in {timezone}")]
    UnresolvableDayStart {
        date: NaiveDate,
        timezone: String,
    },
}

/// Maps an absolute instant to the start of the local calendar day that
/// contains it.
///
/// Implementations must be fast, deterministic, side-effect-free functions
/// of the instant and the ambient timezone rules. The returned instant is
/// the first valid instant of the day: normally local midnight, but later
/// when a DST gap swallows midnight itself.
pub trait DayBoundaries {
    /// Start of the local calendar day containing `instant`.
    fn start_of_day(&self, instant: DateTime<Utc>) -> ResolverResult<DateTime<Utc>>;
}

impl DayBoundaries for Utc {
    fn start_of_day(&self, instant: DateTime<Utc>) -> ResolverResult<DateTime<Utc>> {
        let midnight = instant.date_naive().and_time(NaiveTime::MIN);
        Ok(Utc.from_utc_datetime(&midnight))
    }
}

impl DayBoundaries for Tz {
    fn start_of_day(&self, instant: DateTime<Utc>) -> ResolverResult<DateTime<Utc>> {
        let date = instant.with_timezone(self).date_naive();
        local_day_start(*self, date)
    }
}

/// First valid instant of `date` in `tz`.
///
/// Local midnight may not exist (a DST gap at 00:00) or may occur twice (a
/// fall-back across midnight). Candidates are probed on a 15-minute grid —
/// every historical DST shift is a multiple of 15 minutes — taking the
/// earlier occurrence when ambiguous.
fn local_day_start(tz: Tz, date: NaiveDate) -> ResolverResult<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    for quarter_hour in 0..=12 {
        let candidate = midnight + Duration::minutes(15 * quarter_hour);
        if let Some(local) = tz.from_local_datetime(&candidate).earliest() {
            return Ok(local.with_timezone(&Utc));
        }
    }
    Err(ResolverError::UnresolvableDayStart {
        date,
        timezone: tz.name().to_string(),
    })
}
