//! Repeating daily schedules and their breakpoints.
//!
//! A [`DailySchedule`] is a validated, immutable, ordered set of
//! time-of-day breakpoints describing a piecewise-constant function with a
//! period of one logical day. Each breakpoint's value holds from its offset
//! until the next breakpoint's offset, the last wrapping past midnight to
//! the first breakpoint of the following day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::time::{TimeOfDay, SECONDS_PER_DAY};
use crate::resolver::{DayBoundaries, ResolverResult};
use crate::services::range_query;

/// One breakpoint of a repeating daily schedule: starting at `start_time`
/// (seconds past local midnight), the scheduled value becomes `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatingScheduleValue<T> {
    #[serde(rename = "offset_seconds")]
    pub start_time: TimeOfDay,
    pub value: T,
}

impl<T> RepeatingScheduleValue<T> {
    pub fn new(start_time: impl Into<TimeOfDay>, value: T) -> Self {
        Self {
            start_time: start_time.into(),
            value,
        }
    }
}

/// A breakpoint bound to one concrete calendar day: the scheduled value
/// becomes `value` at the absolute instant `start_date`.
///
/// Produced on demand by range queries and day binding; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteScheduleValue<T> {
    pub start_date: DateTime<Utc>,
    pub value: T,
}

/// Validation policy for rate schedules.
///
/// Whether negative rates are acceptable is a policy of the embedding
/// domain, not an invariant of the schedule model; the default follows the
/// dosing convention and rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatePolicy {
    /// Accept negative rate values.
    pub allow_negative: bool,
}

/// A validated, immutable ordered set of daily breakpoints.
///
/// Constructed once through [`DailySchedule::new`] (or the rate-specific
/// constructors), then read concurrently by any number of range queries and
/// total calculations. There is no mutation path: a changed configuration
/// is a new schedule value replacing the old one.
///
/// Serializes transparently as the ordered breakpoint array, and
/// deserialization re-runs offset validation, so a persisted schedule
/// round-trips to an equal, equally valid value.
///
/// # Examples
///
/// ```
/// use dosing_schedule::{DailySchedule, RepeatingScheduleValue, TimeOfDay};
///
/// let schedule = DailySchedule::with_rates(vec![
///     RepeatingScheduleValue::new(TimeOfDay::from_hms(0, 0, 0), 1.0),
///     RepeatingScheduleValue::new(TimeOfDay::from_hms(4, 0, 0), 0.5),
/// ])
/// .unwrap();
///
/// // 4 h at 1.0 U/h plus 20 h at 0.5 U/h.
/// assert_eq!(schedule.total(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    bound(
        serialize = "T: Serialize + Clone",
        deserialize = "T: serde::de::DeserializeOwned"
    ),
    try_from = "Vec<RepeatingScheduleValue<T>>",
    into = "Vec<RepeatingScheduleValue<T>>"
)]
pub struct DailySchedule<T> {
    items: Vec<RepeatingScheduleValue<T>>,
}

/// The daily basal insulin profile: a rate schedule in units per hour.
pub type BasalRateSchedule = DailySchedule<f64>;

impl<T> DailySchedule<T> {
    /// Build a schedule from an ordered breakpoint sequence.
    ///
    /// Fails when the sequence is empty, not strictly ascending, contains a
    /// duplicate offset, or contains an offset outside `[0, 86400)`. This is
    /// the only place invariants are checked; every other operation assumes
    /// them.
    pub fn new(items: Vec<RepeatingScheduleValue<T>>) -> Result<Self, ValidationError> {
        validate_offsets(&items)?;
        Ok(Self { items })
    }

    /// The breakpoints, in schedule order. Never empty.
    pub fn items(&self) -> &[RepeatingScheduleValue<T>] {
        &self.items
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> DailySchedule<T> {
    /// Bind every breakpoint to a concrete day starting at `day_start`,
    /// mapping `(offset, value)` to `(day_start + offset, value)` in
    /// schedule order.
    ///
    /// Offsets are absolute seconds from the day start; on a DST-shortened
    /// or -lengthened day they intentionally drift relative to wall-clock
    /// labels, keeping dosing intervals their scheduled physical length.
    pub fn bind_day(&self, day_start: DateTime<Utc>) -> Vec<AbsoluteScheduleValue<T>> {
        self.items
            .iter()
            .map(|item| AbsoluteScheduleValue {
                start_date: day_start + item.start_time.as_duration(),
                value: item.value.clone(),
            })
            .collect()
    }

    /// The ordered sequence of schedule entries overlapping `[start, end)`.
    ///
    /// The first entry is always the one in effect at `start`, even when it
    /// took effect earlier (possibly on the previous calendar day); every
    /// subsequent entry starts strictly before `end`. `start > end` yields
    /// an empty sequence; `start == end` yields exactly the active entry.
    ///
    /// Day boundaries are re-resolved through `boundaries` for every day
    /// visited, so ranges spanning DST transitions bind each day to its
    /// actual start. Resolver failures propagate verbatim.
    pub fn between(
        &self,
        boundaries: &impl DayBoundaries,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResolverResult<Vec<AbsoluteScheduleValue<T>>> {
        range_query::between(self, boundaries, start, end)
    }

    /// The value in effect at `instant`.
    pub fn value_at(
        &self,
        boundaries: &impl DayBoundaries,
        instant: DateTime<Utc>,
    ) -> ResolverResult<T> {
        range_query::value_at(self, boundaries, instant)
    }
}

impl DailySchedule<f64> {
    /// Build a rate schedule under the default policy: finite,
    /// non-negative rates.
    pub fn with_rates(items: Vec<RepeatingScheduleValue<f64>>) -> Result<Self, ValidationError> {
        Self::with_rate_policy(items, RatePolicy::default())
    }

    /// Build a rate schedule under an explicit policy. Non-finite rates are
    /// rejected unconditionally; negative rates per the policy.
    pub fn with_rate_policy(
        items: Vec<RepeatingScheduleValue<f64>>,
        policy: RatePolicy,
    ) -> Result<Self, ValidationError> {
        let schedule = Self::new(items)?;
        for item in &schedule.items {
            if !item.value.is_finite() {
                return Err(ValidationError::NonFiniteValue(item.start_time));
            }
            if !policy.allow_negative && item.value < 0.0 {
                return Err(ValidationError::NegativeValue(item.start_time));
            }
        }
        Ok(schedule)
    }

    /// Integral of the rate over one full 86 400-second cycle, in
    /// rate-units × hours.
    ///
    /// Operates purely on the repeating definition: the logical cycle is
    /// always exactly 24 hours here, regardless of how long any particular
    /// bound calendar day is. DST belongs to range queries, not totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use dosing_schedule::{BasalRateSchedule, RepeatingScheduleValue, TimeOfDay};
    ///
    /// let schedule = BasalRateSchedule::with_rates(vec![
    ///     RepeatingScheduleValue::new(TimeOfDay::from_hms(0, 0, 0), 1.0),
    ///     RepeatingScheduleValue::new(TimeOfDay::from_hms(4, 0, 0), 0.5),
    ///     RepeatingScheduleValue::new(TimeOfDay::from_hms(8, 0, 0), 1.5),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(schedule.total(), 1.0 * 4.0 + 0.5 * 4.0 + 1.5 * 16.0);
    /// ```
    pub fn total(&self) -> f64 {
        let mut units = 0.0;
        for (index, item) in self.items.iter().enumerate() {
            let interval_end = self
                .items
                .get(index + 1)
                .map_or(SECONDS_PER_DAY, |next| next.start_time.seconds());
            let duration_hours = (interval_end - item.start_time.seconds()) as f64 / 3600.0;
            units += item.value * duration_hours;
        }
        units
    }
}

impl<T> TryFrom<Vec<RepeatingScheduleValue<T>>> for DailySchedule<T> {
    type Error = ValidationError;

    fn try_from(items: Vec<RepeatingScheduleValue<T>>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<T> From<DailySchedule<T>> for Vec<RepeatingScheduleValue<T>> {
    fn from(schedule: DailySchedule<T>) -> Self {
        schedule.items
    }
}

fn validate_offsets<T>(items: &[RepeatingScheduleValue<T>]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty);
    }
    for item in items {
        if !item.start_time.is_in_cycle() {
            return Err(ValidationError::OutOfRange(item.start_time));
        }
    }
    for pair in items.windows(2) {
        if pair[1].start_time == pair[0].start_time {
            return Err(ValidationError::DuplicateOffset(pair[1].start_time));
        }
        if pair[1].start_time < pair[0].start_time {
            return Err(ValidationError::Unsorted(pair[1].start_time));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(seconds: i64, value: f64) -> RepeatingScheduleValue<f64> {
        RepeatingScheduleValue::new(seconds, value)
    }

    #[test]
    fn test_create_empty_fails() {
        assert_eq!(
            DailySchedule::<f64>::new(vec![]).unwrap_err(),
            ValidationError::Empty
        );
    }

    #[test]
    fn test_create_duplicate_offset_fails() {
        assert_eq!(
            DailySchedule::new(vec![entry(0, 1.0), entry(0, 2.0)]).unwrap_err(),
            ValidationError::DuplicateOffset(TimeOfDay::new(0))
        );
    }

    #[test]
    fn test_create_unsorted_fails() {
        assert_eq!(
            DailySchedule::new(vec![entry(100, 1.0), entry(50, 2.0)]).unwrap_err(),
            ValidationError::Unsorted(TimeOfDay::new(50))
        );
    }

    #[test]
    fn test_create_out_of_range_fails() {
        assert_eq!(
            DailySchedule::new(vec![entry(-1, 1.0)]).unwrap_err(),
            ValidationError::OutOfRange(TimeOfDay::new(-1))
        );
        assert_eq!(
            DailySchedule::new(vec![entry(86_400, 1.0)]).unwrap_err(),
            ValidationError::OutOfRange(TimeOfDay::new(86_400))
        );
    }

    #[test]
    fn test_create_single_breakpoint_is_valid() {
        let schedule = DailySchedule::new(vec![entry(21_600, 0.8)]).unwrap();
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_rate_constructor_rejects_nan() {
        assert_eq!(
            BasalRateSchedule::with_rates(vec![entry(0, f64::NAN)]).unwrap_err(),
            ValidationError::NonFiniteValue(TimeOfDay::new(0))
        );
    }

    #[test]
    fn test_rate_constructor_rejects_negative_by_default() {
        assert_eq!(
            BasalRateSchedule::with_rates(vec![entry(0, -0.5)]).unwrap_err(),
            ValidationError::NegativeValue(TimeOfDay::new(0))
        );
    }

    #[test]
    fn test_rate_policy_can_allow_negative() {
        let schedule = BasalRateSchedule::with_rate_policy(
            vec![entry(0, -0.5)],
            RatePolicy {
                allow_negative: true,
            },
        );
        assert!(schedule.is_ok());
    }

    #[test]
    fn test_offset_errors_take_priority_over_rate_errors() {
        // Offset validation runs first, matching the generic constructor.
        assert_eq!(
            BasalRateSchedule::with_rates(vec![entry(100, f64::NAN), entry(50, 1.0)]).unwrap_err(),
            ValidationError::Unsorted(TimeOfDay::new(50))
        );
    }

    #[test]
    fn test_bind_day_preserves_order_and_offsets() {
        let schedule =
            DailySchedule::new(vec![entry(0, 1.0), entry(7_200, 0.5), entry(61_200, 1.2)]).unwrap();
        let day_start = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).single().unwrap();

        let bound = schedule.bind_day(day_start);

        assert_eq!(bound.len(), 3);
        assert_eq!(bound[0].start_date, day_start);
        assert_eq!(bound[1].start_date, day_start + chrono::Duration::hours(2));
        assert_eq!(bound[2].start_date, day_start + chrono::Duration::hours(17));
        assert_eq!(bound[2].value, 1.2);
    }

    #[test]
    fn test_total_integrates_one_cycle() {
        let schedule = BasalRateSchedule::with_rates(vec![
            entry(0, 1.0),
            entry(4 * 3600, 0.5),
            entry(8 * 3600, 1.5),
        ])
        .unwrap();

        assert!((schedule.total() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_single_breakpoint_covers_whole_day() {
        let schedule = BasalRateSchedule::with_rates(vec![entry(6 * 3600, 0.5)]).unwrap();
        assert!((schedule.total() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_serde_round_trip_is_breakpoint_array() {
        let schedule =
            BasalRateSchedule::with_rates(vec![entry(0, 1.0), entry(7_200, 0.85)]).unwrap();

        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(
            json,
            r#"[{"offset_seconds":0,"value":1.0},{"offset_seconds":7200,"value":0.85}]"#
        );

        let restored: BasalRateSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, schedule);
    }

    #[test]
    fn test_deserialization_re_validates() {
        let result: Result<DailySchedule<f64>, _> = serde_json::from_str(
            r#"[{"offset_seconds":7200,"value":1.0},{"offset_seconds":0,"value":0.5}]"#,
        );
        assert!(result.is_err());

        let empty: Result<DailySchedule<f64>, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }
}
