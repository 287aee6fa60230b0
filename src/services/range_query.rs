//! Range queries over a repeating daily schedule.
//!
//! The walk starts at the day containing the query start, emits the entry in
//! effect when the window opens, then advances breakpoint by breakpoint in
//! cyclic order — wrapping into each following calendar day by re-resolving
//! that day's start — until a candidate entry would start at or after the
//! query end.

use chrono::{DateTime, Duration, Utc};

use crate::models::schedule::{AbsoluteScheduleValue, DailySchedule};
use crate::resolver::{DayBoundaries, ResolverResult};

// Probe offsets for reaching the neighbouring calendar day from a day start
// without assuming a fixed day length. Civil days run 23 to 25 hours, so
// day_start + 30 h always falls inside the next day and day_start - 12 h
// inside the previous one.
fn next_day_probe() -> Duration {
    Duration::hours(30)
}

fn previous_day_probe() -> Duration {
    Duration::hours(12)
}

pub(crate) fn between<T: Clone>(
    schedule: &DailySchedule<T>,
    boundaries: &impl DayBoundaries,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ResolverResult<Vec<AbsoluteScheduleValue<T>>> {
    if start > end {
        return Ok(Vec::new());
    }

    let mut day_start = boundaries.start_of_day(start)?;
    let first_day = schedule.bind_day(day_start);
    let next_index = first_day.partition_point(|entry| entry.start_date <= start);

    // The first emitted entry is the one in effect at `start`, even when it
    // took effect before the window opened. When `start` precedes the day's
    // first breakpoint, that is the previous day's last entry.
    let mut out = Vec::new();
    if next_index == 0 {
        out.push(previous_day_carryover(schedule, boundaries, day_start)?);
    } else {
        out.push(first_day[next_index - 1].clone());
    }

    let mut days_visited = 1u32;
    let mut pending = first_day[next_index..].to_vec();
    'walk: loop {
        for entry in pending {
            if entry.start_date >= end {
                break 'walk;
            }
            out.push(entry);
        }
        day_start = boundaries.start_of_day(day_start + next_day_probe())?;
        days_visited += 1;
        pending = schedule.bind_day(day_start);
    }

    log::trace!(
        "between {start}..{end}: {} entries over {days_visited} day(s)",
        out.len()
    );
    Ok(out)
}

pub(crate) fn value_at<T: Clone>(
    schedule: &DailySchedule<T>,
    boundaries: &impl DayBoundaries,
    instant: DateTime<Utc>,
) -> ResolverResult<T> {
    let day_start = boundaries.start_of_day(instant)?;
    let bound = schedule.bind_day(day_start);
    match bound.partition_point(|entry| entry.start_date <= instant) {
        0 => Ok(previous_day_carryover(schedule, boundaries, day_start)?.value),
        index => Ok(bound[index - 1].value.clone()),
    }
}

/// The last breakpoint of the day before the one starting at `day_start`,
/// bound through the resolver rather than by naive subtraction.
fn previous_day_carryover<T: Clone>(
    schedule: &DailySchedule<T>,
    boundaries: &impl DayBoundaries,
    day_start: DateTime<Utc>,
) -> ResolverResult<AbsoluteScheduleValue<T>> {
    let previous_day_start = boundaries.start_of_day(day_start - previous_day_probe())?;
    // Validated schedules are never empty.
    let last = &schedule.items()[schedule.len() - 1];
    Ok(AbsoluteScheduleValue {
        start_date: previous_day_start + last.start_time.as_duration(),
        value: last.value.clone(),
    })
}
