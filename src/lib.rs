//! # Dosing Schedule Core
//!
//! Evaluation engine for repeating daily dosing schedules.
//!
//! A schedule is a 24-hour profile of rate values defined by a small ordered
//! set of time-of-day breakpoints. This crate validates such profiles once at
//! construction and then answers two questions about them:
//!
//! - **Range queries**: which values are in effect over an arbitrary absolute
//!   calendar range, which may span multiple days, daylight-saving
//!   transitions, and partial-day windows.
//! - **Cycle totals**: the integral of the rate function over one full
//!   86 400-second cycle, independent of any calendar day.
//!
//! ## Architecture
//!
//! - [`models`]: the schedule data model — breakpoints, validated daily
//!   schedules, and breakpoints bound to concrete days
//! - [`resolver`]: the day-boundary seam — mapping an absolute instant to the
//!   start of its local calendar day, DST-aware
//! - [`services`]: range-query evaluation walking a schedule across days
//! - [`error`]: construction-time validation errors
//!
//! ## Design
//!
//! Schedules are immutable values: validated once, cheaply cloneable, safe
//! for unlimited concurrent readers, and replaced rather than mutated. The
//! crate performs no I/O and holds no shared state; the only external call is
//! to the day-boundary resolver, whose failures propagate verbatim.

pub mod error;
pub mod models;
pub mod resolver;
pub mod services;

pub use error::ValidationError;
pub use models::schedule::{
    AbsoluteScheduleValue, BasalRateSchedule, DailySchedule, RatePolicy, RepeatingScheduleValue,
};
pub use models::time::{TimeOfDay, SECONDS_PER_DAY};
pub use resolver::{DayBoundaries, ResolverError};
