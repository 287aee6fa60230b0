//! Construction-time validation errors for daily schedules.

use crate::models::time::TimeOfDay;

/// Reasons a sequence of breakpoints is rejected at schedule construction.
///
/// Validation runs exactly once, when a schedule is built; a constructed
/// schedule is immutable and never re-checked. All variants are returned as
/// values — construction never panics on caller input.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The breakpoint sequence is empty.
    #[error("schedule has no breakpoints")]
    Empty,

    /// A breakpoint starts at or before the one preceding it.
    #[error("breakpoint at {0} is not after the preceding breakpoint")]
    Unsorted(TimeOfDay),

    /// A breakpoint offset lies outside the daily cycle `[0, 86400)`.
    #[error("breakpoint offset {0} is outside the daily cycle [0s, 86400s)")]
    OutOfRange(TimeOfDay),

    /// Two breakpoints share the same offset.
    #[error("duplicate breakpoint offset {0}")]
    DuplicateOffset(TimeOfDay),

    /// A rate value is NaN or infinite. Raised by the rate-schedule
    /// constructors only.
    #[error("rate at {0} is not finite")]
    NonFiniteValue(TimeOfDay),

    /// A rate value is negative and the active [`RatePolicy`] does not
    /// permit negative rates. Raised by the rate-schedule constructors only.
    ///
    /// [`RatePolicy`]: crate::models::schedule::RatePolicy
    #[error("negative rate at {0}")]
    NegativeValue(TimeOfDay),
}
