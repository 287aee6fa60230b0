//! Computation over validated schedules.
//!
//! - [`range_query`]: walk a schedule day by day to produce the ordered
//!   entries overlapping an absolute range

pub mod range_query;
