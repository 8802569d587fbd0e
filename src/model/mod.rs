//! Value models consumed by editors and display projections.

pub mod period;
pub mod time;

pub use period::{ParsePeriodError, PeriodError, TimePeriod};
pub use time::{ParseTimeError, Time};
