//! Time period value model
//!
//! A `TimePeriod` is a pair of [`Time`] endpoints. The start may be later
//! than the end, which denotes a period wrapping past midnight (23:00-1:00
//! covers late evening and the first hour of the next day).

use super::time::{ParseTimeError, Time};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start: Time,
    pub end: Time,
}

impl TimePeriod {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// True iff both endpoints are valid. There is no ordering constraint
    /// between them.
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Whether `time` falls inside this period.
    ///
    /// - `start == end` denotes the single instant `end`.
    /// - `start < end` is an ordinary closed interval.
    /// - `start > end` wraps through midnight: contained iff at or after
    ///   `start`, or at or before `end`.
    ///
    /// Calling this with an invalid query time or on an invalid period is a
    /// precondition violation and reports an error rather than a guess.
    pub fn is_in_period(&self, time: Time) -> Result<bool, PeriodError> {
        if !time.is_valid() {
            return Err(PeriodError::InvalidTime(time));
        }
        if !self.is_valid() {
            return Err(PeriodError::InvalidPeriod(*self));
        }
        Ok(match self.start.cmp(&self.end) {
            std::cmp::Ordering::Equal => time == self.end,
            std::cmp::Ordering::Less => self.start <= time && time <= self.end,
            std::cmp::Ordering::Greater => time >= self.start || time <= self.end,
        })
    }

    /// Convenience form of [`TimePeriod::is_in_period`] taking raw fields.
    pub fn is_in_period_hms(&self, hour: i32, minute: i32, second: i32) -> Result<bool, PeriodError> {
        self.is_in_period(Time::new(hour, minute, second))
    }
}

impl fmt::Display for TimePeriod {
    /// Canonical form: `<start>-<end>`, e.g. `23:00:00-1:00:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimePeriod {
    type Err = ParsePeriodError;

    /// Parses `<start>-<end>` with exactly one `-` separator and a [`Time`]
    /// on each side.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut halves = s.split('-');
        let start = halves.next().unwrap_or("");
        let end = halves.next().ok_or(ParsePeriodError::MissingSeparator)?;
        if halves.next().is_some() {
            return Err(ParsePeriodError::ExtraSeparator);
        }
        if start.is_empty() {
            return Err(ParsePeriodError::MissingStart);
        }
        if end.is_empty() {
            return Err(ParsePeriodError::MissingEnd);
        }
        Ok(TimePeriod {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

/// Format error raised by [`TimePeriod`]'s `FromStr` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePeriodError {
    MissingSeparator,
    ExtraSeparator,
    MissingStart,
    MissingEnd,
    Time(ParseTimeError),
}

impl From<ParseTimeError> for ParsePeriodError {
    fn from(e: ParseTimeError) -> Self {
        ParsePeriodError::Time(e)
    }
}

impl fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePeriodError::MissingSeparator => write!(f, "'-' not found"),
            ParsePeriodError::ExtraSeparator => write!(f, "more than one '-' separator"),
            ParsePeriodError::MissingStart => write!(f, "start time not found"),
            ParsePeriodError::MissingEnd => write!(f, "end time not found"),
            ParsePeriodError::Time(e) => write!(f, "bad time segment: {e}"),
        }
    }
}

impl std::error::Error for ParsePeriodError {}

/// Precondition error from containment checks on invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodError {
    InvalidTime(Time),
    InvalidPeriod(TimePeriod),
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvalidTime(t) => write!(f, "invalid query time: {t}"),
            PeriodError::InvalidPeriod(p) => write!(f, "invalid period: {p}"),
        }
    }
}

impl std::error::Error for PeriodError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: i32, m: i32, s: i32) -> Time {
        Time::new(h, m, s)
    }

    #[test]
    fn parse_period() {
        assert_eq!(
            "0:00:00-1:23:45".parse::<TimePeriod>().unwrap(),
            TimePeriod::new(t(0, 0, 0), t(1, 23, 45))
        );
        assert_eq!(
            "23:59-0:01".parse::<TimePeriod>().unwrap(),
            TimePeriod::new(t(23, 59, 0), t(0, 1, 0))
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(
            "1:00".parse::<TimePeriod>(),
            Err(ParsePeriodError::MissingSeparator)
        );
        assert_eq!(
            "-1:00".parse::<TimePeriod>(),
            Err(ParsePeriodError::MissingStart)
        );
        assert_eq!(
            "1:00-".parse::<TimePeriod>(),
            Err(ParsePeriodError::MissingEnd)
        );
        assert_eq!(
            "1:00-2:00-3:00".parse::<TimePeriod>(),
            Err(ParsePeriodError::ExtraSeparator)
        );
        assert!(matches!(
            "1:-2:00".parse::<TimePeriod>(),
            Err(ParsePeriodError::Time(_))
        ));
    }

    #[test]
    fn containment_non_wrapping() {
        let p = TimePeriod::new(t(1, 0, 0), t(5, 0, 0));
        assert!(p.is_in_period(t(3, 0, 0)).unwrap());
        assert!(p.is_in_period(t(1, 0, 0)).unwrap());
        assert!(p.is_in_period(t(5, 0, 0)).unwrap());
        assert!(!p.is_in_period(t(6, 0, 0)).unwrap());
        assert!(!p.is_in_period(t(0, 59, 59)).unwrap());
    }

    #[test]
    fn containment_wrapping_past_midnight() {
        let p = TimePeriod::new(t(23, 0, 0), t(1, 0, 0));
        assert!(p.is_in_period(t(23, 30, 0)).unwrap());
        assert!(p.is_in_period(t(0, 30, 0)).unwrap());
        assert!(p.is_in_period(t(23, 0, 0)).unwrap());
        assert!(p.is_in_period(t(1, 0, 0)).unwrap());
        assert!(!p.is_in_period(t(12, 0, 0)).unwrap());
    }

    #[test]
    fn containment_single_instant() {
        let p = TimePeriod::new(t(5, 0, 0), t(5, 0, 0));
        assert!(p.is_in_period(t(5, 0, 0)).unwrap());
        assert!(!p.is_in_period(t(5, 0, 1)).unwrap());
        assert!(!p.is_in_period(t(4, 59, 59)).unwrap());
    }

    #[test]
    fn containment_rejects_invalid_operands() {
        let p = TimePeriod::new(t(1, 0, 0), t(5, 0, 0));
        assert_eq!(
            p.is_in_period(t(25, 0, 0)),
            Err(PeriodError::InvalidTime(t(25, 0, 0)))
        );

        let bad = TimePeriod::new(t(25, 0, 0), t(5, 0, 0));
        assert_eq!(
            bad.is_in_period(t(3, 0, 0)),
            Err(PeriodError::InvalidPeriod(bad))
        );
    }

    #[test]
    fn containment_hms_form() {
        let p = TimePeriod::new(t(1, 0, 0), t(5, 0, 0));
        assert!(p.is_in_period_hms(3, 0, 0).unwrap());
        assert!(!p.is_in_period_hms(6, 0, 0).unwrap());
    }

    #[test]
    fn display_round_trips() {
        let p = TimePeriod::new(t(23, 59, 1), t(0, 1, 0));
        assert_eq!(p.to_string(), "23:59:01-0:01:00");
        assert_eq!(p.to_string().parse::<TimePeriod>().unwrap(), p);
    }
}
