//! Time-of-day value model
//!
//! A `Time` is an hour/minute/second triple with no attached date or zone.
//! Construction never clamps or validates; `is_valid` is an explicit,
//! separate check so that transient out-of-range values (e.g. freshly
//! deserialized ones) can exist until a caller decides what to do with them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A time of day. Ordering is lexicographic by (hour, minute, second).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Time {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl Time {
    pub fn new(hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// True iff hour is in 0..=23 and minute/second are in 0..=59.
    pub fn is_valid(&self) -> bool {
        (0..=23).contains(&self.hour)
            && (0..=59).contains(&self.minute)
            && (0..=59).contains(&self.second)
    }
}

impl fmt::Display for Time {
    /// Canonical form: hour unpadded, minute and second zero-padded
    /// (e.g. `9:08:07`, `23:45:00`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for Time {
    type Err = ParseTimeError;

    /// Parses `H:MM` or `H:MM:SS`. Hour and minute are mandatory; the second
    /// defaults to 0. Each component must be a non-empty run of decimal
    /// digits, so `0:`, `:30`, `12` and `1:2:` are all format errors.
    ///
    /// The grammar check does not re-validate numeric ranges: `25:99` parses
    /// successfully and then fails [`Time::is_valid`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let hour = parts.next().unwrap_or("");
        let minute = parts.next().ok_or(ParseTimeError::MissingSeparator)?;
        let second = parts.next();
        if parts.next().is_some() {
            return Err(ParseTimeError::TooManyComponents);
        }

        if hour.is_empty() {
            return Err(ParseTimeError::MissingHour);
        }
        if minute.is_empty() {
            return Err(ParseTimeError::MissingMinute);
        }
        if let Some(sec) = second {
            if sec.is_empty() {
                return Err(ParseTimeError::MissingSecond);
            }
        }

        Ok(Time {
            hour: parse_component(hour)?,
            minute: parse_component(minute)?,
            second: second.map(parse_component).transpose()?.unwrap_or(0),
        })
    }
}

/// Unsigned decimal digits only: no sign, no whitespace.
fn parse_component(s: &str) -> Result<i32, ParseTimeError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseTimeError::NotANumber(s.to_string()));
    }
    s.parse::<i32>()
        .map_err(|_| ParseTimeError::NotANumber(s.to_string()))
}

/// Format error raised by [`Time`]'s `FromStr` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTimeError {
    MissingSeparator,
    MissingHour,
    MissingMinute,
    MissingSecond,
    TooManyComponents,
    NotANumber(String),
}

impl fmt::Display for ParseTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTimeError::MissingSeparator => write!(f, "':' not found"),
            ParseTimeError::MissingHour => write!(f, "hour not found"),
            ParseTimeError::MissingMinute => write!(f, "minute not found"),
            ParseTimeError::MissingSecond => write!(f, "second not found"),
            ParseTimeError::TooManyComponents => write!(f, "too many ':'-separated components"),
            ParseTimeError::NotANumber(s) => write!(f, "not a decimal number: {s:?}"),
        }
    }
}

impl std::error::Error for ParseTimeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_full_form() {
        assert_eq!("9:8:7".parse::<Time>().unwrap(), Time::new(9, 8, 7));
        assert_eq!("1:23:45".parse::<Time>().unwrap(), Time::new(1, 23, 45));
        assert_eq!("0:00:00".parse::<Time>().unwrap(), Time::new(0, 0, 0));
    }

    #[test]
    fn parse_short_form_defaults_second_to_zero() {
        assert_eq!("23:45".parse::<Time>().unwrap(), Time::new(23, 45, 0));
        assert_eq!("0:00".parse::<Time>().unwrap(), Time::new(0, 0, 0));
        assert_eq!("9:8".parse::<Time>().unwrap(), Time::new(9, 8, 0));
    }

    #[test]
    fn parse_rejects_missing_components() {
        assert_eq!("12".parse::<Time>(), Err(ParseTimeError::MissingSeparator));
        assert_eq!("0:".parse::<Time>(), Err(ParseTimeError::MissingMinute));
        assert_eq!(":30".parse::<Time>(), Err(ParseTimeError::MissingHour));
        assert_eq!("1:2:".parse::<Time>(), Err(ParseTimeError::MissingSecond));
        assert_eq!(
            "1:2:3:4".parse::<Time>(),
            Err(ParseTimeError::TooManyComponents)
        );
    }

    #[test]
    fn parse_rejects_non_numeric_segments() {
        assert!(matches!(
            "a:00".parse::<Time>(),
            Err(ParseTimeError::NotANumber(_))
        ));
        assert!(matches!(
            "1:-2".parse::<Time>(),
            Err(ParseTimeError::NotANumber(_))
        ));
        assert!(matches!(
            "1: 2".parse::<Time>(),
            Err(ParseTimeError::NotANumber(_))
        ));
    }

    #[test]
    fn parse_does_not_range_check() {
        let t = "25:99".parse::<Time>().unwrap();
        assert_eq!(t, Time::new(25, 99, 0));
        assert!(!t.is_valid());
    }

    #[test]
    fn validity_bounds() {
        assert!(Time::new(0, 0, 0).is_valid());
        assert!(Time::new(23, 59, 59).is_valid());
        assert!(!Time::new(24, 0, 0).is_valid());
        assert!(!Time::new(0, 60, 0).is_valid());
        assert!(!Time::new(0, 0, 60).is_valid());
        assert!(!Time::new(-1, 0, 0).is_valid());
    }

    #[test]
    fn ordering_is_by_hour_minute_second() {
        assert!(Time::new(1, 59, 59) < Time::new(2, 0, 0));
        assert!(Time::new(5, 2, 0) < Time::new(5, 3, 0));
        assert!(Time::new(5, 2, 1) < Time::new(5, 2, 2));
        assert_eq!(Time::new(7, 7, 7), Time::new(7, 7, 7));
    }

    #[test]
    fn display_pads_minute_and_second() {
        assert_eq!(Time::new(9, 8, 7).to_string(), "9:08:07");
        assert_eq!(Time::new(23, 45, 0).to_string(), "23:45:00");
    }

    proptest! {
        #[test]
        fn format_then_parse_round_trips(h in 0i32..24, m in 0i32..60, s in 0i32..60) {
            let t = Time::new(h, m, s);
            prop_assert_eq!(t.to_string().parse::<Time>().unwrap(), t);
        }
    }
}
