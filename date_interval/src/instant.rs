// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capabilities a point-in-time type must provide to be used as the
//! endpoint of a [`DateRange`](crate::DateRange).

use std::{fmt::Display, str::FromStr};

use crate::DateRangeError;

pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub(crate) const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Number of months in a quarter
pub(crate) const MONTHS_PER_QUARTER: i64 = 3;
/// Number of months in a year
pub(crate) const MONTHS_PER_YEAR: i64 = 12;

/// A unit of time, used for measuring and for stepping through ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shorthand {
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    #[default]
    Milliseconds,
}

impl Shorthand {
    pub const ALL: [Shorthand; 9] = [
        Shorthand::Years,
        Shorthand::Quarters,
        Shorthand::Months,
        Shorthand::Weeks,
        Shorthand::Days,
        Shorthand::Hours,
        Shorthand::Minutes,
        Shorthand::Seconds,
        Shorthand::Milliseconds,
    ];

    /// Length of this unit in milliseconds, if it always has the same length.
    ///
    /// Calendar units (years, quarters, months) return `None`.
    pub fn fixed_millis(self) -> Option<i64> {
        match self {
            Shorthand::Years | Shorthand::Quarters | Shorthand::Months => None,
            Shorthand::Weeks => Some(MILLIS_PER_WEEK),
            Shorthand::Days => Some(MILLIS_PER_DAY),
            Shorthand::Hours => Some(MILLIS_PER_HOUR),
            Shorthand::Minutes => Some(MILLIS_PER_MINUTE),
            Shorthand::Seconds => Some(MILLIS_PER_SECOND),
            Shorthand::Milliseconds => Some(1),
        }
    }

    /// Number of months in this unit, for calendar units.
    pub fn months(self) -> Option<i64> {
        match self {
            Shorthand::Years => Some(MONTHS_PER_YEAR),
            Shorthand::Quarters => Some(MONTHS_PER_QUARTER),
            Shorthand::Months => Some(1),
            _ => None,
        }
    }

    pub fn is_calendar_unit(self) -> bool {
        self.fixed_millis().is_none()
    }

    fn as_str(self) -> &'static str {
        match self {
            Shorthand::Years => "years",
            Shorthand::Quarters => "quarters",
            Shorthand::Months => "months",
            Shorthand::Weeks => "weeks",
            Shorthand::Days => "days",
            Shorthand::Hours => "hours",
            Shorthand::Minutes => "minutes",
            Shorthand::Seconds => "seconds",
            Shorthand::Milliseconds => "milliseconds",
        }
    }
}

impl Display for Shorthand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shorthand {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // "M" (months) and "m" (minutes) only differ by case
        match s {
            "M" => return Ok(Shorthand::Months),
            "m" => return Ok(Shorthand::Minutes),
            "Q" => return Ok(Shorthand::Quarters),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "years" | "year" | "y" => Ok(Shorthand::Years),
            "quarters" | "quarter" | "q" => Ok(Shorthand::Quarters),
            "months" | "month" => Ok(Shorthand::Months),
            "weeks" | "week" | "w" => Ok(Shorthand::Weeks),
            "days" | "day" | "d" => Ok(Shorthand::Days),
            "hours" | "hour" | "h" => Ok(Shorthand::Hours),
            "minutes" | "minute" => Ok(Shorthand::Minutes),
            "seconds" | "second" | "s" => Ok(Shorthand::Seconds),
            "milliseconds" | "millisecond" | "ms" => Ok(Shorthand::Milliseconds),
            _ => Err(DateRangeError::UnknownUnit(s.to_string())),
        }
    }
}

/// An opaque, totally ordered point in time.
///
/// The range algebra never does calendar math itself: all unit-aware
/// arithmetic is delegated to implementations of this trait.
pub trait Instant: Clone + Ord + Display {
    /// Add `amount` of `unit` to this instant (negative amounts go backward).
    ///
    /// Calendar units must land on valid calendar dates, clamping the day
    /// of month where needed. Returns `None` if the result is not representable.
    #[must_use]
    fn add_unit(&self, amount: i64, unit: Shorthand) -> Option<Self>;

    /// How far `self` is after `other`, expressed in `unit`. May be fractional or negative.
    fn diff_unit(&self, other: &Self, unit: Shorthand) -> f64;

    /// Exact number of whole milliseconds from `other` to `self`, or `None` if that
    /// does not fit in an `i64`. Sub-millisecond remainders are truncated toward zero.
    fn diff_millis(&self, other: &Self) -> Option<i64>;

    /// Parse the canonical string form of an instant, as produced by `Display`.
    fn parse_instant(text: &str) -> Result<Self, DateRangeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_shorthand() {
        assert_eq!("days".parse::<Shorthand>().unwrap(), Shorthand::Days);
        assert_eq!("day".parse::<Shorthand>().unwrap(), Shorthand::Days);
        assert_eq!(" Weeks ".parse::<Shorthand>().unwrap(), Shorthand::Weeks);
        assert_eq!("M".parse::<Shorthand>().unwrap(), Shorthand::Months);
        assert_eq!("m".parse::<Shorthand>().unwrap(), Shorthand::Minutes);
        assert_eq!("Q".parse::<Shorthand>().unwrap(), Shorthand::Quarters);
        assert_eq!("ms".parse::<Shorthand>().unwrap(), Shorthand::Milliseconds);
        assert_eq!(
            "fortnights".parse::<Shorthand>(),
            Err(DateRangeError::UnknownUnit("fortnights".to_string()))
        );
    }

    #[test]
    fn shorthand_display_round_trips() {
        for unit in Shorthand::ALL {
            assert_eq!(unit.to_string().parse::<Shorthand>().unwrap(), unit);
        }
    }

    #[test]
    fn fixed_lengths() {
        assert_eq!(Shorthand::Days.fixed_millis(), Some(86_400_000));
        assert_eq!(Shorthand::Weeks.fixed_millis(), Some(604_800_000));
        assert_eq!(Shorthand::Months.fixed_millis(), None);
        assert!(Shorthand::Quarters.is_calendar_unit());
        assert!(!Shorthand::Hours.is_calendar_unit());
        assert_eq!(Shorthand::Years.months(), Some(12));
        assert_eq!(Shorthand::Seconds.months(), None);
        assert_eq!(Shorthand::default(), Shorthand::Milliseconds);
    }
}
