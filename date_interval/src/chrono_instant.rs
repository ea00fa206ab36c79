// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Instant`] for chrono's naive (timezone-less) date-times.

use std::convert::TryFrom;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use nom::{combinator::all_consuming, Finish};

use crate::{parsing, DateRange, DateRangeError, Instant, Shorthand};

fn add_months(instant: &NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

fn delta(amount: i64, unit: Shorthand) -> Option<TimeDelta> {
    match unit {
        Shorthand::Weeks => TimeDelta::try_weeks(amount),
        Shorthand::Days => TimeDelta::try_days(amount),
        Shorthand::Hours => TimeDelta::try_hours(amount),
        Shorthand::Minutes => TimeDelta::try_minutes(amount),
        Shorthand::Seconds => TimeDelta::try_seconds(amount),
        Shorthand::Milliseconds => TimeDelta::try_milliseconds(amount),
        Shorthand::Years | Shorthand::Quarters | Shorthand::Months => None,
    }
}

/// Fractional number of months from `b` to `a`.
///
/// Whole months are counted by calendar, then the remainder is expressed as a
/// fraction of the month surrounding it, so the result does not depend on month length.
fn month_diff(a: &NaiveDateTime, b: &NaiveDateTime) -> f64 {
    if a.day() < b.day() {
        return -month_diff(b, a);
    }
    let whole = i64::from(b.year() - a.year()) * 12 + (i64::from(b.month()) - i64::from(a.month()));
    let fraction = add_months(a, whole).and_then(|anchor| {
        let (low, high) = if *b < anchor {
            (add_months(a, whole - 1)?, anchor)
        } else {
            (anchor, add_months(a, whole + 1)?)
        };
        let span = (high - low).num_milliseconds() as f64;
        Some((*b - anchor).num_milliseconds() as f64 / span)
    });
    -(whole as f64 + fraction.unwrap_or(0.0))
}

impl Instant for NaiveDateTime {
    fn add_unit(&self, amount: i64, unit: Shorthand) -> Option<Self> {
        match unit.months() {
            Some(months_per_unit) => add_months(self, amount.checked_mul(months_per_unit)?),
            None => self.checked_add_signed(delta(amount, unit)?),
        }
    }

    fn diff_unit(&self, other: &Self, unit: Shorthand) -> f64 {
        match (unit.months(), unit.fixed_millis()) {
            (Some(months_per_unit), _) => month_diff(self, other) / months_per_unit as f64,
            (None, Some(millis)) => {
                (*self - *other).num_milliseconds() as f64 / millis as f64
            }
            (None, None) => 0.0,
        }
    }

    fn diff_millis(&self, other: &Self) -> Option<i64> {
        Some(self.signed_duration_since(*other).num_milliseconds())
    }

    fn parse_instant(text: &str) -> Result<Self, DateRangeError> {
        let (_leftover, parsed) = all_consuming(parsing::date_time)(text.trim()).finish()?;
        Ok(parsed)
    }
}

impl DateRange<NaiveDateTime> {
    /// Range between two calendar dates, each taken at midnight.
    pub fn from_dates(a: NaiveDate, b: NaiveDate) -> Result<Self, DateRangeError> {
        let midnight = |d: NaiveDate| {
            d.and_hms_opt(0, 0, 0)
                .ok_or_else(|| DateRangeError::InvalidRange(d.to_string()))
        };
        Ok(Self::new(midnight(a)?, midnight(b)?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::{DateRangeError, Instant, Shorthand};

    fn at(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_instant(text).unwrap()
    }

    #[test]
    fn add_calendar_units() {
        let jan_31 = at("2024-01-31");
        assert_eq!(jan_31.add_unit(1, Shorthand::Months), Some(at("2024-02-29")));
        assert_eq!(jan_31.add_unit(2, Shorthand::Months), Some(at("2024-03-31")));
        assert_eq!(jan_31.add_unit(-2, Shorthand::Months), Some(at("2023-11-30")));
        assert_eq!(jan_31.add_unit(1, Shorthand::Quarters), Some(at("2024-04-30")));
        assert_eq!(
            at("2024-02-29").add_unit(1, Shorthand::Years),
            Some(at("2025-02-28"))
        );
    }

    #[test]
    fn add_fixed_units() {
        let start = at("2024-01-01T00:00");
        assert_eq!(start.add_unit(2, Shorthand::Weeks), Some(at("2024-01-15")));
        assert_eq!(start.add_unit(-1, Shorthand::Days), Some(at("2023-12-31")));
        assert_eq!(
            start.add_unit(90, Shorthand::Minutes),
            Some(at("2024-01-01T01:30"))
        );
        assert_eq!(
            start.add_unit(1500, Shorthand::Milliseconds),
            Some(at("2024-01-01T00:00:01.5"))
        );
        assert_eq!(start.add_unit(i64::MAX, Shorthand::Days), None);
        assert_eq!(start.add_unit(i64::MAX, Shorthand::Months), None);
    }

    #[test]
    fn diff_units() {
        let start = at("2024-01-31");
        let end = at("2024-04-30");
        assert_eq!(end.diff_unit(&start, Shorthand::Months), 3.0);
        assert_eq!(start.diff_unit(&end, Shorthand::Months), -3.0);
        assert_eq!(end.diff_unit(&start, Shorthand::Quarters), 1.0);
        assert_eq!(end.diff_unit(&start, Shorthand::Days), 90.0);
        assert_eq!(
            at("2024-01-01T12:00").diff_unit(&at("2024-01-01"), Shorthand::Days),
            0.5
        );
        assert_eq!(
            at("2024-03-01").diff_unit(&at("2024-02-01"), Shorthand::Months),
            1.0
        );
        // one month, plus 15 of the 31 days between Dec 16 and Jan 16
        let partial = at("2024-02-16").diff_unit(&at("2024-01-01"), Shorthand::Months);
        assert!((partial - (1.0 + 15.0 / 31.0)).abs() < 1e-9);
        assert_eq!(
            at("2025-01-01").diff_unit(&at("2023-01-01"), Shorthand::Years),
            2.0
        );
    }

    #[test]
    fn display_round_trips() {
        for text in ["2024-01-01T00:00", "2024-06-15T08:30:05", "2024-06-15T08:30:05.125"] {
            let instant = at(text);
            assert_eq!(NaiveDateTime::parse_instant(&instant.to_string()), Ok(instant));
        }
    }

    #[test]
    fn parse_failure() {
        assert!(matches!(
            NaiveDateTime::parse_instant("2024-02-30"),
            Err(DateRangeError::InvalidRange(_))
        ));
    }

    #[test]
    fn from_dates() {
        let range = crate::DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(*range.start(), at("2024-01-01"));
        assert_eq!(*range.end(), at("2024-01-05"));
    }
}
