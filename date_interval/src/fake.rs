// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal instant for exercising the range algebra without a calendar.
//!
//! A `Tick` is a count of milliseconds. Months are treated as 30 days and years as 360.

use std::fmt::Display;

use crate::{instant::MILLIS_PER_DAY, DateRangeError, Instant, Shorthand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Tick(pub i64);

const MILLIS_PER_FAKE_MONTH: i64 = 30 * MILLIS_PER_DAY;

fn unit_millis(unit: Shorthand) -> i64 {
    unit.fixed_millis()
        .or_else(|| unit.months().map(|m| m * MILLIS_PER_FAKE_MONTH))
        .unwrap_or(1)
}

impl Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Instant for Tick {
    fn add_unit(&self, amount: i64, unit: Shorthand) -> Option<Self> {
        amount
            .checked_mul(unit_millis(unit))
            .and_then(|delta| self.0.checked_add(delta))
            .map(Tick)
    }

    fn diff_unit(&self, other: &Self, unit: Shorthand) -> f64 {
        (self.0 - other.0) as f64 / unit_millis(unit) as f64
    }

    fn diff_millis(&self, other: &Self) -> Option<i64> {
        self.0.checked_sub(other.0)
    }

    fn parse_instant(text: &str) -> Result<Self, DateRangeError> {
        text.trim()
            .parse::<i64>()
            .map(Tick)
            .map_err(|e| DateRangeError::InvalidRange(format!("{text}: {e}")))
    }
}
