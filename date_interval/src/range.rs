// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use log::{debug, trace};
use nom::{combinator::all_consuming, Finish};

use crate::{
    iter::{Direction, Stepper},
    options::{ContainsOptions, OverlapOptions, SetStepOptions, StepOptions},
    parsing::{self, RANGE_SEPARATOR},
    DateRangeError, Instant, IterOptions, Shorthand,
};

/// Whether something "contains" an instant or a date range.
pub trait Containment<I> {
    /// Is this single instant included in this?
    fn contains_instant(&self, other: &I, options: ContainsOptions) -> bool;
    /// Is every instant of this range included in this?
    fn contains_range(&self, other: &DateRange<I>, options: ContainsOptions) -> bool;
}

/// A span of time between two instants, `start <= end`.
///
/// Whether the end instant belongs to the range is decided per call, through the options
/// passed to each operation. Ranges are immutable: every combinator returns new ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateRange<I> {
    start: I,
    end: I,
}

impl<I: Instant> DateRange<I> {
    /// Separator between start and end in the string form of a range
    pub const SEPARATOR: char = RANGE_SEPARATOR;

    /// Create a range between two instants, in whichever order they are given.
    pub fn new(a: I, b: I) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Create a range by parsing each endpoint.
    pub fn try_from_strs(a: &str, b: &str) -> Result<Self, DateRangeError> {
        Ok(Self::new(I::parse_instant(a)?, I::parse_instant(b)?))
    }

    pub fn start(&self) -> &I {
        &self.start
    }

    pub fn end(&self) -> &I {
        &self.end
    }

    /// Is this a degenerate range, with start and end at the same instant?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn into_bounds(self) -> (I, I) {
        (self.start, self.end)
    }

    /// Both endpoints, as `[start, end]`.
    pub fn to_date(&self) -> [I; 2] {
        [self.start.clone(), self.end.clone()]
    }

    /// Exact equality of both endpoints.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }

    pub fn is_same(&self, other: &Self) -> bool {
        self.is_equal(other)
    }

    /// Do the ranges share any span of time?
    ///
    /// With `adjacent` set, ranges that only touch at a boundary also count.
    pub fn overlaps(&self, other: &Self, options: OverlapOptions) -> bool {
        let overlapping = self.start < other.end && other.start < self.end;
        overlapping || (options.adjacent && self.adjacent(other))
    }

    /// Does one range end exactly where the other starts, without overlapping?
    pub fn adjacent(&self, other: &Self) -> bool {
        (self.end == other.start || other.end == self.start)
            && !self.overlaps(other, OverlapOptions::default())
    }

    /// Smallest range containing both ranges
    fn hull(&self, other: &Self) -> Self {
        Self {
            start: self.start.clone().min(other.start.clone()),
            end: self.end.clone().max(other.end.clone()),
        }
    }

    /// Union of two ranges that overlap or are adjacent.
    ///
    /// Disjoint ranges have no single-range union, and fail with [`DateRangeError::DisjointRange`].
    pub fn add(&self, other: &Self) -> Result<Self, DateRangeError> {
        if self.overlaps(other, OverlapOptions::new().adjacent(true)) {
            Ok(self.hull(other))
        } else {
            Err(DateRangeError::DisjointRange {
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    /// The span of time covered by both ranges, if there is any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = (&self.start).max(&other.start);
        let end = (&self.end).min(&other.end);
        if start < end {
            Some(Self {
                start: start.clone(),
                end: end.clone(),
            })
        } else {
            None
        }
    }

    /// The parts of this range not covered by `other`, in chronological order.
    ///
    /// Returns zero, one, or two ranges.
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        let remainder = if self.intersect(other).is_none() {
            vec![self.clone()]
        } else {
            let before = (self.start < other.start).then(|| Self {
                start: self.start.clone(),
                end: other.start.clone(),
            });
            let after = (other.end < self.end).then(|| Self {
                start: other.end.clone(),
                end: self.end.clone(),
            });
            before.into_iter().chain(after).collect()
        };
        trace!(
            "{} minus {} leaves {} range(s)",
            self,
            other,
            remainder.len()
        );
        remainder
    }

    /// Length of the range in `unit`, truncated toward zero, or rounded to the nearest whole unit.
    ///
    /// Fixed-length units are measured exactly, in integer milliseconds.
    pub fn diff(&self, unit: Shorthand, rounded: bool) -> i64 {
        if let Some(per_unit) = unit.fixed_millis() {
            if let Some(millis) = self.end.diff_millis(&self.start) {
                return divide_millis(millis, per_unit, rounded);
            }
        }
        let exact = self.end.diff_unit(&self.start, unit);
        let whole = if rounded { exact.round() } else { exact.trunc() };
        whole as i64
    }

    pub fn duration(&self, unit: Shorthand, rounded: bool) -> i64 {
        self.diff(unit, rounded)
    }

    /// Length of the range in milliseconds.
    pub fn value_of(&self) -> i64 {
        self.diff(Shorthand::Milliseconds, false)
    }

    /// Order ranges by their length, shortest first.
    pub fn cmp_by_length(&self, other: &Self) -> Ordering {
        self.value_of().cmp(&other.value_of())
    }

    /// The instant halfway between start and end, to the millisecond.
    pub fn center(&self) -> I {
        self.start
            .add_unit(self.value_of() / 2, Shorthand::Milliseconds)
            // the midpoint lies between two representable instants
            .unwrap_or_else(|| self.start.clone())
    }

    /// Step through the range from start toward end, `step` units of `unit` at a time.
    ///
    /// Each instant is computed from `start` directly, so calendar units land on
    /// calendar boundaries (e.g. the last day of each month) rather than drifting.
    pub fn by(&self, unit: Shorthand, options: IterOptions) -> Result<Stepper<I>, DateRangeError> {
        let step = options.checked_step()?;
        Ok(Stepper::new(
            self.start.clone(),
            self.end.clone(),
            unit,
            step,
            options.exclusive,
            Direction::Forward,
        ))
    }

    /// Step through the range from end toward start.
    ///
    /// With `exclusive`, the start instant is left out, mirroring [`DateRange::by`].
    pub fn reverse_by(
        &self,
        unit: Shorthand,
        options: IterOptions,
    ) -> Result<Stepper<I>, DateRangeError> {
        let step = options.checked_step()?;
        Ok(Stepper::new(
            self.end.clone(),
            self.start.clone(),
            unit,
            step,
            options.exclusive,
            Direction::Backward,
        ))
    }

    /// Options for stepping by the length of `interval`, in milliseconds
    fn range_step_options(
        interval: &Self,
        options: IterOptions,
    ) -> Result<IterOptions, DateRangeError> {
        let step = options.checked_step()?;
        let length = interval.value_of();
        if length <= 0 {
            return Err(DateRangeError::InvalidStep(length));
        }
        let stride = length
            .checked_mul(step)
            .ok_or(DateRangeError::InvalidStep(step))?;
        Ok(options.step(stride))
    }

    /// Like [`DateRange::by`], with each step as long as `interval`.
    pub fn by_range(
        &self,
        interval: &Self,
        options: IterOptions,
    ) -> Result<Stepper<I>, DateRangeError> {
        self.by(
            Shorthand::Milliseconds,
            Self::range_step_options(interval, options)?,
        )
    }

    /// Like [`DateRange::reverse_by`], with each step as long as `interval`.
    pub fn reverse_by_range(
        &self,
        interval: &Self,
        options: IterOptions,
    ) -> Result<Stepper<I>, DateRangeError> {
        self.reverse_by(
            Shorthand::Milliseconds,
            Self::range_step_options(interval, options)?,
        )
    }
}

/// `millis / per_unit`, truncated toward zero or rounded half away from zero.
fn divide_millis(millis: i64, per_unit: i64, rounded: bool) -> i64 {
    let quotient = millis / per_unit;
    let remainder = millis % per_unit;
    if rounded && remainder.abs() * 2 >= per_unit {
        quotient + remainder.signum()
    } else {
        quotient
    }
}

impl<I: Instant> Containment<I> for DateRange<I> {
    fn contains_instant(&self, other: &I, options: ContainsOptions) -> bool {
        let before_end = if options.exclusive {
            *other < self.end
        } else {
            *other <= self.end
        };
        self.start <= *other && before_end
    }

    fn contains_range(&self, other: &DateRange<I>, options: ContainsOptions) -> bool {
        if other.is_empty() {
            // a single point
            self.contains_instant(&other.start, options)
        } else {
            self.start <= other.start && other.end <= self.end
        }
    }
}

impl<I: Instant> Containment<I> for [DateRange<I>] {
    fn contains_instant(&self, other: &I, options: ContainsOptions) -> bool {
        self.iter().any(|r| r.contains_instant(other, options))
    }

    fn contains_range(&self, other: &DateRange<I>, options: ContainsOptions) -> bool {
        self.iter().any(|r| r.contains_range(other, options))
    }
}

impl<I: Instant> From<(I, I)> for DateRange<I> {
    fn from((a, b): (I, I)) -> Self {
        Self::new(a, b)
    }
}

impl<I: Instant> From<[I; 2]> for DateRange<I> {
    fn from(pair: [I; 2]) -> Self {
        let [a, b] = pair;
        Self::new(a, b)
    }
}

impl<I: Instant> Display for DateRange<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.start, RANGE_SEPARATOR, self.end)
    }
}

impl<I: Instant> FromStr for DateRange<I> {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_leftover, (start, end)) = all_consuming(parsing::range_parts)(s.trim())
            .finish()
            .map_err(|e| {
                debug!("Could not split {:?} into start and end: {}", s, e);
                DateRangeError::from(e)
            })?;
        Self::try_from_strs(start, end)
    }
}
