// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::DateRangeError;

pub trait ExclusiveEndOptions {
    /// Get whether the end of the range is excluded: if true, the range is `[start, end)`,
    /// otherwise `[start, end]`.
    fn get_exclusive(&self) -> bool;
}

pub trait SetExclusiveEndOptions: ExclusiveEndOptions {
    /// Set whether the end of the range is excluded: if true, the range is `[start, end)`,
    /// otherwise `[start, end]`.
    fn exclusive(self, exclusive: bool) -> Self;
}

pub trait StepOptions {
    /// Get how many units to advance between consecutive instants of an iteration.
    fn get_step(&self) -> i64;

    /// Get the step, if it is a valid (positive) stride.
    fn checked_step(&self) -> Result<i64, DateRangeError> {
        let step = self.get_step();
        if step >= 1 {
            Ok(step)
        } else {
            Err(DateRangeError::InvalidStep(step))
        }
    }
}

pub trait SetStepOptions: StepOptions {
    /// Set how many units to advance between consecutive instants of an iteration.
    fn step(self, step: i64) -> Self;
}

/// Options for [`Containment`](crate::Containment) checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainsOptions {
    /// Is the end instant of the range outside of it?
    pub exclusive: bool,
}

impl Default for ContainsOptions {
    fn default() -> Self {
        Self { exclusive: true }
    }
}

impl ContainsOptions {
    pub fn new() -> Self {
        Default::default()
    }
}

impl ExclusiveEndOptions for ContainsOptions {
    fn get_exclusive(&self) -> bool {
        self.exclusive
    }
}

impl SetExclusiveEndOptions for ContainsOptions {
    fn exclusive(self, exclusive: bool) -> Self {
        Self { exclusive }
    }
}

/// Options for [`DateRange::overlaps`](crate::DateRange::overlaps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapOptions {
    /// Should ranges that only touch at a boundary count as overlapping?
    pub adjacent: bool,
}

impl OverlapOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn adjacent(self, adjacent: bool) -> Self {
        Self { adjacent }
    }
}

/// Options for stepping through a range: [`DateRange::by`](crate::DateRange::by) and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterOptions {
    /// Should iteration stop before reaching the far boundary?
    pub exclusive: bool,
    /// Stride, in units. Must be at least 1.
    pub step: i64,
}

impl Default for IterOptions {
    fn default() -> Self {
        Self {
            exclusive: true,
            step: 1,
        }
    }
}

impl IterOptions {
    pub fn new() -> Self {
        Default::default()
    }
}

impl ExclusiveEndOptions for IterOptions {
    fn get_exclusive(&self) -> bool {
        self.exclusive
    }
}

impl SetExclusiveEndOptions for IterOptions {
    fn exclusive(self, exclusive: bool) -> Self {
        Self { exclusive, ..self }
    }
}

impl StepOptions for IterOptions {
    fn get_step(&self) -> i64 {
        self.step
    }
}

impl SetStepOptions for IterOptions {
    fn step(self, step: i64) -> Self {
        Self { step, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert!(ContainsOptions::default().get_exclusive());
        assert!(!OverlapOptions::default().adjacent);
        let opts = IterOptions::default();
        assert!(opts.get_exclusive());
        assert_eq!(opts.get_step(), 1);
    }

    #[test]
    fn builders() {
        let opts = IterOptions::new().exclusive(false).step(3);
        assert!(!opts.exclusive);
        assert_eq!(opts.step, 3);
        assert!(!ContainsOptions::new().exclusive(false).get_exclusive());
        assert!(OverlapOptions::new().adjacent(true).adjacent);
    }

    #[test]
    fn step_validation() {
        assert_eq!(IterOptions::new().step(2).checked_step(), Ok(2));
        assert_eq!(
            IterOptions::new().step(0).checked_step(),
            Err(DateRangeError::InvalidStep(0))
        );
        assert_eq!(
            IterOptions::new().step(-4).checked_step(),
            Err(DateRangeError::InvalidStep(-4))
        );
    }
}
