// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::iter::FusedIterator;

use log::debug;

use crate::{Instant, Shorthand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the start of the range toward its end
    Forward,
    /// From the end of the range toward its start
    Backward,
}

/// A lazy, finite sequence of instants stepping through a range.
///
/// The `k`-th instant is `anchor + k * step` units (or minus, going backward), always
/// measured from the anchor. Iteration stops at the first instant past the bound, or
/// at the first instant that cannot be represented.
#[derive(Debug, Clone)]
pub struct Stepper<I> {
    anchor: I,
    bound: I,
    unit: Shorthand,
    step: i64,
    exclusive: bool,
    direction: Direction,
    /// Index of the next instant to produce
    index: i64,
    finished: bool,
}

impl<I: Instant> Stepper<I> {
    pub(crate) fn new(
        anchor: I,
        bound: I,
        unit: Shorthand,
        step: i64,
        exclusive: bool,
        direction: Direction,
    ) -> Self {
        debug!(
            "Stepping {:?} from {} to {} by {} {}, exclusive: {}",
            direction, anchor, bound, step, unit, exclusive
        );
        Self {
            anchor,
            bound,
            unit,
            step,
            exclusive,
            direction,
            index: 0,
            finished: false,
        }
    }

    pub fn unit(&self) -> Shorthand {
        self.unit
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// How many instants have been produced so far
    pub fn position(&self) -> i64 {
        self.index
    }

    fn offset(&self, index: i64) -> Option<i64> {
        let amount = index.checked_mul(self.step)?;
        match self.direction {
            Direction::Forward => Some(amount),
            Direction::Backward => amount.checked_neg(),
        }
    }

    fn within_bound(&self, candidate: &I) -> bool {
        match (self.direction, self.exclusive) {
            (Direction::Forward, true) => *candidate < self.bound,
            (Direction::Forward, false) => *candidate <= self.bound,
            (Direction::Backward, true) => *candidate > self.bound,
            (Direction::Backward, false) => *candidate >= self.bound,
        }
    }

    /// The instant the next call to [`Stepper::advance`] would produce, without advancing.
    pub fn peek(&self) -> Option<I> {
        if self.finished {
            return None;
        }
        let candidate = self
            .anchor
            .add_unit(self.offset(self.index)?, self.unit)?;
        if self.within_bound(&candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Produce the next instant, if any remain.
    pub fn advance(&mut self) -> Option<I> {
        let next = self.peek();
        match next {
            Some(_) => self.index += 1,
            None => self.finished = true,
        }
        next
    }

    /// Start over from the anchor.
    pub fn reset(&mut self) {
        self.index = 0;
        self.finished = false;
    }
}

impl<I: Instant> Iterator for Stepper<I> {
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<I: Instant> FusedIterator for Stepper<I> {}
