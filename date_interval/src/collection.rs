// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{cmp::Reverse, collections::BinaryHeap, iter::FromIterator};

use derive_more::{From, Into};
use itertools::Itertools;
use log::debug;

use crate::{range::Containment, ContainsOptions, DateRange, Instant};

/// Merge neighbouring ranges that overlap or touch.
///
/// Input must be sorted by start for the output to be fully merged.
pub fn coalesce_ranges<I: Instant>(
    ranges: impl IntoIterator<Item = DateRange<I>>,
) -> impl Iterator<Item = DateRange<I>> {
    ranges.into_iter().coalesce(|a, b| match a.add(&b) {
        Ok(merged) => Ok(merged),
        Err(_) => Err((a, b)),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, From, Into)]
struct TotalOrderedDateRange<I>(DateRange<I>);

impl<I: Instant> TotalOrderedDateRange<I> {
    fn make_key(&self) -> (&I, Reverse<&I>) {
        // reverse the end so that longer ranges (with later ends) sort first on a tie
        (self.0.start(), Reverse(self.0.end()))
    }
}

impl<I: Instant> Ord for TotalOrderedDateRange<I> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.make_key().cmp(&other.make_key())
    }
}

impl<I: Instant> PartialOrd for TotalOrderedDateRange<I> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Accumulates any number of ranges, in any order, for merging.
#[derive(Debug, Clone)]
pub struct DateRangeCollection<I> {
    ranges_heap: BinaryHeap<TotalOrderedDateRange<I>>,
}

impl<I: Instant> Default for DateRangeCollection<I> {
    fn default() -> Self {
        Self {
            ranges_heap: BinaryHeap::new(),
        }
    }
}

impl<I: Instant> DateRangeCollection<I> {
    pub fn new() -> Self {
        DateRangeCollection::default()
    }

    pub fn accumulate(&mut self, range: DateRange<I>) {
        self.ranges_heap.push(TotalOrderedDateRange::from(range));
    }

    /// Number of ranges accumulated, before merging
    pub fn len(&self) -> usize {
        self.ranges_heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges_heap.is_empty()
    }

    pub fn into_coalesced_vec(self) -> Vec<DateRange<I>> {
        let count = self.ranges_heap.len();
        let coalesced: Vec<DateRange<I>> = coalesce_ranges(
            self.ranges_heap
                .into_sorted_vec()
                .into_iter()
                .map(DateRange::from),
        )
        .collect();
        debug!("Coalesced {} ranges into {}", count, coalesced.len());
        coalesced
    }

    /// Merged, sorted copy of the accumulated ranges.
    pub fn coalesced(&self) -> Vec<DateRange<I>> {
        self.clone().into_coalesced_vec()
    }

    /// The parts of `window` not covered by any accumulated range, in order.
    pub fn gaps_within(&self, window: &DateRange<I>) -> Vec<DateRange<I>> {
        self.coalesced()
            .iter()
            .fold(vec![window.clone()], |free, busy| {
                free.into_iter()
                    .flat_map(|piece| piece.subtract(busy))
                    .collect()
            })
    }
}

impl<I: Instant> Containment<I> for DateRangeCollection<I> {
    fn contains_instant(&self, other: &I, options: ContainsOptions) -> bool {
        self.ranges_heap
            .iter()
            .any(|r| r.0.contains_instant(other, options))
    }

    fn contains_range(&self, other: &DateRange<I>, options: ContainsOptions) -> bool {
        self.coalesced()[..].contains_range(other, options)
    }
}

impl<I: Instant> Extend<DateRange<I>> for DateRangeCollection<I> {
    fn extend<T: IntoIterator<Item = DateRange<I>>>(&mut self, iter: T) {
        self.ranges_heap
            .extend(iter.into_iter().map(TotalOrderedDateRange::from));
    }
}

impl<I: Instant> FromIterator<DateRange<I>> for DateRangeCollection<I> {
    fn from_iter<T: IntoIterator<Item = DateRange<I>>>(iter: T) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::{coalesce_ranges, DateRangeCollection};
    use crate::{fake::Tick, range::Containment, ContainsOptions, DateRange};

    fn ticks(a: i64, b: i64) -> DateRange<Tick> {
        DateRange::new(Tick(a), Tick(b))
    }

    #[test]
    fn coalesce_sorted() {
        let merged: Vec<_> =
            coalesce_ranges(vec![ticks(1, 3), ticks(2, 5), ticks(5, 6), ticks(8, 9)]).collect();
        assert_eq!(merged, vec![ticks(1, 6), ticks(8, 9)]);
    }

    #[test]
    fn collection_sorts_before_merging() {
        let collection: DateRangeCollection<Tick> = vec![
            ticks(8, 9),
            ticks(5, 6),
            ticks(1, 3),
            ticks(2, 5),
            ticks(20, 30),
            ticks(20, 22),
        ]
        .into_iter()
        .collect();
        assert_eq!(collection.len(), 6);
        assert!(!collection.is_empty());
        assert_eq!(
            collection.coalesced(),
            vec![ticks(1, 6), ticks(8, 9), ticks(20, 30)]
        );
        assert_eq!(
            collection.into_coalesced_vec(),
            vec![ticks(1, 6), ticks(8, 9), ticks(20, 30)]
        );
    }

    #[test]
    fn accumulate_and_extend() {
        let mut collection = DateRangeCollection::new();
        assert!(collection.is_empty());
        collection.accumulate(ticks(10, 12));
        collection.extend(vec![ticks(0, 2), ticks(12, 14)]);
        assert_eq!(
            collection.into_coalesced_vec(),
            vec![ticks(0, 2), ticks(10, 14)]
        );
    }

    #[test]
    fn gaps() {
        let collection: DateRangeCollection<Tick> =
            vec![ticks(2, 4), ticks(6, 7), ticks(3, 5), ticks(9, 12)]
                .into_iter()
                .collect();
        assert_eq!(
            collection.gaps_within(&ticks(0, 10)),
            vec![ticks(0, 2), ticks(5, 6), ticks(7, 9)]
        );
        assert!(collection.gaps_within(&ticks(2, 5)).is_empty());
        assert_eq!(
            DateRangeCollection::new().gaps_within(&ticks(0, 10)),
            vec![ticks(0, 10)]
        );
    }

    #[test]
    fn containment() {
        let collection: DateRangeCollection<Tick> =
            vec![ticks(0, 5), ticks(5, 10), ticks(20, 30)]
                .into_iter()
                .collect();
        let opts = ContainsOptions::default();
        assert!(collection.contains_instant(&Tick(5), opts));
        assert!(!collection.contains_instant(&Tick(10), opts));
        // spans the two touching ranges
        assert!(collection.contains_range(&ticks(3, 8), opts));
        assert!(!collection.contains_range(&ticks(8, 22), opts));
    }
}
