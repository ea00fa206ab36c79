// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod chrono_instant;
mod collection;
mod error;
pub mod instant;
mod iter;
pub mod options;
mod parsing;
mod range;

#[cfg(test)]
pub(crate) mod fake;

pub use collection::{coalesce_ranges, DateRangeCollection};
pub use error::DateRangeError;
pub use instant::{Instant, Shorthand};
pub use iter::{Direction, Stepper};
pub use options::{
    ContainsOptions, ExclusiveEndOptions, IterOptions, OverlapOptions, SetExclusiveEndOptions,
    SetStepOptions, StepOptions,
};
pub use range::{Containment, DateRange};
