// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Invalid step {0}: iteration step must be a positive integer")]
    InvalidStep(i64),
    #[error("Cannot add disjoint date ranges {left} and {right}")]
    DisjointRange { left: String, right: String },
    #[error("Unknown unit of time: {0}")]
    UnknownUnit(String),
}

impl From<nom::error::Error<&str>> for DateRangeError {
    fn from(value: nom::error::Error<&str>) -> Self {
        DateRangeError::InvalidRange(value.to_string())
    }
}
