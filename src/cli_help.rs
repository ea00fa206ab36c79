// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use date_interval::{DateRange, DateRangeCollection, DateRangeError, Instant};

use crate::cleanup::cleanup_range_text;

/// The range type handled on the command line
pub type Range = DateRange<NaiveDateTime>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Range(#[from] DateRangeError),
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Range #{index}: {source}")]
    Entry {
        index: usize,
        source: DateRangeError,
    },
}

/// Parse a single instant, for use as a clap value parser.
pub fn parse_instant(text: &str) -> Result<NaiveDateTime, DateRangeError> {
    NaiveDateTime::parse_instant(text)
}

/// Parse every range in some free-form text, one per line.
pub fn parse_ranges(text: &str) -> Result<Vec<Range>, CliError> {
    cleanup_range_text(text)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            line.parse::<Range>().map_err(|source| CliError::Entry {
                index: i + 1,
                source,
            })
        })
        .collect()
}

/// Read a file of ranges, one per line.
pub fn read_ranges_file(path: &Path) -> Result<Vec<Range>, CliError> {
    eprintln!("Opening {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ranges(&text)
}

/// Merge all the given ranges, returning them sorted and as few as possible.
pub fn coalesce(ranges: Vec<Range>) -> Vec<Range> {
    ranges
        .into_iter()
        .collect::<DateRangeCollection<_>>()
        .into_coalesced_vec()
}
