// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

/// Helpful additions to strings.
pub trait StrExt {
    /// Replace text matching the regex with the empty string
    fn strip_match_if_present(&self, re: &Regex) -> Cow<str>;
}

impl StrExt for str {
    fn strip_match_if_present(&self, re: &Regex) -> Cow<str> {
        re.replace(self, "")
    }
}

/// Split free-form text into one candidate range string per line.
///
/// Comments (from `#` to the end of the line), trailing commas and semicolons,
/// bullet markers, and blank lines are dropped, as are immediately repeated lines.
pub fn cleanup_range_text(text: &str) -> Vec<Cow<str>> {
    lazy_static! {
        // we don't want comments nor list punctuation in the range text
        static ref RE: Regex = Regex::new(r"[\s,;]*(#.*)?$").unwrap();
    }
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches("* ")
                .trim_start_matches("- ")
                .trim()
                .strip_match_if_present(&RE)
        })
        .filter(|line| !line.is_empty())
        .dedup()
        .collect()
}
