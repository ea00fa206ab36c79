// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    bytes::complete::{take_till1, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{map, map_opt, map_res, opt, recognize, rest, verify},
    sequence::{pair, preceded, separated_pair, tuple},
    IResult,
};

/// Separator between the start and end of a range in its string form
pub(crate) const RANGE_SEPARATOR: char = '/';

fn non_blank(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Split `"start/end"` into its two trimmed halves.
pub(crate) fn range_parts(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        map(
            verify(take_till1(|c: char| c == RANGE_SEPARATOR), non_blank),
            str::trim,
        ),
        char(RANGE_SEPARATOR),
        map(
            verify(rest, |s: &str| {
                non_blank(s) && !s.contains(RANGE_SEPARATOR)
            }),
            str::trim,
        ),
    )(input)
}

fn digits(count: usize) -> impl FnMut(&str) -> IResult<&str, u32> {
    move |input: &str| {
        map_res(
            take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
            |out: &str| out.parse::<u32>(),
        )(input)
    }
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize(pair(
            opt(one_of("+-")),
            take_while_m_n(4, 6, |c: char| c.is_ascii_digit()),
        )),
        |out: &str| out.parse::<i32>(),
    )(input)
}

fn date(input: &str) -> IResult<&str, NaiveDate> {
    map_opt(
        tuple((
            year,
            preceded(char('-'), digits(2)),
            preceded(char('-'), digits(2)),
        )),
        |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d),
    )(input)
}

/// Fractional seconds, as nanoseconds
fn fraction(input: &str) -> IResult<&str, u32> {
    map_res(
        preceded(
            char('.'),
            take_while_m_n(1, 9, |c: char| c.is_ascii_digit()),
        ),
        |out: &str| {
            out.parse::<u32>()
                .map(|n| n * 10u32.pow(9 - out.len() as u32))
        },
    )(input)
}

fn time(input: &str) -> IResult<&str, NaiveTime> {
    map_opt(
        tuple((
            digits(2),
            preceded(char(':'), digits(2)),
            opt(pair(preceded(char(':'), digits(2)), opt(fraction))),
        )),
        |(h, m, seconds)| {
            let (s, nano) = seconds.unwrap_or((0, None));
            NaiveTime::from_hms_nano_opt(h, m, s, nano.unwrap_or(0))
        },
    )(input)
}

/// An ISO-8601-like local date and optional time of day.
///
/// The separator may be `T` or a space, so chrono's own `Display` output parses.
pub(crate) fn date_time(input: &str) -> IResult<&str, NaiveDateTime> {
    map(
        pair(date, opt(preceded(one_of("T "), time))),
        |(d, t)| d.and_time(t.unwrap_or_default()),
    )(input)
}
