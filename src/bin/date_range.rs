// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{crate_authors, crate_description, Parser, Subcommand};
use date_interval::{
    Containment, ContainsOptions, IterOptions, OverlapOptions, Shorthand, Stepper,
};
use date_range::cli_help::{coalesce, parse_instant, read_ranges_file, CliError, Range};
use itertools::Itertools;
use log::debug;

#[derive(Parser, Debug)]
#[command(author=crate_authors!(), version, about=crate_description!())]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by all the stepping subcommands
#[derive(clap::Args, Debug)]
struct IterArgs {
    /// Advance this many units at a time
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    step: i64,

    /// Include the far end of the range, if a step lands exactly on it
    #[arg(long, action)]
    inclusive: bool,
}

impl From<&IterArgs> for IterOptions {
    fn from(args: &IterArgs) -> Self {
        IterOptions {
            exclusive: !args.inclusive,
            step: args.step,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the instants from the start of a range toward its end
    By {
        range: Range,
        /// Unit of time to step by
        #[arg(short, long, default_value = "days")]
        unit: Shorthand,
        #[command(flatten)]
        iter: IterArgs,
    },
    /// List the instants from the end of a range toward its start
    ReverseBy {
        range: Range,
        /// Unit of time to step by
        #[arg(short, long, default_value = "days")]
        unit: Shorthand,
        #[command(flatten)]
        iter: IterArgs,
    },
    /// Step forward by the length of another range
    ByRange {
        range: Range,
        /// Range whose length is the size of each step
        #[arg(long)]
        interval: Range,
        #[command(flatten)]
        iter: IterArgs,
    },
    /// Step backward by the length of another range
    ReverseByRange {
        range: Range,
        /// Range whose length is the size of each step
        #[arg(long)]
        interval: Range,
        #[command(flatten)]
        iter: IterArgs,
    },
    /// Is an instant, or another range, within a range?
    Contains {
        range: Range,
        #[arg(long, value_parser = parse_instant, required_unless_present = "other", conflicts_with = "other")]
        instant: Option<NaiveDateTime>,
        #[arg(long = "range")]
        other: Option<Range>,
        /// Treat the end of the range as part of it
        #[arg(long, action)]
        inclusive: bool,
    },
    /// Do two ranges share any time?
    Overlaps {
        first: Range,
        second: Range,
        /// Also count ranges that only touch
        #[arg(long, action)]
        adjacent: bool,
    },
    /// Does one range end exactly where the other begins?
    Adjacent { first: Range, second: Range },
    /// Union of two overlapping or adjacent ranges
    Add { first: Range, second: Range },
    /// Time shared by two ranges, if any
    Intersect { first: Range, second: Range },
    /// Parts of the first range not covered by the second
    Subtract { first: Range, second: Range },
    /// Length of a range
    #[command(alias = "duration")]
    Diff {
        range: Range,
        #[arg(short, long, default_value = "milliseconds")]
        unit: Shorthand,
        /// Round to the nearest unit instead of truncating
        #[arg(long, action)]
        rounded: bool,
    },
    /// Instant halfway through a range
    Center { range: Range },
    /// Merge the ranges listed in a file, one per line
    Coalesce { file: PathBuf },
}

fn instants(stepper: Stepper<NaiveDateTime>) -> Vec<String> {
    stepper.map(|instant| instant.to_string()).collect()
}

fn ranges(ranges: impl IntoIterator<Item = Range>) -> Vec<String> {
    ranges.into_iter().map(|r| r.to_string()).collect()
}

/// Carry out a subcommand, returning the lines to print.
fn run(command: Command) -> Result<Vec<String>, CliError> {
    debug!("Running {:?}", command);
    let lines = match command {
        Command::By { range, unit, iter } => instants(range.by(unit, (&iter).into())?),
        Command::ReverseBy { range, unit, iter } => {
            instants(range.reverse_by(unit, (&iter).into())?)
        }
        Command::ByRange {
            range,
            interval,
            iter,
        } => instants(range.by_range(&interval, (&iter).into())?),
        Command::ReverseByRange {
            range,
            interval,
            iter,
        } => instants(range.reverse_by_range(&interval, (&iter).into())?),
        Command::Contains {
            range,
            instant,
            other,
            inclusive,
        } => {
            let options = ContainsOptions {
                exclusive: !inclusive,
            };
            let contained = match (instant, other) {
                (Some(instant), _) => range.contains_instant(&instant, options),
                (None, Some(other)) => range.contains_range(&other, options),
                (None, None) => false,
            };
            vec![contained.to_string()]
        }
        Command::Overlaps {
            first,
            second,
            adjacent,
        } => vec![first
            .overlaps(&second, OverlapOptions { adjacent })
            .to_string()],
        Command::Adjacent { first, second } => vec![first.adjacent(&second).to_string()],
        Command::Add { first, second } => vec![first.add(&second)?.to_string()],
        Command::Intersect { first, second } => ranges(first.intersect(&second)),
        Command::Subtract { first, second } => ranges(first.subtract(&second)),
        Command::Diff {
            range,
            unit,
            rounded,
        } => vec![range.diff(unit, rounded).to_string()],
        Command::Center { range } => vec![range.center().to_string()],
        Command::Coalesce { file } => ranges(coalesce(read_ranges_file(&file)?)),
    };
    Ok(lines)
}

fn main() -> Result<(), CliError> {
    env_logger::init();
    let args = Args::parse();
    let lines = run(args.command)?;
    if !lines.is_empty() {
        println!("{}", lines.iter().join("\n"));
    }
    Ok(())
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert()
}
