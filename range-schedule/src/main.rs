// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT
use clap::{crate_authors, crate_description, Parser};
use date_interval::Shorthand;
use itertools::Itertools;

mod input_file;

use input_file::Schedule;

#[derive(Parser, Debug)]
#[command(author=crate_authors!(), version, about=crate_description!())]
struct Args {
    /// List the start of each slot of this size that fits in a free period
    #[arg(long)]
    slot: Option<Shorthand>,

    /// Slot size, in units of `--slot`
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    step: i64,

    /// Input file describing the window and the busy periods
    #[arg(default_value = "schedule.toml")]
    toml_input: String,
}

/// Load the schedule named in the arguments and produce its report lines.
fn run(args: Args) -> Result<Vec<String>, anyhow::Error> {
    let Args {
        slot,
        step,
        toml_input,
    } = args;

    // Load TOML file
    let schedule = {
        eprintln!("Opening {toml_input}");
        let file = std::fs::read_to_string(&toml_input)?;
        Schedule::try_parse(&file)?
    };

    Ok(schedule.report(slot.map(|unit| (unit, step)))?)
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let lines = run(Args::parse())?;
    println!("{}", lines.iter().join("\n"));
    Ok(())
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert()
}
