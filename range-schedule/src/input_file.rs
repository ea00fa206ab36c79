// Copyright 2021-2025, Collabora, Ltd.
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::Context;
use chrono::NaiveDateTime;
use date_interval::{
    DateRange, DateRangeCollection, DateRangeError, Instant, IterOptions, OverlapOptions,
    Shorthand,
};
use log::warn;
use serde::Deserialize;

type Range = DateRange<NaiveDateTime>;

/// Corresponds to a `[[busy]]` entry in the TOML file.
#[derive(Deserialize)]
struct RawBusyEntry {
    name: String,
    range: String,
    comment: Option<String>,
}

/// Corresponds to the entire TOML file.
#[derive(Deserialize)]
struct RawScheduleFile {
    window: String,
    #[serde(default)]
    busy: Vec<RawBusyEntry>,
}

/// This is the fully-processed version of `RawBusyEntry`.
pub struct BusyEntry {
    pub name: String,
    pub range: Range,
    pub comment: Option<String>,
}

impl BusyEntry {
    /// Try to turn a `RawBusyEntry` into a `BusyEntry`
    fn try_parse(raw: RawBusyEntry) -> Result<Self, anyhow::Error> {
        let range = raw
            .range
            .parse::<Range>()
            .with_context(|| format!("Parsing busy entry {}", raw.name))?;
        Ok(BusyEntry {
            name: raw.name,
            range,
            comment: raw.comment,
        })
    }
}

pub struct Schedule {
    pub window: Range,
    pub busy: Vec<BusyEntry>,
}

impl Schedule {
    /// Parse the contents of a schedule TOML file.
    pub fn try_parse(text: &str) -> Result<Self, anyhow::Error> {
        let raw: RawScheduleFile = toml::from_str(text)?;
        let window = raw.window.parse::<Range>().context("Parsing window")?;
        let busy = raw
            .busy
            .into_iter()
            .map(BusyEntry::try_parse)
            .collect::<Result<Vec<_>, _>>()?;
        for entry in &busy {
            if !entry
                .range
                .overlaps(&window, OverlapOptions::default())
            {
                warn!("{} ({}) lies outside of the window", entry.name, entry.range);
            }
        }
        Ok(Schedule { window, busy })
    }

    fn collection(&self) -> DateRangeCollection<NaiveDateTime> {
        self.busy.iter().map(|entry| entry.range.clone()).collect()
    }

    /// Merged busy periods, clipped to the window.
    pub fn busy_periods(&self) -> Vec<Range> {
        self.collection()
            .into_coalesced_vec()
            .iter()
            .filter_map(|busy| busy.intersect(&self.window))
            .collect()
    }

    /// Periods of the window not covered by any busy entry.
    pub fn free_periods(&self) -> Vec<Range> {
        self.collection().gaps_within(&self.window)
    }

    /// Lines describing the schedule: busy periods, then each free period,
    /// optionally followed by the start of each slot of the given size that fits inside it.
    pub fn report(&self, slot: Option<(Shorthand, i64)>) -> Result<Vec<String>, DateRangeError> {
        let mut lines: Vec<String> = self
            .busy_periods()
            .iter()
            .map(|busy| format!("busy: {busy}"))
            .collect();
        for free in self.free_periods() {
            lines.push(format!("free: {free}"));
            if let Some((unit, step)) = slot {
                let options = IterOptions {
                    exclusive: true,
                    step,
                };
                let fits = |start: &NaiveDateTime| {
                    start
                        .add_unit(step, unit)
                        .map_or(false, |slot_end| slot_end <= *free.end())
                };
                lines.extend(
                    free.by(unit, options)?
                        .filter(fits)
                        .map(|start| format!("  slot: {start}")),
                );
            }
        }
        Ok(lines)
    }
}
