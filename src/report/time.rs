use std::io::{self, Write};

use super::{begin, finish, NO_TRIPS};
use crate::data::model::{Trip, TripDataset};
use crate::stats::mode;

/// Most frequent travel times, each with its occurrence count.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: (&'static str, usize),
    pub day_of_week: (&'static str, usize),
    pub hour: (u32, usize),
}

pub fn compute(trips: &[Trip]) -> Option<TimeStats> {
    Some(TimeStats {
        month: mode(trips.iter().map(Trip::month))?,
        day_of_week: mode(trips.iter().map(Trip::day_of_week))?,
        hour: mode(trips.iter().map(Trip::hour))?,
    })
}

pub fn report(dataset: &TripDataset, out: &mut dyn Write) -> io::Result<()> {
    let started = begin(out, "the most frequent times of travel")?;
    match compute(&dataset.trips) {
        Some(stats) => {
            writeln!(out, "Most Common Month: {}", stats.month.0)?;
            writeln!(out, "Most Common Day of Week: {}", stats.day_of_week.0)?;
            writeln!(out, "Most Common Start Hour: {}", stats.hour.0)?;
        }
        None => writeln!(out, "{NO_TRIPS}")?,
    }
    finish(out, started)
}
