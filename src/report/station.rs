use std::io::{self, Write};

use super::{begin, finish, NO_TRIPS};
use crate::data::model::{Trip, TripDataset};
use crate::stats::mode;

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats<'a> {
    pub start_station: (&'a str, usize),
    pub end_station: (&'a str, usize),
    /// Most frequent (start, end) pair.
    pub trip: ((&'a str, &'a str), usize),
}

pub fn compute(trips: &[Trip]) -> Option<StationStats<'_>> {
    Some(StationStats {
        start_station: mode(trips.iter().map(|t| t.start_station.as_str()))?,
        end_station: mode(trips.iter().map(|t| t.end_station.as_str()))?,
        trip: mode(
            trips
                .iter()
                .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
        )?,
    })
}

pub fn report(dataset: &TripDataset, out: &mut dyn Write) -> io::Result<()> {
    let started = begin(out, "the most popular stations and trips")?;
    match compute(&dataset.trips) {
        Some(stats) => {
            writeln!(out, "Most Common Start Station: {}", stats.start_station.0)?;
            writeln!(out, "Most Common End Station: {}", stats.end_station.0)?;
            let ((from, to), count) = stats.trip;
            writeln!(out, "Most Frequent Trip: {from} -> {to} ({count} trips)")?;
        }
        None => writeln!(out, "{NO_TRIPS}")?,
    }
    finish(out, started)
}
