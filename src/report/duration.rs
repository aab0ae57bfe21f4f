use std::io::{self, Write};

use super::{begin, finish, NO_TRIPS};
use crate::data::model::{Trip, TripDataset};

/// Total and mean of the trip durations, in seconds. Trips without a
/// duration are left out of both figures.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: f64,
    pub counted: usize,
}

pub fn compute(trips: &[Trip]) -> Option<DurationStats> {
    let (total, counted) = trips
        .iter()
        .filter_map(|t| t.trip_duration)
        .fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));
    (counted > 0).then(|| DurationStats {
        total,
        mean: total / counted as f64,
        counted,
    })
}

/// `3d 4h 05m 06s` style rendering of a number of seconds.
pub fn humanize(seconds: f64) -> String {
    let whole = seconds.max(0.0).round() as u64;
    let (days, rest) = (whole / 86_400, whole % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, secs) = (rest / 60, rest % 60);
    if days > 0 {
        format!("{days}d {hours}h {minutes:02}m {secs:02}s")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m {secs:02}s")
    } else {
        format!("{minutes}m {secs:02}s")
    }
}

pub fn report(dataset: &TripDataset, out: &mut dyn Write) -> io::Result<()> {
    let started = begin(out, "trip duration statistics")?;
    match compute(&dataset.trips) {
        Some(stats) => {
            writeln!(
                out,
                "Total Travel Time (seconds): {} ({})",
                stats.total,
                humanize(stats.total)
            )?;
            writeln!(
                out,
                "Average Travel Time (seconds): {} ({})",
                stats.mean,
                humanize(stats.mean)
            )?;
            let skipped = dataset.len() - stats.counted;
            if skipped > 0 {
                writeln!(out, "({skipped} trips without a duration were left out)")?;
            }
        }
        None => writeln!(out, "{NO_TRIPS}")?,
    }
    finish(out, started)
}
