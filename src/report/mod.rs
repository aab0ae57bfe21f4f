/// Statistics reporters. Each one reads a filtered dataset, computes its
/// figures, and prints them followed by the time the computation took.
pub mod duration;
pub mod station;
pub mod time;
pub mod user;

use std::io::{self, Write};
use std::time::Instant;

use crate::data::model::TripDataset;

pub const NO_TRIPS: &str = "No trips to analyse.";

/// Run all four reporters in order.
pub fn report_all(dataset: &TripDataset, out: &mut dyn Write) -> io::Result<()> {
    time::report(dataset, out)?;
    station::report(dataset, out)?;
    duration::report(dataset, out)?;
    user::report(dataset, out)?;
    Ok(())
}

/// Print a reporter heading and start its clock.
fn begin(out: &mut dyn Write, heading: &str) -> io::Result<Instant> {
    writeln!(out, "\nCalculating {heading}...\n")?;
    Ok(Instant::now())
}

/// Print the elapsed time and the section rule.
fn finish(out: &mut dyn Write, started: Instant) -> io::Result<()> {
    writeln!(
        out,
        "\nThis took {:.2} seconds.\n{}",
        started.elapsed().as_secs_f64(),
        "-".repeat(40)
    )
}
