use std::fmt;

use log::debug;

use super::model::{Trip, TripDataset};
use crate::config::{City, ALL};

// ---------------------------------------------------------------------------
// Filter selection: which city, and optionally which month / weekday
// ---------------------------------------------------------------------------

/// The (city, month, day) triple gathered at the start of a session.
/// `None` for month or day means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Option<&'static str>,
    pub day: Option<&'static str>,
}

impl FilterSelection {
    /// Build a selection from validated prompt answers, mapping `"all"` to no filter.
    pub fn new(city: City, month: &'static str, day: &'static str) -> Self {
        let narrow = |v: &'static str| (v != ALL).then_some(v);
        Self {
            city,
            month: narrow(month),
            day: narrow(day),
        }
    }

    /// Whether a trip passes both the month and the day filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.map_or(true, |m| trip.month() == m)
            && self.day.map_or(true, |d| trip.day_of_week() == d)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (month: {}, day: {})",
            self.city,
            self.month.unwrap_or(ALL),
            self.day.unwrap_or(ALL)
        )
    }
}

/// Narrow a dataset to the selection. Surviving rows are kept unchanged
/// and in their original order; everything else is dropped.
pub fn apply(mut dataset: TripDataset, selection: &FilterSelection) -> TripDataset {
    let before = dataset.len();
    dataset.trips.retain(|trip| selection.matches(trip));
    debug!(
        "filter {selection}: kept {} of {before} trips",
        dataset.len()
    );
    dataset
}
