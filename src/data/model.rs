use std::path::PathBuf;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::config::{City, DAYS, MONTHS};

// ---------------------------------------------------------------------------
// Column names as they appear in the city files
// ---------------------------------------------------------------------------

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    USER_TYPE,
];

/// Columns only the demographic cities carry.
pub const DEMOGRAPHIC_COLUMNS: [&str; 2] = [GENDER, BIRTH_YEAR];

// ---------------------------------------------------------------------------
// RawTrip – one row exactly as read from the file
// ---------------------------------------------------------------------------

/// A row before its start time is parsed. Unknown columns (such as the
/// unnamed index column) are ignored; empty cells become `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    pub trip_duration: Option<f64>,
    #[serde(rename = "Start Station", default)]
    pub start_station: String,
    #[serde(rename = "End Station", default)]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

// ---------------------------------------------------------------------------
// Trip – one row with its derived calendar fields
// ---------------------------------------------------------------------------

const START_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a start-time cell. Accepts `2017-06-23 15:09:32`, an optional
/// fractional part, the ISO `T` separator, and minute precision.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

pub fn month_name(t: &NaiveDateTime) -> &'static str {
    MONTHS[t.month0() as usize]
}

pub fn day_name(t: &NaiveDateTime) -> &'static str {
    DAYS[t.weekday().num_days_from_sunday() as usize]
}

/// A single trip record (one row of the city file).
///
/// The derived month, weekday and hour are computed once from
/// `start_time` in [`Trip::new`] and are read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Zero-based position of the row in the source file.
    pub row: usize,
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    /// Seconds.
    pub trip_duration: Option<f64>,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    month: &'static str,
    day_of_week: &'static str,
    hour: u32,
}

impl Trip {
    pub fn new(row: usize, start_time: NaiveDateTime, raw: RawTrip) -> Self {
        Self {
            row,
            month: month_name(&start_time),
            day_of_week: day_name(&start_time),
            hour: start_time.hour(),
            start_time,
            end_time: raw.end_time,
            trip_duration: raw.trip_duration,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year,
        }
    }

    /// Lowercase full month name of the start time.
    pub fn month(&self) -> &'static str {
        self.month
    }

    /// Lowercase full weekday name of the start time.
    pub fn day_of_week(&self) -> &'static str {
        self.day_of_week
    }

    /// Hour of day (0–23) of the start time.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Birth year truncated to a whole year.
    pub fn birth_year_whole(&self) -> Option<i64> {
        self.birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.trunc() as i64)
    }
}

// ---------------------------------------------------------------------------
// TripDataset – the loaded (and possibly filtered) rows of one city
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TripDataset {
    pub city: City,
    /// File the rows were read from.
    pub source: PathBuf,
    /// Column names in file order.
    pub columns: Vec<String>,
    pub trips: Vec<Trip>,
}

impl TripDataset {
    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_start_time(s).unwrap()
    }

    #[test]
    fn derives_calendar_fields_from_start_time() {
        let trip = Trip::new(0, at("2017-06-23 15:09:32"), RawTrip::default());
        assert_eq!(trip.month(), "june");
        assert_eq!(trip.day_of_week(), "friday");
        assert_eq!(trip.hour(), 15);
    }

    #[test]
    fn derived_fields_match_rederivation() {
        for s in [
            "2017-01-01 00:07:57",
            "2017-02-28 23:59:59",
            "2017-03-05 12:00:00",
            "2016-12-31 06:30:00",
        ] {
            let trip = Trip::new(3, at(s), RawTrip::default());
            assert_eq!(trip.month(), month_name(&trip.start_time));
            assert_eq!(trip.day_of_week(), day_name(&trip.start_time));
            assert_eq!(trip.hour(), trip.start_time.hour());
        }
    }

    #[test]
    fn accepts_common_timestamp_layouts() {
        assert!(parse_start_time("2017-01-01 09:07:57").is_some());
        assert!(parse_start_time("2017-01-01 09:07:57.123").is_some());
        assert!(parse_start_time("2017-01-01T09:07:57").is_some());
        assert!(parse_start_time("2017-01-01 09:07").is_some());
        assert!(parse_start_time(" 2017-01-01 09:07:57 ").is_some());
        assert!(parse_start_time("01/01/2017").is_none());
        assert!(parse_start_time("").is_none());
    }

    #[test]
    fn sunday_maps_to_first_day() {
        let trip = Trip::new(0, at("2017-01-01 09:00:00"), RawTrip::default());
        assert_eq!(trip.day_of_week(), "sunday");
        assert_eq!(trip.month(), "january");
    }

    #[test]
    fn birth_year_is_truncated() {
        let raw = RawTrip {
            birth_year: Some(1989.0),
            ..RawTrip::default()
        };
        let trip = Trip::new(0, at("2017-01-01 09:00:00"), raw);
        assert_eq!(trip.birth_year_whole(), Some(1989));

        let raw = RawTrip {
            birth_year: Some(f64::NAN),
            ..RawTrip::default()
        };
        let trip = Trip::new(0, at("2017-01-01 09:00:00"), raw);
        assert_eq!(trip.birth_year_whole(), None);
    }
}
