use std::io::{self, Write};

use super::{begin, finish, NO_TRIPS};
use crate::data::model::{Trip, TripDataset};
use crate::stats::{mode, value_counts};

#[derive(Debug, Clone, PartialEq)]
pub struct BirthYears {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Demographics<'a> {
    /// The city's file has no gender / birth-year columns.
    Unavailable,
    Available {
        genders: Vec<(&'a str, usize)>,
        /// `None` when no selected trip has a birth year.
        birth_years: Option<BirthYears>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats<'a> {
    /// Distinct user types with counts, most frequent first.
    pub user_types: Vec<(&'a str, usize)>,
    pub demographics: Demographics<'a>,
}

/// Compute user statistics. `demographics` says whether the dataset's city
/// has gender and birth-year columns; when it does not, those fields are
/// never read.
pub fn compute(trips: &[Trip], demographics: bool) -> Option<UserStats<'_>> {
    if trips.is_empty() {
        return None;
    }

    let user_types = value_counts(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let demographics = if demographics {
        let genders = value_counts(trips.iter().filter_map(|t| t.gender.as_deref()));
        let years: Vec<i64> = trips.iter().filter_map(Trip::birth_year_whole).collect();
        let birth_years = match (
            years.iter().min(),
            years.iter().max(),
            mode(years.iter().copied()),
        ) {
            (Some(&earliest), Some(&latest), Some((most_common, _))) => Some(BirthYears {
                earliest,
                latest,
                most_common,
            }),
            _ => None,
        };
        Demographics::Available {
            genders,
            birth_years,
        }
    } else {
        Demographics::Unavailable
    };

    Some(UserStats {
        user_types,
        demographics,
    })
}

pub fn report(dataset: &TripDataset, out: &mut dyn Write) -> io::Result<()> {
    let started = begin(out, "user statistics")?;
    match compute(&dataset.trips, dataset.city.has_demographics()) {
        Some(stats) => {
            writeln!(out, "User Types:")?;
            for (kind, count) in &stats.user_types {
                writeln!(out, "  {kind}: {count}")?;
            }
            match &stats.demographics {
                Demographics::Unavailable => writeln!(
                    out,
                    "No gender or birth year data available for {}.",
                    dataset.city
                )?,
                Demographics::Available {
                    genders,
                    birth_years,
                } => {
                    writeln!(out, "Gender Breakdown:")?;
                    for (gender, count) in genders {
                        writeln!(out, "  {gender}: {count}")?;
                    }
                    match birth_years {
                        Some(years) => {
                            writeln!(out, "Earliest Birth Year: {}", years.earliest)?;
                            writeln!(out, "Most Recent Birth Year: {}", years.latest)?;
                            writeln!(out, "Most Common Birth Year: {}", years.most_common)?;
                        }
                        None => writeln!(out, "No birth year data in the selected trips.")?,
                    }
                }
            }
        }
        None => writeln!(out, "{NO_TRIPS}")?,
    }
    finish(out, started)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::City;
    use crate::data::fixtures::{dataset, trip};

    fn rider(user_type: Option<&str>, gender: Option<&str>, year: Option<f64>) -> Trip {
        let mut t = trip("2017-06-02 08:00:00", "A", "B");
        t.user_type = user_type.map(str::to_string);
        t.gender = gender.map(str::to_string);
        t.birth_year = year;
        t
    }

    fn riders() -> Vec<Trip> {
        vec![
            rider(Some("Subscriber"), Some("Male"), Some(1992.0)),
            rider(Some("Customer"), None, None),
            rider(Some("Subscriber"), Some("Female"), Some(1981.0)),
            rider(None, Some("Male"), Some(1992.0)),
            rider(Some("Subscriber"), Some("Female"), Some(1949.0)),
        ]
    }

    #[test]
    fn counts_user_types_and_demographics() {
        let trips = riders();
        let stats = compute(&trips, true).unwrap();
        assert_eq!(stats.user_types, vec![("Subscriber", 3), ("Customer", 1)]);
        assert_eq!(
            stats.demographics,
            Demographics::Available {
                genders: vec![("Male", 2), ("Female", 2)],
                birth_years: Some(BirthYears {
                    earliest: 1949,
                    latest: 1992,
                    most_common: 1992,
                }),
            }
        );
    }

    #[test]
    fn city_without_demographics_skips_them() {
        let trips = riders();
        let stats = compute(&trips, false).unwrap();
        assert_eq!(stats.demographics, Demographics::Unavailable);
    }

    #[test]
    fn missing_birth_years_are_reported_not_fatal() {
        let trips = vec![rider(Some("Customer"), None, None)];
        let stats = compute(&trips, true).unwrap();
        assert_eq!(
            stats.demographics,
            Demographics::Available {
                genders: Vec::new(),
                birth_years: None,
            }
        );
    }

    #[test]
    fn washington_prints_no_demographics_message() {
        let ds = dataset(City::Washington, riders());
        let mut out = Vec::new();
        report(&ds, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No gender or birth year data available for Washington."));
        assert!(!text.contains("Gender Breakdown"));
        assert!(text.contains("  Subscriber: 3"));
    }

    #[test]
    fn chicago_prints_birth_years() {
        let ds = dataset(City::Chicago, riders());
        let mut out = Vec::new();
        report(&ds, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Gender Breakdown:"));
        assert!(text.contains("Earliest Birth Year: 1949"));
        assert!(text.contains("Most Recent Birth Year: 1992"));
        assert!(text.contains("Most Common Birth Year: 1992"));
    }
}
