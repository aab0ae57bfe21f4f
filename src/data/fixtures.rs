//! Builders for in-memory trips used across unit tests.

use std::path::PathBuf;

use super::model::{parse_start_time, RawTrip, Trip, TripDataset};
use crate::config::City;

pub const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
1,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
2,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
3,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Subscriber,Male,1986.0
4,2017-06-26 09:01:20,2017-06-26 09:11:06,586,Wood St & Hubbard St,Damen Ave & Chicago Ave,Customer,,
5,2017-06-10 15:41:17,2017-06-10 15:50:40,563,Clark St & Elm St,Wood St & Hubbard St,Subscriber,Female,1981.0
6,2017-06-13 17:24:30,2017-06-13 17:29:47,317,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
";

pub const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
1330037,2017-05-30 01:02:59,2017-05-30 01:13:37,637.251,17th St & Massachusetts Ave NW,5th & K St NW,Customer
";

pub fn trip(start: &str, from: &str, to: &str) -> Trip {
    let start_time = parse_start_time(start).expect("fixture start time");
    let raw = RawTrip {
        start_time: start.to_string(),
        start_station: from.to_string(),
        end_station: to.to_string(),
        trip_duration: Some(60.0),
        user_type: Some("Subscriber".to_string()),
        ..RawTrip::default()
    };
    Trip::new(0, start_time, raw)
}

/// Wrap trips into a dataset, numbering rows in order.
pub fn dataset(city: City, trips: Vec<Trip>) -> TripDataset {
    let trips = trips
        .into_iter()
        .enumerate()
        .map(|(i, mut t)| {
            t.row = i;
            t
        })
        .collect();
    TripDataset {
        city,
        source: PathBuf::from(format!("{}.csv", city.file_stem())),
        columns: Vec::new(),
        trips,
    }
}
