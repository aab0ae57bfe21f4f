use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::console::{confirm, Console};
use crate::data::model::{self, Trip, TripDataset};

const RAW_DATA_PROMPT: &str = "Would you like to see 5 rows of raw data? (yes/no): ";

// ---------------------------------------------------------------------------
// Cursor over successive windows of rows
// ---------------------------------------------------------------------------

/// Forward-only cursor handing out consecutive windows of `page_size` rows.
#[derive(Debug, Clone)]
pub struct RawDataPager {
    cursor: usize,
    page_size: usize,
}

impl RawDataPager {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            cursor: 0,
            page_size: page_size.get(),
        }
    }

    /// Rows `[cursor, cursor + page_size)`, clipped to the slice, then advance.
    /// Past the end the window is empty; the cursor saturates at `usize::MAX`.
    pub fn next_window<'a>(&mut self, trips: &'a [Trip]) -> &'a [Trip] {
        let start = self.cursor.min(trips.len());
        let end = self.cursor.saturating_add(self.page_size).min(trips.len());
        self.cursor = self.cursor.saturating_add(self.page_size);
        &trips[start..end]
    }
}

/// Show windows of raw rows for as long as the user answers "yes".
pub fn browse(
    console: &mut dyn Console,
    dataset: &TripDataset,
    page_size: NonZeroUsize,
) -> Result<()> {
    let mut pager = RawDataPager::new(page_size);
    let prompt = RAW_DATA_PROMPT.replace("5 rows", &format!("{page_size} rows"));

    while confirm(console, &prompt)? {
        let window = pager.next_window(&dataset.trips);
        if window.is_empty() {
            writeln!(console.out(), "No more rows to display.")?;
        } else {
            let table = render_window(window, dataset.city.has_demographics())?;
            writeln!(console.out(), "{table}")?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

fn text_column(
    name: &str,
    trips: &[Trip],
    cell: impl Fn(&Trip) -> Option<String>,
) -> (Field, ArrayRef) {
    let values: Vec<Option<String>> = trips.iter().map(cell).collect();
    (
        Field::new(name, DataType::Utf8, true),
        Arc::new(StringArray::from(values)) as ArrayRef,
    )
}

/// Render trips as a text table: source row, raw columns, then the
/// derived calendar columns.
pub fn render_window(trips: &[Trip], demographics: bool) -> Result<String> {
    let mut columns = vec![
        text_column("", trips, |t| Some(t.row.to_string())),
        text_column(model::START_TIME, trips, |t| {
            Some(t.start_time.format("%Y-%m-%d %H:%M:%S").to_string())
        }),
        text_column(model::END_TIME, trips, |t| t.end_time.clone()),
        text_column(model::TRIP_DURATION, trips, |t| {
            t.trip_duration.map(|d| d.to_string())
        }),
        text_column(model::START_STATION, trips, |t| Some(t.start_station.clone())),
        text_column(model::END_STATION, trips, |t| Some(t.end_station.clone())),
        text_column(model::USER_TYPE, trips, |t| t.user_type.clone()),
    ];
    if demographics {
        columns.push(text_column(model::GENDER, trips, |t| t.gender.clone()));
        columns.push(text_column(model::BIRTH_YEAR, trips, |t| {
            t.birth_year_whole().map(|y| y.to_string())
        }));
    }
    columns.push(text_column("month", trips, |t| Some(t.month().to_string())));
    columns.push(text_column("day_of_week", trips, |t| {
        Some(t.day_of_week().to_string())
    }));
    columns.push(text_column("hour", trips, |t| Some(t.hour().to_string())));

    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
