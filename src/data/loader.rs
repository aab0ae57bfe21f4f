use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    self, parse_start_time, RawTrip, Trip, TripDataset, DEMOGRAPHIC_COLUMNS, REQUIRED_COLUMNS,
};
use crate::config::City;
use crate::error::LoadError;

/// Extensions tried, in order, when looking for a city's file.
const EXTENSIONS: [&str; 3] = ["csv", "json", "parquet"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Locate the backing file for `city` inside `data_dir`.
pub fn locate(data_dir: &Path, city: City) -> Result<PathBuf, LoadError> {
    EXTENSIONS
        .iter()
        .map(|ext| data_dir.join(format!("{}.{ext}", city.file_stem())))
        .find(|p| p.is_file())
        .ok_or_else(|| LoadError::MissingFile {
            city: city.to_string(),
            dir: data_dir.to_path_buf(),
            stem: city.file_stem().to_string(),
        })
}

/// Load every trip of `city` from `data_dir`, deriving month/day/hour.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripDataset, LoadError> {
    let path = locate(data_dir, city)?;
    load_file(&path, city)
}

/// Load a trip file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; one trip per line (the usual layout)
/// * `.json`    – `[{ "Start Time": "...", "Start Station": "...", ... }, ...]`
/// * `.parquet` – one column per field; any column type castable to text
pub fn load_file(path: &Path, city: City) -> Result<TripDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, raws) = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    check_columns(path, city, &columns)?;

    let trips = raws
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let start = parse_start_time(&raw.start_time).ok_or_else(|| LoadError::StartTime {
                path: path.to_path_buf(),
                row,
                value: raw.start_time.clone(),
            })?;
            Ok(Trip::new(row, start, raw))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    info!("loaded {} trips for {city} from {}", trips.len(), path.display());

    Ok(TripDataset {
        city,
        source: path.to_path_buf(),
        columns,
        trips,
    })
}

/// A file is malformed if it lacks a column the reports read.
fn check_columns(path: &Path, city: City, columns: &[String]) -> Result<(), LoadError> {
    let demographics: &[&str] = if city.has_demographics() {
        &DEMOGRAPHIC_COLUMNS
    } else {
        &[]
    };
    for required in REQUIRED_COLUMNS.iter().chain(demographics) {
        if !columns.iter().any(|c| c == required) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<RawTrip>), LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    // Validate before decoding so a missing column is reported as such
    // rather than as a per-row decode failure.
    if !columns.iter().any(|c| c == model::START_TIME) {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: model::START_TIME.to_string(),
        });
    }

    let raws = reader
        .deserialize::<RawTrip>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    debug!("csv {}: {} rows, columns {columns:?}", path.display(), raws.len());
    Ok((columns, raws))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Start Time": "2017-01-01 09:07:57", "Start Station": "...", "Trip Duration": 776, ... },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<(Vec<String>, Vec<RawTrip>), LoadError> {
    let json_err = |source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    };

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(json_err)?;

    let records = root.as_array().ok_or_else(|| LoadError::Row {
        path: path.to_path_buf(),
        row: 0,
        message: "expected a top-level JSON array of records".to_string(),
    })?;

    let mut columns: Vec<String> = Vec::new();
    let mut raws = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Row {
            path: path.to_path_buf(),
            row: i,
            message: "record is not a JSON object".to_string(),
        })?;

        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }

        if !obj.contains_key(model::START_TIME) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: model::START_TIME.to_string(),
            });
        }

        let raw: RawTrip = serde_json::from_value(rec.clone()).map_err(json_err)?;
        raws.push(raw);
    }

    Ok((columns, raws))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of trips.
///
/// Column types are not fixed: every column is cast to text and parsed
/// the same way as a CSV cell, so files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`) both work,
/// including native timestamp columns.
fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<RawTrip>), LoadError> {
    let arrow_err = |source| LoadError::Arrow {
        path: path.to_path_buf(),
        source,
    };
    let parquet_err = |source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(parquet_err)?;

    let mut raws = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(arrow_err)?;
        let schema = batch.schema();

        // Text view of a column, or None when the file lacks it.
        let text_column = |name: &str| -> Result<Option<Vec<Option<String>>>, LoadError> {
            let Ok(idx) = schema.index_of(name) else {
                return Ok(None);
            };
            let as_text = cast(batch.column(idx), &DataType::Utf8).map_err(arrow_err)?;
            let strings = as_text.as_string::<i32>();
            Ok(Some(
                (0..strings.len())
                    .map(|row| (!strings.is_null(row)).then(|| strings.value(row).to_string()))
                    .collect(),
            ))
        };

        let start_time =
            text_column(model::START_TIME)?.ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: model::START_TIME.to_string(),
            })?;
        let end_time = text_column(model::END_TIME)?;
        let trip_duration = text_column(model::TRIP_DURATION)?;
        let start_station = text_column(model::START_STATION)?;
        let end_station = text_column(model::END_STATION)?;
        let user_type = text_column(model::USER_TYPE)?;
        let gender = text_column(model::GENDER)?;
        let birth_year = text_column(model::BIRTH_YEAR)?;

        let cell = |col: &Option<Vec<Option<String>>>, row: usize| -> Option<String> {
            col.as_ref()
                .and_then(|values| values[row].clone())
                .filter(|s| !s.is_empty())
        };

        let offset = raws.len();
        for row in 0..batch.num_rows() {
            let number = |col: &Option<Vec<Option<String>>>, name: &str| {
                cell(col, row)
                    .map(|s| {
                        s.trim().parse::<f64>().map_err(|_| LoadError::Row {
                            path: path.to_path_buf(),
                            row: offset + row,
                            message: format!("'{name}' value '{s}' is not a number"),
                        })
                    })
                    .transpose()
            };

            raws.push(RawTrip {
                start_time: start_time[row].clone().unwrap_or_default(),
                end_time: cell(&end_time, row),
                trip_duration: number(&trip_duration, model::TRIP_DURATION)?,
                start_station: cell(&start_station, row).unwrap_or_default(),
                end_station: cell(&end_station, row).unwrap_or_default(),
                user_type: cell(&user_type, row),
                gender: cell(&gender, row),
                birth_year: number(&birth_year, model::BIRTH_YEAR)?,
            });
        }
    }

    Ok((columns, raws))
}
