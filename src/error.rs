use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a city's backing file into a dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(
        "no data file for {city} in {} (looked for {stem}.csv, {stem}.json, {stem}.parquet)",
        dir.display()
    )]
    MissingFile {
        city: String,
        dir: PathBuf,
        stem: String,
    },

    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}: unsupported file extension '.{extension}'", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("{}, row {row}: unrecognised start time '{value}'", path.display())]
    StartTime {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("{}, row {row}: {message}", path.display())]
    Row {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("{}: {source}", path.display())]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while reading an answer from the console.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input stream reached end-of-file before a valid answer.
    #[error("console input closed")]
    Closed,

    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),
}
