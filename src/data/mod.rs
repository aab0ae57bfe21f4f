/// Data layer: trip model, loading, and filtering.
///
/// Architecture:
/// ```text
///  <city>.csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripDataset (derived month/day/hour)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ TripDataset  │  Vec<Trip>, column names
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / day selection → narrowed TripDataset
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;

#[cfg(test)]
pub mod fixtures;
