use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Static lookup tables
// ---------------------------------------------------------------------------

/// Answer meaning "no narrowing" for the month and day prompts.
pub const ALL: &str = "all";

/// Lowercase month names, January first.
pub const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Lowercase weekday names, Sunday first.
pub const DAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

pub const YES_NO: [&str; 2] = ["yes", "no"];

/// Default number of rows shown per raw-data window.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => panic!("page size must be non-zero"),
};

// ---------------------------------------------------------------------------
// City – one supported dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The identifier typed at the city prompt.
    pub fn id(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name without extension, looked up in the data directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new_york_city",
            City::Washington => "washington",
        }
    }

    /// Whether the city's file carries `Gender` and `Birth Year` columns.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }

    pub fn from_id(id: &str) -> Option<City> {
        City::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn ids() -> [&'static str; 3] {
        City::ALL.map(City::id)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

/// Settings resolved from the command line / environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the per-city data files.
    pub data_dir: PathBuf,
    /// Rows per raw-data window.
    pub page_size: NonZeroUsize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
