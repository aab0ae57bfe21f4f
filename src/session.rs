use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::{City, Settings, ALL, DAYS, MONTHS};
use crate::console::{choose, confirm, Console};
use crate::data::filter::{self, FilterSelection};
use crate::data::loader;
use crate::pager;
use crate::report;

const CITY_PROMPT: &str = "Choose a city (chicago, new york city, washington): ";
const MONTH_PROMPT: &str = "Choose a month (january to december) or 'all': ";
const DAY_PROMPT: &str = "Choose a day (sunday to saturday) or 'all': ";
const RESTART_PROMPT: &str = "Would you like to restart? (yes/no): ";

pub const NO_MATCHES: &str = "No trips match the selected filters.";
pub const GOODBYE: &str = "Thank you for exploring the data. Goodbye!";

/// Prompt for city, month and day.
pub fn collect_filters(console: &mut dyn Console) -> Result<FilterSelection> {
    writeln!(console.out(), "Welcome! Let's explore US bikeshare data!")?;

    let city_id = choose(console, CITY_PROMPT, &City::ids())?;
    let months: Vec<&'static str> = MONTHS.iter().copied().chain([ALL]).collect();
    let month = choose(console, MONTH_PROMPT, &months)?;
    let days: Vec<&'static str> = DAYS.iter().copied().chain([ALL]).collect();
    let day = choose(console, DAY_PROMPT, &days)?;

    let city = City::from_id(city_id).with_context(|| format!("unknown city '{city_id}'"))?;
    Ok(FilterSelection::new(city, month, day))
}

/// One iteration: load, report, page. Does not ask to restart.
pub fn explore(
    console: &mut dyn Console,
    selection: &FilterSelection,
    settings: &Settings,
) -> Result<()> {
    let dataset = loader::load_city(&settings.data_dir, selection.city)
        .with_context(|| format!("loading trips for {}", selection.city))?;
    debug!(
        "{}: columns {:?}",
        dataset.source.display(),
        dataset.columns
    );
    let dataset = filter::apply(dataset, selection);
    info!("{selection}: {} trips", dataset.len());

    if dataset.is_empty() {
        warn!("no trips for {selection}");
        writeln!(console.out(), "\n{NO_MATCHES}")?;
        return Ok(());
    }

    report::report_all(&dataset, console.out())?;
    pager::browse(console, &dataset, settings.page_size)
}

/// Run sessions until the user declines to restart.
pub fn run(console: &mut dyn Console, settings: &Settings) -> Result<()> {
    loop {
        let selection = collect_filters(console)?;
        explore(console, &selection, settings)?;

        if !confirm(console, RESTART_PROMPT)? {
            writeln!(console.out(), "{GOODBYE}")?;
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::console::LineConsole;
    use crate::data::fixtures::{CHICAGO_CSV, WASHINGTON_CSV};
    use crate::error::{InputError, LoadError};

    type Scripted = LineConsole<Cursor<Vec<u8>>, Vec<u8>>;

    fn scripted(answers: &[&str]) -> Scripted {
        let mut input = answers.join("\n");
        input.push('\n');
        LineConsole::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    fn printed(console: &Scripted) -> String {
        String::from_utf8(console.output().clone()).unwrap()
    }

    fn data_dir() -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO_CSV).unwrap();
        fs::write(dir.path().join("washington.csv"), WASHINGTON_CSV).unwrap();
        let settings = Settings {
            data_dir: dir.path().to_path_buf(),
            ..Settings::default()
        };
        (dir, settings)
    }

    #[test]
    fn collects_the_filter_triple() {
        let mut console = scripted(&["New York City", "march", "All"]);
        let sel = collect_filters(&mut console).unwrap();
        assert_eq!(sel.city, City::NewYorkCity);
        assert_eq!(sel.month, Some("march"));
        assert_eq!(sel.day, None);
    }

    #[test]
    fn chicago_june_reports_june() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&["chicago", "june", "all", "no", "no"]);
        run(&mut console, &settings).unwrap();

        let out = printed(&console);
        assert!(out.contains("Most Common Month: june"));
        assert!(out.contains("Most Common Start Station: Wood St & Hubbard St"));
        assert!(out.contains(
            "Most Frequent Trip: Wood St & Hubbard St -> Damen Ave & Chicago Ave (3 trips)"
        ));
        // June rows: 321 + 586 + 563 + 317 seconds.
        assert!(out.contains("Total Travel Time (seconds): 1787 "));
        assert!(out.contains("Gender Breakdown:"));
        assert!(out.trim_end().ends_with(GOODBYE));
    }

    #[test]
    fn washington_skips_demographics_without_error() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&["washington", "all", "all", "yes", "no", "no"]);
        run(&mut console, &settings).unwrap();

        let out = printed(&console);
        assert!(out.contains("No gender or birth year data available for Washington."));
        assert!(out.contains("14th & Belmont St NW"));
        assert!(!out.contains("Gender Breakdown"));
    }

    #[test]
    fn empty_selection_skips_statistics() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&["chicago", "december", "all", "no"]);
        run(&mut console, &settings).unwrap();

        let out = printed(&console);
        assert!(out.contains(NO_MATCHES));
        assert!(!out.contains("Most Common Month"));
        assert!(!out.contains("raw data"));
    }

    #[test]
    fn restart_runs_another_session() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&[
            "chicago", "all", "monday", "no", "yes", "washington", "march", "all", "no", "no",
        ]);
        run(&mut console, &settings).unwrap();

        let out = printed(&console);
        assert_eq!(out.matches("Welcome!").count(), 2);
        assert!(out.contains("Most Common Day of Week: monday"));
        assert!(out.contains("Most Common Month: march"));
    }

    #[test]
    fn missing_city_file_is_a_load_error() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&["new york city", "all", "all"]);
        let err = run(&mut console, &settings).unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
    }

    #[test]
    fn closed_input_surfaces_as_input_error() {
        let (_dir, settings) = data_dir();
        let mut console = scripted(&["chicago"]);
        let err = run(&mut console, &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::Closed)
        ));
    }
}
