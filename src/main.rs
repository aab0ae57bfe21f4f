mod config;
mod console;
mod data;
mod error;
mod pager;
mod report;
mod session;
mod stats;

use std::io::{self, IsTerminal};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use config::{Settings, DEFAULT_PAGE_SIZE};
use console::{Console, LineConsole, TerminalConsole};
use error::InputError;

#[derive(Parser, Debug)]
#[clap(
    name = "bikeshare-explorer",
    version,
    about = "Explore US bikeshare trip data from the command line"
)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[clap(long, short, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Rows shown per raw-data window (at least 1)
    #[clap(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: NonZeroUsize,

    /// Log filter (e.g. "info", "bikeshare_explorer=debug"); RUST_LOG takes precedence
    #[clap(long, short, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .parse_default_env()
        .init();

    let settings = Settings {
        data_dir: cli.data_dir,
        page_size: cli.page_size,
    };
    debug!("settings: {settings:?}");

    let mut console: Box<dyn Console> = if io::stdin().is_terminal() {
        Box::new(TerminalConsole::new())
    } else {
        Box::new(LineConsole::new(io::stdin().lock(), io::stdout()))
    };

    match session::run(console.as_mut(), &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<InputError>(), Some(InputError::Closed)) => {
            // End of input counts as declining to continue.
            println!("\n{}", session::GOODBYE);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_to_five() {
        let cli = Cli::try_parse_from(["bikeshare-explorer"]).unwrap();
        assert_eq!(cli.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cli.page_size.get(), 5);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["bikeshare-explorer", "--page-size", "0"]).is_err());
        let cli = Cli::try_parse_from(["bikeshare-explorer", "--page-size", "12"]).unwrap();
        assert_eq!(cli.page_size.get(), 12);
    }
}
