use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::{path::PathBuf, process::ExitCode};

use critical_window::{
    Error, FileStatus, Result, Summary, TableOptions, WindowParams, compute_window, describe,
    read_table_path, table::DEFAULT_OUTPUT, write_selection_path,
};

#[derive(Parser, Debug)]
#[command(
    name = "critical-window",
    version,
    about = "Averages the critical window of a statistic around a percentile",
    allow_negative_numbers = true
)]
struct Cli {
    /// Two-column CSV file: an index, then the statistic of interest
    input: Option<PathBuf>,

    /// Percentile (K) of the sorted statistic the window is centred on
    #[arg(
        short = 'k',
        long,
        env = "CRITICAL_WINDOW_PERCENTILE",
        default_value_t = WindowParams::DEFAULT_PERCENTILE
    )]
    percentile: f64,

    /// Width (W) of the window as a fraction of the number of rows
    #[arg(
        short,
        long,
        env = "CRITICAL_WINDOW_WIDTH",
        default_value_t = WindowParams::DEFAULT_WIDTH
    )]
    width: f64,

    /// Export the window rows, to filtered_data.csv unless a path is given
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT)]
    output: Option<PathBuf>,

    /// The input has no header row
    #[arg(long)]
    no_header: bool,

    /// Leave the header row out of the export
    #[arg(long)]
    no_output_header: bool,

    /// Export only the index column
    #[arg(long)]
    indices_only: bool,
}

impl Cli {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            has_headers: !self.no_header,
            write_headers: !self.no_output_header,
            indices_only: self.indices_only,
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let params = WindowParams::new(cli.percentile, cli.width)?;
    let options = cli.table_options();

    let Some(input) = cli.input.as_ref() else {
        println!("{}", FileStatus::NotLoaded);
        return Ok(());
    };

    let table = read_table_path(input, options.has_headers)?;
    println!("{}", FileStatus::Loaded);

    let selection = match compute_window(&table.dataset, params) {
        Ok(selection) => selection,
        Err(Error::EmptyInput) => {
            println!("{}", Summary::NoData);
            if cli.output.is_some() {
                warn!(input = %input.display(), "nothing to export");
            }
            return Ok(());
        }
        Err(err) => return Err(err),
    };
    println!("{}", Summary::from(&selection));

    if let Some(path) = cli.output.as_ref() {
        write_selection_path(path, &selection, table.headers.as_ref(), options)?;
        info!(path = %path.display(), rows = selection.len(), "window exported");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(error = %err, "critical window failed");
            eprintln!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}
