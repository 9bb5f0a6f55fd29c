//! crm-filter: run the contacts advanced filter over JSON exports from the
//! command line.

use std::path::PathBuf;
use std::process;

use clap::Parser;

mod display;
mod error;
mod loader;

use display::OutputMode;
use error::ConsoleError;
use loader::{Inputs, Sources};

/// Apply an advanced contact filter to a JSON record export.
#[derive(Parser, Debug)]
#[command(name = "crm-filter", version)]
struct Cli {
    /// JSON array of contact records.
    #[arg(short, long)]
    records: PathBuf,

    /// JSON lookup maps: `{ "<field>": { "<id>": "<label>" } }`.
    #[arg(short, long)]
    lookups: Option<PathBuf>,

    /// Filter configuration as saved by the filter builder. Without one,
    /// every record is returned.
    #[arg(short, long)]
    filter: Option<PathBuf>,

    /// Field catalog JSON (default: the stock contacts catalog).
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Reject filters with unknown fields or operators instead of
    /// evaluating them leniently.
    #[arg(long)]
    strict: bool,

    /// Print only the filter description.
    #[arg(short, long)]
    describe: bool,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,
}

impl Cli {
    fn sources(&self) -> Sources {
        Sources {
            records: self.records.clone(),
            lookups: self.lookups.clone(),
            filter: self.filter.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

fn execute(cli: &Cli) -> Result<String, ConsoleError> {
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };

    let inputs = Inputs::load(&cli.sources())?;
    let (engine, report) = loader::run(&inputs, cli.strict)?;

    Ok(if cli.describe {
        display::render_description(&report, &mode)
    } else {
        display::render(&report, engine.catalog(), &mode)
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            tracing::error!(error = %e, "filter run failed");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
