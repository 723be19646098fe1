//! Data preparation CLI
//!
//! Generates a dummy forecast, inspects NetCDF files and cleans district
//! boundary files for the calendar service.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dataprep::{clean_districts_file, describe, write_dummy, DummyOptions, DEFAULT_NAME_FIELD};
use grid_processor::VariableNames;
use storage::{LocalStore, FALLBACK_FILE_NAME};

#[derive(Parser, Debug)]
#[command(name = "dataprep")]
#[command(about = "Data preparation tools for the HIWAT calendar service")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a seeded synthetic forecast into the store
    MakeDummy {
        /// Store directory
        #[arg(long, default_value = "./_store", env = "HIWAT_STORE")]
        store: PathBuf,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Print the variables and coordinates of a dataset
    Peek {
        /// NetCDF file (default: the fallback file in the store)
        file: Option<PathBuf>,

        /// Store directory, used when no file is given
        #[arg(long, default_value = "./_store", env = "HIWAT_STORE")]
        store: PathBuf,
    },

    /// Reduce a GADM level-2 file to district names and polygons
    CleanDistricts {
        /// Input GeoJSON
        #[arg(long)]
        input: PathBuf,

        /// Output GeoJSON
        #[arg(long)]
        output: PathBuf,

        /// Property holding the district name
        #[arg(long, default_value = DEFAULT_NAME_FIELD)]
        field: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::MakeDummy { store, seed } => {
            let store = LocalStore::open(&store)
                .with_context(|| format!("Failed to open store {}", store.display()))?;
            let options = DummyOptions {
                seed,
                names: VariableNames::from_env(),
                ..DummyOptions::default()
            };
            let path = write_dummy(&store, &options)?;
            println!("Wrote {}", path.display());
            let dataset = netcdf_parser::open_dataset(&path)?;
            print!("{}", describe(&dataset));
        }
        Command::Peek { file, store } => {
            let path = file.unwrap_or_else(|| store.join(FALLBACK_FILE_NAME));
            info!(path = %path.display(), "Peeking dataset");
            let dataset = netcdf_parser::open_dataset(&path)?;
            print!("{}", describe(&dataset));
        }
        Command::CleanDistricts {
            input,
            output,
            field,
        } => {
            let report = clean_districts_file(&input, &output, &field)?;
            println!("Number of unique districts: {}", report.unique_names);
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}
