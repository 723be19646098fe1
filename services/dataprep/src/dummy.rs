//! Seeded synthetic forecast on a small grid over Bangladesh.
//!
//! The values are random but shaped like the real product: rainfall is a
//! non-negative amount, the probabilities are fractions, hail only occurs
//! where lightning is likely, and temperature is in Kelvin.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use grid_processor::VariableNames;
use netcdf_parser::{write_dataset, GridVariable, GriddedDataset, TimeAxis, WriteOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use storage::{run_file_name, LocalStore, HIWAT_PREFIX};
use tracing::info;

/// `title` attribute of generated files.
pub const DUMMY_TITLE: &str = "Dummy HIWAT test file";

const LON_RANGE: (f64, f64) = (88.0, 93.5);
const LAT_RANGE: (f64, f64) = (20.5, 26.5);
const RAIN_STD_DEV: f64 = 2.0;
const TEMP_MEAN_K: f64 = 298.15;
const TEMP_STD_DEV: f64 = 2.0;
const HAIL_THRESHOLD: f64 = 0.4;
const HAIL_SCALE: f64 = 0.7;

/// Shape and seed of the generated forecast.
#[derive(Debug, Clone)]
pub struct DummyOptions {
    pub seed: u64,
    /// Hourly steps.
    pub steps: usize,
    /// Cells per side.
    pub size: usize,
    pub names: VariableNames,
}

impl Default for DummyOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            steps: 24,
            size: 20,
            names: VariableNames::default(),
        }
    }
}

/// Initialisation time of the dummy run, 2025-10-03 00:00.
pub fn dummy_run_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 3)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Build the dummy forecast in memory.
pub fn dummy_dataset(options: &DummyOptions) -> Result<GriddedDataset> {
    let DummyOptions {
        seed,
        steps,
        size,
        names,
    } = options;
    let (steps, size) = (*steps, *size);
    let cells = steps * size * size;
    let mut rng = StdRng::seed_from_u64(*seed);

    let rain_dist = Normal::new(0.0, RAIN_STD_DEV).context("Invalid rainfall distribution")?;
    let temp_dist =
        Normal::new(TEMP_MEAN_K, TEMP_STD_DEV).context("Invalid temperature distribution")?;

    // Draw order is fixed so a seed always yields the same file
    let rain: Vec<f64> = (0..cells).map(|_| rain_dist.sample(&mut rng).abs()).collect();
    let lightning: Vec<f64> = (0..cells).map(|_| rng.gen::<f64>()).collect();
    let hail: Vec<f64> = lightning
        .iter()
        .map(|l| (l - HAIL_THRESHOLD).clamp(0.0, 1.0) * HAIL_SCALE)
        .collect();
    let wind: Vec<f64> = (0..cells).map(|_| rng.gen::<f64>()).collect();
    let temp: Vec<f64> = (0..cells).map(|_| temp_dist.sample(&mut rng)).collect();

    let variable = |name: &str, values: Vec<f64>, units: &str| {
        GridVariable::new(name, steps, size, size, values).map(|v| v.with_units(units))
    };
    let variables = vec![
        variable(&names.rain, rain, "mm")?,
        variable(&names.lightning, lightning, "1")?,
        variable(&names.hail, hail, "1")?,
        variable(&names.wind20kt, wind, "1")?,
        variable(&names.mean_temp, temp, "K")?,
    ];

    let time = TimeAxis::new(
        (0..steps).map(|t| t as f64).collect(),
        Some(format!(
            "hours since {}",
            dummy_run_time().format("%Y-%m-%d %H:%M:%S")
        )),
    );

    let dataset = GriddedDataset::from_parts(
        linspace(LON_RANGE, size),
        linspace(LAT_RANGE, size),
        time,
        variables,
    )?
    .with_attribute("title", DUMMY_TITLE);

    Ok(dataset)
}

/// Generate the dummy forecast and write it into `store` under the run file
/// name for [`dummy_run_time`]. Returns the written path.
pub fn write_dummy(store: &LocalStore, options: &DummyOptions) -> Result<PathBuf> {
    let dataset = dummy_dataset(options)?;
    let path = store
        .root()
        .join(run_file_name(HIWAT_PREFIX, dummy_run_time()));

    write_dataset(&path, &dataset, &WriteOptions::default())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        seed = options.seed,
        steps = options.steps,
        size = options.size,
        "Wrote dummy forecast"
    );
    Ok(path)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace((start, end): (f64, f64), n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
