//! NetCDF-4 writing for generated datasets.

use std::path::Path;

use tracing::info;

use crate::dataset::GriddedDataset;
use crate::error::{NetCdfError, NetCdfResult};
use crate::native::silence_hdf5_errors;

/// How a dataset is laid out on disk.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Name used for the longitude dimension/coordinate.
    pub x_name: String,
    /// Name used for the latitude dimension/coordinate.
    pub y_name: String,
    /// Store the time coordinate as 32-bit integers instead of doubles.
    pub integer_time: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            x_name: "lon".to_string(),
            y_name: "lat".to_string(),
            integer_time: true,
        }
    }
}

/// Write a dataset as `(time, y, x)` variables with 1-D coordinates.
///
/// Variables with a single time step are written without the time dimension.
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    dataset: &GriddedDataset,
    options: &WriteOptions,
) -> NetCdfResult<()> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let mut file = netcdf::create(path)?;

    let time = dataset.time();
    file.add_dimension("time", time.len())?;
    file.add_dimension(&options.y_name, dataset.y().len())?;
    file.add_dimension(&options.x_name, dataset.x().len())?;

    for (name, value) in dataset.attributes() {
        file.add_attribute(name, value.as_str())?;
    }

    if options.integer_time {
        let values = time
            .values
            .iter()
            .map(|v| integer_time(*v))
            .collect::<NetCdfResult<Vec<i32>>>()?;
        let mut time_var = file.add_variable::<i32>("time", &["time"])?;
        time_var.put_values(&values, ..)?;
        if let Some(units) = &time.units {
            time_var.put_attribute("units", units.as_str())?;
        }
        time_var.put_attribute("calendar", "gregorian")?;
    } else {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_values(&time.values, ..)?;
        if let Some(units) = &time.units {
            time_var.put_attribute("units", units.as_str())?;
        }
        time_var.put_attribute("calendar", "gregorian")?;
    }

    {
        let mut y_var = file.add_variable::<f64>(&options.y_name, &[options.y_name.as_str()])?;
        y_var.put_attribute("units", "degrees_north")?;
        y_var.put_attribute("standard_name", "latitude")?;
        y_var.put_values(dataset.y(), ..)?;
    }

    {
        let mut x_var = file.add_variable::<f64>(&options.x_name, &[options.x_name.as_str()])?;
        x_var.put_attribute("units", "degrees_east")?;
        x_var.put_attribute("standard_name", "longitude")?;
        x_var.put_values(dataset.x(), ..)?;
    }

    for var in dataset.variables() {
        let dims: Vec<&str> = if var.time_steps() == time.len() {
            vec!["time", options.y_name.as_str(), options.x_name.as_str()]
        } else {
            vec![options.y_name.as_str(), options.x_name.as_str()]
        };
        let mut nc_var = file.add_variable::<f64>(var.name(), &dims)?;
        if let Some(units) = var.units() {
            nc_var.put_attribute("units", units)?;
        }
        nc_var.put_values(var.values(), ..)?;
    }

    info!(
        path = %path.display(),
        variables = dataset.variable_names().len(),
        "Wrote NetCDF dataset"
    );

    Ok(())
}

fn integer_time(value: f64) -> NetCdfResult<i32> {
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(NetCdfError::InvalidFormat(format!(
            "Time value {} cannot be stored as an integer",
            value
        )));
    }
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_time() {
        assert_eq!(integer_time(23.0).unwrap(), 23);
        assert!(integer_time(0.5).is_err());
        assert!(integer_time(f64::NAN).is_err());
    }
}
