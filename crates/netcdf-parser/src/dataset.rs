//! In-memory gridded dataset types.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hiwat_common::CrsCode;

use crate::error::{NetCdfError, NetCdfResult};
use crate::time::TimeAxis;

/// One physical variable laid out as `(time, y, x)` in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridVariable {
    name: String,
    units: Option<String>,
    crs: Option<CrsCode>,
    time_steps: usize,
    height: usize,
    width: usize,
    values: Vec<f64>,
}

impl GridVariable {
    /// Create a variable from canonical `(time, y, x)` values.
    pub fn new(
        name: impl Into<String>,
        time_steps: usize,
        height: usize,
        width: usize,
        values: Vec<f64>,
    ) -> NetCdfResult<Self> {
        let name = name.into();
        let expected = time_steps * height * width;
        if values.len() != expected {
            return Err(NetCdfError::InvalidFormat(format!(
                "Variable {} has {} values, expected {} ({}x{}x{})",
                name,
                values.len(),
                expected,
                time_steps,
                height,
                width
            )));
        }
        Ok(Self {
            name,
            units: None,
            crs: None,
            time_steps,
            height,
            width,
            values,
        })
    }

    /// Set the units attribute.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// CRS attached by [`GriddedDataset::write_crs`].
    pub fn crs(&self) -> Option<CrsCode> {
        self.crs
    }

    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Shape as `(time, y, x)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.time_steps, self.height, self.width)
    }

    /// All values, time-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The 2-D slice for one time step, `y`-major.
    ///
    /// # Panics
    ///
    /// Panics if `t` is not less than [`time_steps`](Self::time_steps).
    pub fn slice(&self, t: usize) -> &[f64] {
        let cells = self.height * self.width;
        &self.values[t * cells..(t + 1) * cells]
    }
}

/// A collection of variables sharing `x`/`y`/`time` axes.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedDataset {
    source: Option<PathBuf>,
    x: Vec<f64>,
    y: Vec<f64>,
    time: TimeAxis,
    variables: BTreeMap<String, GridVariable>,
    attributes: BTreeMap<String, String>,
}

impl GriddedDataset {
    /// Assemble a dataset, checking every variable against the axes.
    ///
    /// A variable may have either the full number of time steps or a single one.
    pub fn from_parts(
        x: Vec<f64>,
        y: Vec<f64>,
        time: TimeAxis,
        variables: Vec<GridVariable>,
    ) -> NetCdfResult<Self> {
        let mut by_name = BTreeMap::new();
        for var in variables {
            if var.width != x.len() || var.height != y.len() {
                return Err(NetCdfError::InvalidFormat(format!(
                    "Variable {} is {}x{} but the grid is {}x{}",
                    var.name,
                    var.height,
                    var.width,
                    y.len(),
                    x.len()
                )));
            }
            if var.time_steps != time.len() && var.time_steps != 1 {
                return Err(NetCdfError::InvalidFormat(format!(
                    "Variable {} has {} time steps but the time axis has {}",
                    var.name,
                    var.time_steps,
                    time.len()
                )));
            }
            by_name.insert(var.name.clone(), var);
        }

        Ok(Self {
            source: None,
            x,
            y,
            time,
            variables: by_name,
            attributes: BTreeMap::new(),
        })
    }

    /// Record the file this dataset was read from.
    pub fn with_source(mut self, path: impl AsRef<Path>) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add a global attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attach a coordinate reference system to every data variable.
    pub fn write_crs(&mut self, crs: CrsCode) {
        for var in self.variables.values_mut() {
            var.crs = Some(crs);
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Longitude axis values (canonical `x`).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Latitude axis values (canonical `y`).
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn time_steps(&self) -> usize {
        self.time.len()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn variable(&self, name: &str) -> Option<&GridVariable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &GridVariable> {
        self.variables.values()
    }

    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> (Vec<f64>, Vec<f64>, TimeAxis) {
        (
            vec![88.0, 89.0, 90.0],
            vec![20.0, 21.0],
            TimeAxis::new(vec![0.0, 1.0], None),
        )
    }

    #[test]
    fn test_variable_slice() {
        let var = GridVariable::new("rain", 2, 2, 3, (0..12).map(f64::from).collect()).unwrap();
        assert_eq!(var.shape(), (2, 2, 3));
        assert_eq!(var.slice(0), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(var.slice(1), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_variable_length_mismatch() {
        let result = GridVariable::new("rain", 2, 2, 3, vec![0.0; 11]);
        assert!(matches!(result, Err(NetCdfError::InvalidFormat(_))));
    }

    #[test]
    fn test_from_parts_checks_grid() {
        let (x, y, time) = axes();
        let bad = GridVariable::new("rain", 2, 3, 2, vec![0.0; 12]).unwrap();
        assert!(GriddedDataset::from_parts(x, y, time, vec![bad]).is_err());
    }

    #[test]
    fn test_write_crs_tags_all_variables() {
        let (x, y, time) = axes();
        let rain = GridVariable::new("rain", 2, 2, 3, vec![0.0; 12]).unwrap();
        let orography = GridVariable::new("orog", 1, 2, 3, vec![0.0; 6]).unwrap();
        let mut ds = GriddedDataset::from_parts(x, y, time, vec![rain, orography]).unwrap();
        assert!(ds.variables().all(|v| v.crs().is_none()));

        ds.write_crs(CrsCode::Epsg4326);
        assert!(ds.variables().all(|v| v.crs() == Some(CrsCode::Epsg4326)));
        assert_eq!(ds.variable_names(), vec!["orog", "rain"]);
    }
}
