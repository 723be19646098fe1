//! Native NetCDF reading using the netcdf library.
//!
//! Opens a forecast file, identifies its horizontal and time axes, and loads
//! every `(time, y, x)` data variable into a [`GriddedDataset`] with packed
//! values unpacked and fill values replaced by NaN.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Once;

use hiwat_common::CrsCode;
use tracing::{debug, info};

use crate::axes::{find_time_dimension, resolve_spatial_axes, AxisSource};
use crate::dataset::{GridVariable, GriddedDataset};
use crate::error::{NetCdfError, NetCdfResult};
use crate::time::TimeAxis;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing a variable with
/// the wrong numeric type). This disables that output. It only needs to be
/// called once per process, but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a gridded forecast file.
///
/// The horizontal axes are renamed to `x`/`y` and every data variable is
/// tagged with EPSG:4326. Nothing is cached: each call re-reads the file.
pub fn open_dataset<P: AsRef<Path>>(path: P) -> NetCdfResult<GriddedDataset> {
    let path = path.as_ref();
    silence_hdf5_errors();

    let file = netcdf::open(path).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to open NetCDF {}: {}", path.display(), e))
    })?;

    let dims: Vec<String> = file.dimensions().map(|d| d.name()).collect();
    let coords = coordinate_names(&file);
    let axes = resolve_spatial_axes(&coords, &dims)?;

    let (x_dim, x) = read_axis(&file, &axes.x)?;
    let (y_dim, y) = read_axis(&file, &axes.y)?;

    let time_dim = find_time_dimension(&dims).map(str::to_string);
    let time = match &time_dim {
        Some(name) => read_time_axis(&file, name)?,
        None => TimeAxis::single(),
    };

    debug!(
        x_source = axes.x.source_name(),
        y_source = axes.y.source_name(),
        time_dim = ?time_dim,
        "Resolved dataset axes"
    );

    let layout = Layout {
        time: time_dim.as_deref(),
        y: &y_dim,
        x: &x_dim,
    };

    let mut variables = Vec::new();
    for var in file.variables() {
        let name = var.name();
        if coords.contains(&name) || dims.contains(&name) {
            continue;
        }
        let var_dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
        let lens: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let Some(positions) = layout.positions(&var_dims) else {
            debug!(variable = %name, dims = ?var_dims, "Skipping non-grid variable");
            continue;
        };

        let raw = read_as_f64(&var)?;
        let unpacked = unpack(&var, raw);
        let time_steps = positions.time.map(|p| lens[p]).unwrap_or(1);
        let values = to_canonical(&unpacked, &lens, &positions);

        let mut grid_var = GridVariable::new(&name, time_steps, y.len(), x.len(), values)?;
        if let Some(units) = get_str_attr(&var, "units") {
            grid_var = grid_var.with_units(units);
        }
        variables.push(grid_var);
    }

    let mut dataset = GriddedDataset::from_parts(x, y, time, variables)?.with_source(path);
    for attr in file.attributes() {
        if let Ok(netcdf::AttributeValue::Str(value)) = attr.value() {
            dataset = dataset.with_attribute(attr.name(), value);
        }
    }
    dataset.write_crs(CrsCode::Epsg4326);

    info!(
        path = %path.display(),
        variables = dataset.variable_names().len(),
        time_steps = dataset.time_steps(),
        width = dataset.x().len(),
        height = dataset.y().len(),
        "Opened gridded dataset"
    );

    Ok(dataset)
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Names of coordinate variables: 1-D variables named after their dimension,
/// plus anything listed in a `coordinates` attribute.
fn coordinate_names(file: &netcdf::File) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = BTreeSet::new();
    let mut listed = Vec::new();

    for var in file.variables() {
        let name = var.name();
        let dims = var.dimensions();
        if dims.len() == 1 && dims[0].name() == name && seen.insert(name.clone()) {
            names.push(name);
        }
        if let Some(attr) = get_str_attr(&var, "coordinates") {
            listed.extend(attr.split_whitespace().map(str::to_string));
        }
    }

    for name in listed {
        if file.variable(&name).is_some() && seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

/// Read axis values and return them with the dimension they index.
fn read_axis(file: &netcdf::File, source: &AxisSource) -> NetCdfResult<(String, Vec<f64>)> {
    match source {
        AxisSource::Coordinate(name) => {
            let var = file
                .variable(name)
                .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
            let dims = var.dimensions();
            if dims.len() != 1 {
                return Err(NetCdfError::InvalidFormat(format!(
                    "Coordinate {} must be 1-D, found {} dimensions",
                    name,
                    dims.len()
                )));
            }
            let dim = dims[0].name();
            Ok((dim, read_as_f64(&var)?))
        }
        AxisSource::Dimension(name) => {
            let len = file
                .dimension(name)
                .ok_or_else(|| NetCdfError::MissingData(format!("{} dimension", name)))?
                .len();
            Ok((name.clone(), (0..len).map(|i| i as f64).collect()))
        }
    }
}

fn read_time_axis(file: &netcdf::File, dim: &str) -> NetCdfResult<TimeAxis> {
    match file.variable(dim) {
        Some(var) => {
            let units = get_str_attr(&var, "units");
            Ok(TimeAxis::new(read_as_f64(&var)?, units))
        }
        None => {
            let len = file
                .dimension(dim)
                .ok_or_else(|| NetCdfError::MissingData(format!("{} dimension", dim)))?
                .len();
            Ok(TimeAxis::new((0..len).map(|i| i as f64).collect(), None))
        }
    }
}

/// Source dimension names for the canonical axes.
struct Layout<'a> {
    time: Option<&'a str>,
    y: &'a str,
    x: &'a str,
}

/// Positions of the canonical axes within a variable's dimension list.
struct Positions {
    time: Option<usize>,
    y: usize,
    x: usize,
}

impl Layout<'_> {
    /// Locate the axes in `dims`, or `None` if the variable is not a
    /// `(time?, y, x)` grid.
    fn positions(&self, dims: &[String]) -> Option<Positions> {
        let find = |name: &str| dims.iter().position(|d| d == name);
        let y = find(self.y)?;
        let x = find(self.x)?;
        let time = self.time.and_then(find);
        let expected = 2 + usize::from(time.is_some());
        (dims.len() == expected).then_some(Positions { time, y, x })
    }
}

/// Reorder row-major values with arbitrary axis order into `(time, y, x)`.
fn to_canonical(raw: &[f64], lens: &[usize], pos: &Positions) -> Vec<f64> {
    let mut strides = vec![1usize; lens.len()];
    for i in (0..lens.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * lens[i + 1];
    }

    let nt = pos.time.map(|p| lens[p]).unwrap_or(1);
    let ny = lens[pos.y];
    let nx = lens[pos.x];
    let t_stride = pos.time.map(|p| strides[p]).unwrap_or(0);

    let mut out = Vec::with_capacity(nt * ny * nx);
    for t in 0..nt {
        for j in 0..ny {
            let base = t * t_stride + j * strides[pos.y];
            out.extend((0..nx).map(|i| raw[base + i * strides[pos.x]]));
        }
    }
    out
}

/// Read any numeric variable as f64.
fn read_as_f64(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    if let Ok(values) = var.get_values::<f64, _>(..) {
        return Ok(values);
    }
    if let Ok(values) = var.get_values::<f32, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    if let Ok(values) = var.get_values::<i32, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    if let Ok(values) = var.get_values::<i16, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    if let Ok(values) = var.get_values::<i8, _>(..) {
        return Ok(values.into_iter().map(f64::from).collect());
    }
    var.get_values::<u8, _>(..)
        .map(|values| values.into_iter().map(f64::from).collect())
        .map_err(|e| {
            NetCdfError::InvalidFormat(format!("Failed to read {} as numeric: {}", var.name(), e))
        })
}

/// Apply CF packing attributes: fill values become NaN, then scale and offset.
fn unpack(var: &netcdf::Variable, raw: Vec<f64>) -> Vec<f64> {
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);
    let fill_value = get_f64_attr(var, "_FillValue");
    let missing_value = get_f64_attr(var, "missing_value");

    raw.into_iter()
        .map(|val| {
            if Some(val) == fill_value || Some(val) == missing_value {
                f64::NAN
            } else {
                val * scale_factor + add_offset
            }
        })
        .collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(value) => Some(value),
        _ => None,
    }
}
