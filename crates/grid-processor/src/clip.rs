//! Clipping grid slices to district polygons.
//!
//! A cell belongs to a district when its centre lies inside the polygon. The
//! cells are found once per district and grid, then reused for every time
//! slice and variable. When clipping is impossible the mean is taken over the
//! whole grid instead and the result is marked as a fallback.

use std::fmt;

use geo::{BoundingRect, Contains, MultiPolygon, Point};
use hiwat_common::{BoundingBox, CrsCode};

use crate::reduce::nanmean;

/// CRS of district polygons.
pub const POLYGON_CRS: CrsCode = CrsCode::Epsg4326;

/// Why a clip fell back to the whole-grid mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipFailure {
    /// The polygon has no usable extent.
    DegenerateGeometry,
    /// No cell centre lies inside the polygon.
    NoCellsInside,
    /// The array carries no CRS.
    MissingCrs,
    /// The array's CRS differs from the polygon's.
    CrsMismatch(CrsCode),
}

impl fmt::Display for ClipFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipFailure::DegenerateGeometry => write!(f, "polygon geometry is empty or invalid"),
            ClipFailure::NoCellsInside => write!(f, "no grid cells inside polygon"),
            ClipFailure::MissingCrs => write!(f, "array has no CRS"),
            ClipFailure::CrsMismatch(crs) => {
                write!(f, "array CRS {} does not match polygon CRS {}", crs, POLYGON_CRS)
            }
        }
    }
}

/// Result of one clip-and-mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipMean {
    pub value: f64,
    /// Set when the whole-grid mean was used.
    pub fallback: Option<ClipFailure>,
}

impl ClipMean {
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }
}

/// The grid cells whose centres fall inside a district.
#[derive(Debug, Clone)]
pub struct DistrictMask {
    cells: std::result::Result<Vec<usize>, ClipFailure>,
}

impl DistrictMask {
    /// Rasterize `polygon` onto the grid with cell centres `x` × `y`.
    ///
    /// Indices are row-major (`y`, then `x`).
    pub fn new(x: &[f64], y: &[f64], polygon: &MultiPolygon<f64>) -> Self {
        Self {
            cells: inside_cells(x, y, polygon),
        }
    }

    /// Indices of the cells inside the polygon, or why there are none.
    pub fn cells(&self) -> std::result::Result<&[usize], ClipFailure> {
        self.cells.as_deref().map_err(|e| *e)
    }

    /// Mean of `values` over the district, or over the whole slice on failure.
    pub fn clip_mean(&self, values: &[f64], crs: Option<CrsCode>) -> ClipMean {
        let clipped = check_crs(crs).and_then(|_| self.cells());
        match clipped {
            Ok(cells) => ClipMean {
                value: nanmean(cells.iter().filter_map(|&i| values.get(i))),
                fallback: None,
            },
            Err(failure) => ClipMean {
                value: nanmean(values),
                fallback: Some(failure),
            },
        }
    }
}

/// Clip one slice to `polygon` and average it.
///
/// Convenience for a single call; use [`DistrictMask`] to clip many slices.
pub fn clip_mean(
    values: &[f64],
    x: &[f64],
    y: &[f64],
    crs: Option<CrsCode>,
    polygon: &MultiPolygon<f64>,
) -> ClipMean {
    DistrictMask::new(x, y, polygon).clip_mean(values, crs)
}

fn check_crs(crs: Option<CrsCode>) -> std::result::Result<(), ClipFailure> {
    match crs {
        None => Err(ClipFailure::MissingCrs),
        Some(crs) if crs != POLYGON_CRS => Err(ClipFailure::CrsMismatch(crs)),
        Some(_) => Ok(()),
    }
}

fn inside_cells(
    x: &[f64],
    y: &[f64],
    polygon: &MultiPolygon<f64>,
) -> std::result::Result<Vec<usize>, ClipFailure> {
    let rect = polygon
        .bounding_rect()
        .ok_or(ClipFailure::DegenerateGeometry)?;
    let extent = BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y);
    if ![extent.min_x, extent.min_y, extent.max_x, extent.max_y]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(ClipFailure::DegenerateGeometry);
    }

    let grid = BoundingBox::from_axes(x, y).ok_or(ClipFailure::NoCellsInside)?;
    if !grid.intersects(&extent) {
        return Err(ClipFailure::NoCellsInside);
    }

    let width = x.len();
    let mut cells = Vec::new();
    for (j, &cy) in y.iter().enumerate() {
        for (i, &cx) in x.iter().enumerate() {
            if !extent.contains_point(cx, cy) {
                continue;
            }
            if polygon.contains(&Point::new(cx, cy)) {
                cells.push(j * width + i);
            }
        }
    }

    if cells.is_empty() {
        Err(ClipFailure::NoCellsInside)
    } else {
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};

    fn square(min: f64, max: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: min, y: min),
            (x: max, y: min),
            (x: max, y: max),
            (x: min, y: max),
            (x: min, y: min),
        ]])
    }

    /// 4x4 grid at integer centres 0..3, value = row * 4 + col.
    fn grid() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let axis = vec![0.0, 1.0, 2.0, 3.0];
        let values = (0..16).map(f64::from).collect();
        (axis.clone(), axis, values)
    }

    #[test]
    fn test_centres_inside_polygon() {
        let (x, y, _) = grid();
        let mask = DistrictMask::new(&x, &y, &square(0.5, 2.5));
        // Centres (1,1), (2,1), (1,2), (2,2)
        assert_eq!(mask.cells().unwrap(), &[5, 6, 9, 10]);
    }

    #[test]
    fn test_clip_mean_inside() {
        let (x, y, values) = grid();
        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg4326), &square(0.5, 2.5));
        assert_eq!(result.value, 7.5);
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_clip_mean_skips_nan() {
        let (x, y, mut values) = grid();
        values[5] = f64::NAN;
        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg4326), &square(0.5, 2.5));
        assert_eq!(result.value, (6.0 + 9.0 + 10.0) / 3.0);
    }

    #[test]
    fn test_outside_polygon_falls_back_to_grid_mean() {
        let (x, y, values) = grid();
        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg4326), &square(10.0, 11.0));
        assert_eq!(result.value, 7.5);
        assert_eq!(result.fallback, Some(ClipFailure::NoCellsInside));
    }

    #[test]
    fn test_polygon_between_centres_falls_back() {
        let (x, y, values) = grid();
        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg4326), &square(1.2, 1.8));
        assert_eq!(result.fallback, Some(ClipFailure::NoCellsInside));
    }

    #[test]
    fn test_empty_grid_falls_back() {
        let result = clip_mean(&[], &[], &[], Some(CrsCode::Epsg4326), &square(0.5, 2.5));
        assert_eq!(result.fallback, Some(ClipFailure::NoCellsInside));
    }

    #[test]
    fn test_empty_geometry_falls_back() {
        let (x, y, values) = grid();
        let empty = MultiPolygon::<f64>(vec![]);
        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg4326), &empty);
        assert_eq!(result.fallback, Some(ClipFailure::DegenerateGeometry));
        assert_eq!(result.value, 7.5);
    }

    #[test]
    fn test_crs_mismatch_falls_back() {
        let (x, y, values) = grid();
        let polygon = square(0.5, 2.5);

        let result = clip_mean(&values, &x, &y, Some(CrsCode::Epsg3857), &polygon);
        assert_eq!(result.fallback, Some(ClipFailure::CrsMismatch(CrsCode::Epsg3857)));

        let result = clip_mean(&values, &x, &y, None, &polygon);
        assert_eq!(result.fallback, Some(ClipFailure::MissingCrs));
        assert_eq!(result.value, 7.5);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            ClipFailure::CrsMismatch(CrsCode::Epsg3857).to_string(),
            "array CRS EPSG:3857 does not match polygon CRS EPSG:4326"
        );
    }
}
