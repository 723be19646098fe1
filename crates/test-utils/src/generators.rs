//! Synthetic grids shaped like HIWAT hourly output.
//!
//! All grids are row-major `(time, y, x)` `Vec<f64>` so they can be passed
//! straight to `GridVariable::new`.

/// Longitude extent of the dummy HIWAT grid.
pub const DUMMY_LON: (f64, f64) = (88.0, 93.5);

/// Latitude extent of the dummy HIWAT grid.
pub const DUMMY_LAT: (f64, f64) = (20.5, 26.5);

/// Side length of the dummy HIWAT grid.
pub const DUMMY_SIZE: usize = 20;

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// ```
/// use test_utils::generators::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Longitude and latitude axes of the dummy HIWAT grid.
pub fn dummy_axes() -> (Vec<f64>, Vec<f64>) {
    (
        linspace(DUMMY_LON.0, DUMMY_LON.1, DUMMY_SIZE),
        linspace(DUMMY_LAT.0, DUMMY_LAT.1, DUMMY_SIZE),
    )
}

/// Each step is uniform and equal to `f(t)`.
///
/// Handy for checking reductions across time without spatial noise.
pub fn time_series_grid(
    time_steps: usize,
    height: usize,
    width: usize,
    f: impl Fn(usize) -> f64,
) -> Vec<f64> {
    (0..time_steps)
        .flat_map(|t| std::iter::repeat(f(t)).take(height * width))
        .collect()
}

/// Each cell holds `col * 1000 + row`, repeated for every step.
pub fn indexed_grid(time_steps: usize, height: usize, width: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(time_steps * height * width);
    for _ in 0..time_steps {
        for row in 0..height {
            for col in 0..width {
                data.push((col * 1000 + row) as f64);
            }
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(88.0, 93.5, 20);
        assert_eq!(v.len(), 20);
        assert_eq!(v[0], 88.0);
        assert!((v[19] - 93.5).abs() < 1e-12);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_time_series_grid() {
        let data = time_series_grid(3, 2, 2, |t| t as f64 * 10.0);
        assert_eq!(data.len(), 12);
        assert_eq!(&data[4..8], &[10.0; 4]);
    }

    #[test]
    fn test_indexed_grid() {
        let data = indexed_grid(2, 2, 3);
        assert_eq!(data[1], 1000.0);
        assert_eq!(data[3], 1.0);
        assert_eq!(data[6], 0.0);
    }
}
