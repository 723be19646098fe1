//! Shared test utilities for the HIWAT calendar workspace.
//!
//! - [`generators`]: grids on the dummy HIWAT layout
//! - [`fixtures`]: district GeoJSON placed on that grid
//! - [`temp_test_dir`] and [`assert_approx_eq!`]

pub mod fixtures;
pub mod generators;

/// A scratch directory removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Assert two numbers differ by at most `epsilon`.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(summary.total_rain_mm, 138.0, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "values differ: {:?} vs {:?} (diff {:?}, epsilon {:?})",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_within_epsilon() {
        assert_approx_eq!(298.15 - 273.15, 25.0, 1e-9);
        assert_approx_eq!(0.0, 0.0, 0.0);
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn test_approx_eq_outside_epsilon() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn test_approx_eq_rejects_nan() {
        assert_approx_eq!(f64::NAN, 1.0, 1.0);
    }

    #[test]
    fn test_temp_test_dir_exists() {
        let dir = temp_test_dir();
        assert!(dir.path().is_dir());
    }
}
