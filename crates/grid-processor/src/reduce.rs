//! NaN-skipping reductions across the time axis and over cells.

use netcdf_parser::GridVariable;

/// How to collapse a window of time steps into one 2-D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeReduction {
    /// Sum of finite values; all-NaN cells become 0.
    Sum,
    /// Maximum of finite values; all-NaN cells stay NaN.
    Max,
    /// Mean of finite values; all-NaN cells stay NaN.
    Mean,
}

/// Reduce the first `steps` time steps of `var`, cell by cell.
///
/// `steps` is clamped to the variable's length.
pub fn reduce_window(var: &GridVariable, steps: usize, reduction: TimeReduction) -> Vec<f64> {
    let steps = steps.min(var.time_steps());
    let (_, height, width) = var.shape();
    let cells = height * width;

    let mut acc = vec![Accumulator::default(); cells];
    for t in 0..steps {
        for (cell, value) in acc.iter_mut().zip(var.slice(t)) {
            cell.push(*value);
        }
    }

    acc.into_iter().map(|cell| cell.finish(reduction)).collect()
}

/// Mean of the finite values, NaN if there are none.
pub fn nanmean<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    let mut acc = Accumulator::default();
    for value in values {
        acc.push(*value);
    }
    acc.finish(TimeReduction::Mean)
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    sum: f64,
    max: f64,
    count: usize,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            sum: 0.0,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.sum += value;
        self.max = self.max.max(value);
        self.count += 1;
    }

    fn finish(self, reduction: TimeReduction) -> f64 {
        match reduction {
            TimeReduction::Sum => self.sum,
            _ if self.count == 0 => f64::NAN,
            TimeReduction::Max => self.max,
            TimeReduction::Mean => self.sum / self.count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(values: Vec<f64>, steps: usize) -> GridVariable {
        GridVariable::new("v", steps, 1, 2, values).unwrap()
    }

    #[test]
    fn test_reduce_window() {
        // Two cells over three steps: cell 0 = 1,2,3 and cell 1 = 10,0,5
        let v = var(vec![1.0, 10.0, 2.0, 0.0, 3.0, 5.0], 3);
        assert_eq!(reduce_window(&v, 3, TimeReduction::Sum), vec![6.0, 15.0]);
        assert_eq!(reduce_window(&v, 3, TimeReduction::Max), vec![3.0, 10.0]);
        assert_eq!(reduce_window(&v, 3, TimeReduction::Mean), vec![2.0, 5.0]);
    }

    #[test]
    fn test_window_is_truncated() {
        let v = var(vec![1.0, 10.0, 2.0, 0.0, 3.0, 5.0], 3);
        assert_eq!(reduce_window(&v, 2, TimeReduction::Sum), vec![3.0, 10.0]);
        assert_eq!(reduce_window(&v, 24, TimeReduction::Sum), vec![6.0, 15.0]);
    }

    #[test]
    fn test_nan_handling() {
        let v = var(vec![f64::NAN, 1.0, f64::NAN, f64::NAN], 2);

        let sum = reduce_window(&v, 2, TimeReduction::Sum);
        assert_eq!(sum, vec![0.0, 1.0]);

        let max = reduce_window(&v, 2, TimeReduction::Max);
        assert!(max[0].is_nan());
        assert_eq!(max[1], 1.0);

        let mean = reduce_window(&v, 2, TimeReduction::Mean);
        assert!(mean[0].is_nan());
        assert_eq!(mean[1], 1.0);
    }

    #[test]
    fn test_nanmean() {
        assert_eq!(nanmean(&[1.0, f64::NAN, 3.0]), 2.0);
        assert!(nanmean(&[f64::NAN]).is_nan());
        assert!(nanmean(&[]).is_nan());
    }
}
