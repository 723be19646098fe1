//! Bounding box types and operations.

/// A geographic bounding box in degrees (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box covering the given axis values.
    ///
    /// Returns `None` when either axis is empty or contains only non-finite values.
    pub fn from_axes(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let (min_x, max_x) = finite_range(xs)?;
        let (min_y, max_y) = finite_range(ys)?;
        Some(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Check if this bbox overlaps another (touching edges count).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axes() {
        let bbox = BoundingBox::from_axes(&[93.5, 88.0, 90.0], &[20.5, 26.5]).unwrap();
        assert_eq!(bbox.min_x, 88.0);
        assert_eq!(bbox.max_x, 93.5);
        assert_eq!(bbox.min_y, 20.5);
        assert_eq!(bbox.max_y, 26.5);
    }

    #[test]
    fn test_from_axes_empty() {
        assert!(BoundingBox::from_axes(&[], &[1.0]).is_none());
        assert!(BoundingBox::from_axes(&[f64::NAN], &[1.0]).is_none());
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains_point(10.0, 0.0));
        assert!(!a.contains_point(10.1, 0.0));
    }
}
