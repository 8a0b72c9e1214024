use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};

/// A point in 3-D Cartesian space.
///
/// # Examples
///
/// ```
/// use radius_search_types::point::Point3;
///
/// let p = Point3::new(1.0_f32, 2.0, 3.0);
/// assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
/// assert_eq!(Point3::from([1.0_f32, 2.0, 3.0]), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(coords: [T; 3]) -> Self {
        Self::new(coords[0], coords[1], coords[2])
    }

    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    /// Coordinate along `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    #[inline]
    pub fn axis(&self, axis: usize) -> T {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis index out of range: {axis}"),
        }
    }

    /// True if every coordinate is finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Per-axis absolute differences to `other`.
    #[inline]
    pub fn abs_diff(&self, other: &Point3<T>) -> [T; 3] {
        [
            (self.x - other.x).abs(),
            (self.y - other.y).abs(),
            (self.z - other.z).abs(),
        ]
    }
}

impl<T: Scalar> From<[T; 3]> for Point3<T> {
    fn from(coords: [T; 3]) -> Self {
        Self::from_array(coords)
    }
}

impl<T: Scalar> From<Point3<T>> for [T; 3] {
    fn from(point: Point3<T>) -> Self {
        point.to_array()
    }
}
