use crate::point::Point3;
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance metrics supported by the fixed radius search.
///
/// The value reported by [`Metric::distance`] is the true distance for
/// [`Metric::L1`] and [`Metric::Linf`], but the **squared** Euclidean distance
/// for [`Metric::L2`]. Radius comparisons are adjusted accordingly, see
/// [`Metric::threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Manhattan distance: sum of absolute per-axis differences.
    L1,
    /// Euclidean distance, reported squared.
    #[default]
    L2,
    /// Chebyshev distance: largest absolute per-axis difference.
    Linf,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::L1, Metric::L2, Metric::Linf];

    /// Distance between `a` and `b` as reported in search results.
    ///
    /// ```
    /// use radius_search_types::{Metric, Point3};
    ///
    /// let a = Point3::new(0.0_f64, 0.0, 0.0);
    /// let b = Point3::new(3.0, 4.0, 12.0);
    /// assert_eq!(Metric::L2.distance(&a, &b), 169.0);
    /// assert_eq!(Metric::L1.distance(&a, &b), 19.0);
    /// assert_eq!(Metric::Linf.distance(&a, &b), 12.0);
    /// ```
    #[inline]
    pub fn distance<T: Scalar>(self, a: &Point3<T>, b: &Point3<T>) -> T {
        match self {
            Metric::L1 => {
                let [dx, dy, dz] = a.abs_diff(b);
                dx + dy + dz
            }
            Metric::L2 => {
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dz = a.z - b.z;
                dx * dx + dy * dy + dz * dz
            }
            Metric::Linf => {
                let [dx, dy, dz] = a.abs_diff(b);
                dx.max(dy).max(dz)
            }
        }
    }

    /// Value a reported distance is compared against for a given radius.
    ///
    /// `radius * radius` for L2, `radius` otherwise.
    #[inline]
    pub fn threshold<T: Scalar>(self, radius: T) -> T {
        match self {
            Metric::L2 => radius * radius,
            Metric::L1 | Metric::Linf => radius,
        }
    }

    /// Inclusion test: true if `b` lies within `radius` of `a` (boundary inclusive).
    #[inline]
    pub fn within<T: Scalar>(self, a: &Point3<T>, b: &Point3<T>, radius: T) -> bool {
        self.distance(a, b) <= self.threshold(radius)
    }

    /// Whether reported distances are squared.
    pub const fn reports_squared(self) -> bool {
        matches!(self, Metric::L2)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Metric::L1 => "L1",
            Metric::L2 => "L2",
            Metric::Linf => "Linf",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError(pub String);

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric '{}', expected one of L1, L2, Linf",
            self.0
        )
    }
}

impl std::error::Error for ParseMetricError {}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}
