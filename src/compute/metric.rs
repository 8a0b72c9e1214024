//! Radius-bound distance tests.

use radius_search_types::{Metric, Point3, Scalar};

/// A metric ball: the inclusion region of a single radius search.
///
/// Holds the precomputed comparison threshold so the per-candidate test is a
/// single distance evaluation and compare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBall<T> {
    metric: Metric,
    radius: T,
    threshold: T,
}

impl<T: Scalar> MetricBall<T> {
    pub fn new(metric: Metric, radius: T) -> Self {
        Self {
            metric,
            radius,
            threshold: metric.threshold(radius),
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    /// Reported distance between `center` and `candidate` if the candidate
    /// lies inside the ball (boundary inclusive).
    #[inline]
    pub fn test(&self, center: &Point3<T>, candidate: &Point3<T>) -> Option<T> {
        let distance = self.metric.distance(center, candidate);
        (distance <= self.threshold).then_some(distance)
    }
}
