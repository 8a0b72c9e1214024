use crate::dtype::Dtype;
use num_traits::Float;
use std::fmt::{Debug, Display};

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating point precision usable for coordinates and distances.
///
/// Implemented for `f32` and `f64` only.
pub trait Scalar:
    Float + Default + Debug + Display + Send + Sync + 'static + private::Sealed
{
    /// Runtime tag for this precision.
    const DTYPE: Dtype;

    /// Lossy conversion from `f64` (rounds to nearest for `f32`).
    fn from_f64(value: f64) -> Self;

    /// Widening conversion to `f64`.
    fn as_f64(self) -> f64;
}

impl Scalar for f32 {
    const DTYPE: Dtype = Dtype::Float32;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Scalar for f64 {
    const DTYPE: Dtype = Dtype::Float64;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}
