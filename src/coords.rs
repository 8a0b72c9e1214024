//! Runtime-typed coordinate buffers.
//!
//! Callers holding flat `x, y, z, x, y, z, ...` buffers whose precision is
//! only known at runtime wrap them in [`Coordinates`]; results come back as
//! the matching [`DynResultSet`] variant.

use crate::compute::validation::validate_flat_len;
use crate::error::Result;
use crate::result::ResultSet;
use radius_search_types::{Dtype, Point3, Scalar};

/// A flat buffer of 3-D coordinates of either precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coordinates<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl<'a> Coordinates<'a> {
    pub fn dtype(&self) -> Dtype {
        match self {
            Coordinates::F32(_) => Dtype::Float32,
            Coordinates::F64(_) => Dtype::Float64,
        }
    }

    /// Number of scalars in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Coordinates::F32(values) => values.len(),
            Coordinates::F64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of whole points, or `None` if the length is not a multiple of 3.
    pub fn num_points(&self) -> Option<usize> {
        let len = self.len();
        (len % 3 == 0).then_some(len / 3)
    }
}

impl<'a> From<&'a [f32]> for Coordinates<'a> {
    fn from(values: &'a [f32]) -> Self {
        Coordinates::F32(values)
    }
}

impl<'a> From<&'a [f64]> for Coordinates<'a> {
    fn from(values: &'a [f64]) -> Self {
        Coordinates::F64(values)
    }
}

/// Search result whose precision matches the [`Coordinates`] it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DynResultSet {
    F32(ResultSet<f32>),
    F64(ResultSet<f64>),
}

impl DynResultSet {
    pub fn dtype(&self) -> Dtype {
        match self {
            DynResultSet::F32(_) => Dtype::Float32,
            DynResultSet::F64(_) => Dtype::Float64,
        }
    }

    pub fn neighbors_index(&self) -> &[usize] {
        match self {
            DynResultSet::F32(result) => result.neighbors_index(),
            DynResultSet::F64(result) => result.neighbors_index(),
        }
    }

    pub fn neighbors_prefix_sum(&self) -> &[usize] {
        match self {
            DynResultSet::F32(result) => result.neighbors_prefix_sum(),
            DynResultSet::F64(result) => result.neighbors_prefix_sum(),
        }
    }

    pub fn num_queries(&self) -> usize {
        self.neighbors_prefix_sum().len()
    }

    pub fn as_f32(&self) -> Option<&ResultSet<f32>> {
        match self {
            DynResultSet::F32(result) => Some(result),
            DynResultSet::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ResultSet<f64>> {
        match self {
            DynResultSet::F64(result) => Some(result),
            DynResultSet::F32(_) => None,
        }
    }
}

/// Copy a flat `x, y, z, ...` buffer into points.
///
/// `what` names the buffer in the error message.
///
/// # Errors
///
/// `InvalidArgument` if the length is not a multiple of 3, and
/// `ResourceExhausted` if the point buffer cannot be allocated.
pub fn points_from_flat<T: Scalar>(flat: &[T], what: &str) -> Result<Vec<Point3<T>>> {
    validate_flat_len(flat.len(), what)?;
    let mut points = Vec::new();
    points.try_reserve_exact(flat.len() / 3)?;
    points.extend(
        flat.chunks_exact(3)
            .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2])),
    );
    Ok(points)
}
