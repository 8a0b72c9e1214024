//! Argument validation for radius searches.
//!
//! Every check runs before any grid construction, so a rejected call never
//! produces partial results.

use crate::error::{Result, SearchError};
use radius_search_types::{Dtype, Point3, Scalar};

/// Largest number of input points a single search can index.
pub const MAX_POINTS: usize = u32::MAX as usize;

/// Validates a search radius: finite and strictly positive.
///
/// # Examples
///
/// ```
/// use radius_search::compute::validation::validate_radius;
///
/// assert!(validate_radius(0.5_f32).is_ok());
/// assert!(validate_radius(0.0_f64).is_err());
/// assert!(validate_radius(f64::NAN).is_err());
/// ```
pub fn validate_radius<T: Scalar>(radius: T) -> Result<()> {
    if !radius.is_finite() {
        return Err(SearchError::InvalidArgument(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }
    if radius <= T::zero() {
        return Err(SearchError::InvalidArgument(format!(
            "Radius must be positive, got: {}",
            radius
        )));
    }
    Ok(())
}

/// Validates the hash table size factor: finite and strictly positive.
pub fn validate_hash_table_size_factor(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(SearchError::InvalidArgument(format!(
            "Hash table size factor must be a positive finite number, got: {}",
            factor
        )));
    }
    Ok(())
}

pub fn validate_max_hash_table_size(max_size: usize) -> Result<()> {
    if max_size == 0 {
        return Err(SearchError::InvalidArgument(
            "Max hash table size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Validates that every coordinate in `points` is finite.
///
/// `what` names the set in the error message ("points" or "queries").
pub fn validate_points<T: Scalar>(points: &[Point3<T>], what: &str) -> Result<()> {
    if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
        log::warn!("Rejecting {} with non-finite coordinates", what);
        return Err(SearchError::InvalidArgument(format!(
            "{} at index {} has non-finite coordinates: {:?}",
            what, idx, points[idx]
        )));
    }
    Ok(())
}

/// Validates that the number of input points fits the index arena.
pub fn validate_point_count(num_points: usize) -> Result<()> {
    if num_points > MAX_POINTS {
        return Err(SearchError::InvalidArgument(format!(
            "Too many points: {} (maximum {})",
            num_points, MAX_POINTS
        )));
    }
    Ok(())
}

/// Validates that a flat coordinate buffer holds whole 3-D points.
pub fn validate_flat_len(len: usize, what: &str) -> Result<()> {
    if len % 3 != 0 {
        return Err(SearchError::InvalidArgument(format!(
            "{} must have exactly 3 coordinates per point, got a buffer of length {}",
            what, len
        )));
    }
    Ok(())
}

/// Validates that points and queries share a precision.
pub fn validate_dtypes(points: Dtype, queries: Dtype) -> Result<()> {
    if points != queries {
        return Err(SearchError::InvalidArgument(format!(
            "points and queries must have the same dtype, got {} and {}",
            points, queries
        )));
    }
    Ok(())
}
