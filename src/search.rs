//! Fixed radius search entry points.
//!
//! A call validates its inputs, builds a [`HashGrid`] over the points, runs
//! the [`NeighborEnumerator`] for every query against the finished grid and
//! packs the per-query lists into a [`ResultSet`]. The grid lives only for
//! the duration of the call.

use crate::builder::RadiusSearchBuilder;
use crate::compute::grid::{HashGrid, table_size_for};
use crate::compute::neighbors::NeighborEnumerator;
use crate::compute::validation::{
    validate_dtypes, validate_point_count, validate_points, validate_radius,
};
use crate::config::SearchConfig;
use crate::coords::{Coordinates, DynResultSet, points_from_flat};
use crate::error::{Result, SearchError};
use crate::result::ResultSet;
use radius_search_types::{Metric, Point3, Scalar};

/// A validated search configuration, reusable across calls.
///
/// # Examples
///
/// ```
/// use radius_search::{Metric, Point3, RadiusSearch};
///
/// let search = RadiusSearch::builder()
///     .metric(Metric::Linf)
///     .return_distances(true)
///     .build()?;
///
/// let points = vec![Point3::new(0.0_f32, 0.0, 0.0), Point3::new(0.25, 0.25, 0.25)];
/// let result = search.search(&points, &points, 0.25)?;
///
/// assert_eq!(result.neighbors(0).len(), 2);
/// assert_eq!(result.neighbors_prefix_sum(), &[0, 2]);
/// # Ok::<(), radius_search::SearchError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RadiusSearch {
    config: SearchConfig,
}

impl RadiusSearch {
    /// Create a search from a configuration.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the hash table sizing knobs are invalid.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> RadiusSearchBuilder {
        RadiusSearchBuilder::new()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// Find, for every query, all points within `radius`.
    ///
    /// Query `i`'s neighbors occupy `neighbors_index[prefix_sum[i]..prefix_sum[i + 1]]`
    /// (or up to the end for the last query).
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a non-positive or non-finite radius, non-finite
    ///   coordinates, or more points than a `u32` can index.
    /// - `ResourceExhausted` if the hash table or the output cannot be allocated.
    pub fn search<T: Scalar>(
        &self,
        points: &[Point3<T>],
        queries: &[Point3<T>],
        radius: T,
    ) -> Result<ResultSet<T>> {
        validate_radius(radius)?;
        validate_point_count(points.len())?;
        validate_points(points, "points")?;
        validate_points(queries, "queries")?;

        let config = &self.config;
        if queries.is_empty() {
            log::debug!("Radius search with no queries, skipping grid construction");
            return Ok(ResultSet::empty(0, config.return_distances));
        }

        let table_size = table_size_for(
            points.len(),
            config.hash_table_size_factor,
            config.max_hash_table_size,
        );
        let grid = HashGrid::build(points, radius, table_size)?;

        let enumerator = NeighborEnumerator::new(&grid, config.metric)
            .ignore_query_point(config.ignore_query_point)
            .return_distances(config.return_distances)
            .sort_neighbors(config.sort_neighbors);
        let neighborhoods = enumerator.enumerate_all(queries);
        let result = ResultSet::pack(neighborhoods, config.return_distances)?;

        log::debug!(
            "Radius search ({}, {}, radius {}): {} points, {} queries, {} neighbors",
            config.metric,
            T::DTYPE,
            radius,
            points.len(),
            queries.len(),
            result.num_neighbors()
        );

        Ok(result)
    }

    /// Search over flat `x, y, z, ...` coordinate buffers.
    ///
    /// # Errors
    ///
    /// As [`RadiusSearch::search`], plus `InvalidArgument` if a buffer length
    /// is not a multiple of 3.
    pub fn search_flat<T: Scalar>(
        &self,
        points: &[T],
        queries: &[T],
        radius: T,
    ) -> Result<ResultSet<T>> {
        let points = points_from_flat(points, "points")?;
        let queries = points_from_flat(queries, "queries")?;
        self.search(&points, &queries, radius)
    }

    /// Search over buffers whose precision is only known at runtime.
    ///
    /// `radius` is converted to the buffers' precision.
    ///
    /// # Errors
    ///
    /// As [`RadiusSearch::search_flat`], plus `InvalidArgument` if points and
    /// queries differ in precision.
    pub fn search_dyn(
        &self,
        points: Coordinates<'_>,
        queries: Coordinates<'_>,
        radius: f64,
    ) -> Result<DynResultSet> {
        validate_dtypes(points.dtype(), queries.dtype())?;
        match (points, queries) {
            (Coordinates::F32(points), Coordinates::F32(queries)) => self
                .search_flat(points, queries, <f32 as Scalar>::from_f64(radius))
                .map(DynResultSet::F32),
            (Coordinates::F64(points), Coordinates::F64(queries)) => self
                .search_flat(points, queries, radius)
                .map(DynResultSet::F64),
            _ => Err(SearchError::InvalidArgument(
                "points and queries must have the same dtype".to_string(),
            )),
        }
    }
}

/// One-shot fixed radius search.
///
/// Equivalent to building a [`RadiusSearch`] with the given metric, flags and
/// hash table size factor and calling [`RadiusSearch::search`].
///
/// # Examples
///
/// ```
/// use radius_search::{fixed_radius_search, Metric, Point3};
///
/// let points = vec![
///     Point3::new(0.0_f64, 0.0, 0.0),
///     Point3::new(0.5, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// ];
///
/// let result = fixed_radius_search(&points, &points, 0.5, 1.0 / 8.0, Metric::L2, true, true)?;
/// assert_eq!(result.neighbors(0), &[1]);
/// assert_eq!(result.distances(0), Some(&[0.25][..]));
/// assert!(result.neighbors(2).is_empty());
/// # Ok::<(), radius_search::SearchError>(())
/// ```
pub fn fixed_radius_search<T: Scalar>(
    points: &[Point3<T>],
    queries: &[Point3<T>],
    radius: T,
    hash_table_size_factor: f64,
    metric: Metric,
    ignore_query_point: bool,
    return_distances: bool,
) -> Result<ResultSet<T>> {
    RadiusSearch::builder()
        .metric(metric)
        .ignore_query_point(ignore_query_point)
        .return_distances(return_distances)
        .hash_table_size_factor(hash_table_size_factor)
        .build()?
        .search(points, queries, radius)
}
