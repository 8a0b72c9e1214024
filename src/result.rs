//! Packed search results.
//!
//! A [`ResultSet`] stores the neighbors of all queries in CSR form: one flat
//! `neighbors_index` array and a `neighbors_prefix_sum` array holding the
//! start offset of each query's slice.

use crate::compute::neighbors::Neighborhood;
use crate::error::{Result, SearchError};
use radius_search_types::Scalar;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Neighbors of every query of one search call.
///
/// # Examples
///
/// ```
/// use radius_search::{fixed_radius_search, Metric, Point3};
///
/// let points = vec![Point3::new(0.0_f64, 0.0, 0.0), Point3::new(0.1, 0.0, 0.0)];
/// let queries = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0)];
///
/// let result = fixed_radius_search(&points, &queries, 0.2, 1.0 / 32.0, Metric::L2, false, true)?;
/// assert_eq!(result.neighbors_prefix_sum(), &[0, 2]);
/// assert_eq!(result.neighbors(1), &[] as &[usize]);
/// # Ok::<(), radius_search::SearchError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultSetParts<T>")]
pub struct ResultSet<T> {
    neighbors_index: Vec<usize>,
    neighbors_prefix_sum: Vec<usize>,
    neighbors_distance: Option<Vec<T>>,
}

/// Unchecked wire form of a [`ResultSet`].
#[derive(Deserialize)]
struct ResultSetParts<T> {
    neighbors_index: Vec<usize>,
    neighbors_prefix_sum: Vec<usize>,
    neighbors_distance: Option<Vec<T>>,
}

impl<T> TryFrom<ResultSetParts<T>> for ResultSet<T> {
    type Error = SearchError;

    fn try_from(parts: ResultSetParts<T>) -> Result<Self> {
        ResultSet::from_parts(
            parts.neighbors_index,
            parts.neighbors_prefix_sum,
            parts.neighbors_distance,
        )
    }
}

impl<T> ResultSet<T> {
    /// Reassemble a result set from its flat arrays, checking the layout.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the prefix sum does not start at 0, decreases or
    /// runs past `neighbors_index`, if there are neighbors but no queries, or
    /// if `neighbors_distance` differs in length from `neighbors_index`.
    pub fn from_parts(
        neighbors_index: Vec<usize>,
        neighbors_prefix_sum: Vec<usize>,
        neighbors_distance: Option<Vec<T>>,
    ) -> Result<Self> {
        match neighbors_prefix_sum.first() {
            Some(&first) if first != 0 => {
                return Err(SearchError::InvalidArgument(format!(
                    "neighbors_prefix_sum must start at 0, got: {}",
                    first
                )));
            }
            None if !neighbors_index.is_empty() => {
                return Err(SearchError::InvalidArgument(format!(
                    "{} neighbors given for zero queries",
                    neighbors_index.len()
                )));
            }
            _ => {}
        }
        if let Some(idx) = neighbors_prefix_sum.windows(2).position(|w| w[1] < w[0]) {
            return Err(SearchError::InvalidArgument(format!(
                "neighbors_prefix_sum decreases at index {}",
                idx + 1
            )));
        }
        if let Some(&last) = neighbors_prefix_sum.last() {
            if last > neighbors_index.len() {
                return Err(SearchError::InvalidArgument(format!(
                    "neighbors_prefix_sum ends at {}, past {} neighbors",
                    last,
                    neighbors_index.len()
                )));
            }
        }
        if let Some(distances) = &neighbors_distance {
            if distances.len() != neighbors_index.len() {
                return Err(SearchError::InvalidArgument(format!(
                    "{} distances given for {} neighbors",
                    distances.len(),
                    neighbors_index.len()
                )));
            }
        }
        Ok(Self {
            neighbors_index,
            neighbors_prefix_sum,
            neighbors_distance,
        })
    }
}

impl<T: Scalar> ResultSet<T> {
    /// Result for `num_queries` queries that have no neighbors at all.
    pub fn empty(num_queries: usize, return_distances: bool) -> Self {
        Self {
            neighbors_index: Vec::new(),
            neighbors_prefix_sum: vec![0; num_queries],
            neighbors_distance: return_distances.then(Vec::new),
        }
    }

    /// Pack per-query neighborhoods, given in query order.
    ///
    /// # Errors
    ///
    /// `ResourceExhausted` if the flat output arrays cannot be allocated.
    pub fn pack(neighborhoods: Vec<Neighborhood<T>>, return_distances: bool) -> Result<Self> {
        let total: usize = neighborhoods.iter().map(Neighborhood::len).sum();
        let mut packer = ResultPacker::with_capacity(neighborhoods.len(), total, return_distances)?;
        for neighborhood in neighborhoods {
            packer.push(neighborhood)?;
        }
        Ok(packer.finish())
    }

    /// Flat neighbor indices of all queries.
    pub fn neighbors_index(&self) -> &[usize] {
        &self.neighbors_index
    }

    /// Start offset of each query's slice in [`Self::neighbors_index`].
    pub fn neighbors_prefix_sum(&self) -> &[usize] {
        &self.neighbors_prefix_sum
    }

    /// Flat neighbor distances, if they were requested.
    ///
    /// Squared for L2, true distances for L1 and L∞.
    pub fn neighbors_distance(&self) -> Option<&[T]> {
        self.neighbors_distance.as_deref()
    }

    pub fn num_queries(&self) -> usize {
        self.neighbors_prefix_sum.len()
    }

    /// Total number of neighbors over all queries.
    pub fn num_neighbors(&self) -> usize {
        self.neighbors_index.len()
    }

    pub fn has_distances(&self) -> bool {
        self.neighbors_distance.is_some()
    }

    /// Range of query `query`'s neighbors in the flat arrays.
    ///
    /// # Panics
    ///
    /// Panics if `query >= self.num_queries()`.
    pub fn neighbor_range(&self, query: usize) -> Range<usize> {
        let start = self.neighbors_prefix_sum[query];
        let end = self
            .neighbors_prefix_sum
            .get(query + 1)
            .copied()
            .unwrap_or(self.neighbors_index.len());
        start..end
    }

    /// Neighbor indices of query `query`.
    pub fn neighbors(&self, query: usize) -> &[usize] {
        &self.neighbors_index[self.neighbor_range(query)]
    }

    /// Neighbor distances of query `query`, if distances were requested.
    pub fn distances(&self, query: usize) -> Option<&[T]> {
        let range = self.neighbor_range(query);
        self.neighbors_distance.as_deref().map(|d| &d[range])
    }

    /// Offsets in the `num_queries + 1` row-splits form: the prefix sum
    /// followed by the total neighbor count.
    pub fn row_splits(&self) -> Vec<usize> {
        let mut splits = Vec::with_capacity(self.neighbors_prefix_sum.len() + 1);
        splits.extend_from_slice(&self.neighbors_prefix_sum);
        splits.push(self.neighbors_index.len());
        splits
    }

    /// Iterate `(query, neighbor indices, neighbor distances)` in query order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize], Option<&[T]>)> + '_ {
        (0..self.num_queries()).map(move |q| (q, self.neighbors(q), self.distances(q)))
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>, Option<Vec<T>>) {
        (
            self.neighbors_index,
            self.neighbors_prefix_sum,
            self.neighbors_distance,
        )
    }
}

/// Appends neighborhoods in query order into a [`ResultSet`].
#[derive(Debug)]
pub struct ResultPacker<T> {
    neighbors_index: Vec<usize>,
    neighbors_prefix_sum: Vec<usize>,
    neighbors_distance: Option<Vec<T>>,
}

impl<T: Scalar> ResultPacker<T> {
    /// Reserve room for `num_queries` queries and `num_neighbors` neighbors.
    pub fn with_capacity(
        num_queries: usize,
        num_neighbors: usize,
        return_distances: bool,
    ) -> Result<Self> {
        let mut neighbors_prefix_sum = Vec::new();
        neighbors_prefix_sum.try_reserve_exact(num_queries)?;
        let mut neighbors_index = Vec::new();
        neighbors_index.try_reserve_exact(num_neighbors)?;
        let neighbors_distance = if return_distances {
            let mut distances = Vec::new();
            distances.try_reserve_exact(num_neighbors)?;
            Some(distances)
        } else {
            None
        };
        Ok(Self {
            neighbors_index,
            neighbors_prefix_sum,
            neighbors_distance,
        })
    }

    /// Append the neighbors of the next query.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the packer collects distances and the
    ///   neighborhood's distances do not match its indices one to one.
    /// - `ResourceExhausted` if the flat arrays cannot grow.
    pub fn push(&mut self, neighborhood: Neighborhood<T>) -> Result<()> {
        if self.neighbors_distance.is_some()
            && neighborhood.distances.len() != neighborhood.indices.len()
        {
            return Err(SearchError::InvalidArgument(format!(
                "neighborhood has {} distances for {} indices",
                neighborhood.distances.len(),
                neighborhood.indices.len()
            )));
        }

        self.neighbors_prefix_sum.try_reserve(1)?;
        self.neighbors_prefix_sum.push(self.neighbors_index.len());

        self.neighbors_index.try_reserve(neighborhood.indices.len())?;
        if let Some(distances) = self.neighbors_distance.as_mut() {
            distances.try_reserve(neighborhood.distances.len())?;
            distances.extend_from_slice(&neighborhood.distances);
        }
        self.neighbors_index.extend_from_slice(&neighborhood.indices);
        Ok(())
    }

    pub fn finish(self) -> ResultSet<T> {
        ResultSet {
            neighbors_index: self.neighbors_index,
            neighbors_prefix_sum: self.neighbors_prefix_sum,
            neighbors_distance: self.neighbors_distance,
        }
    }
}
