//! Per-query neighbor enumeration against a built hash grid.

use crate::compute::grid::HashGrid;
use crate::compute::metric::MetricBall;
use radius_search_types::{Metric, Point3, Scalar};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Accepted neighbors of a single query.
///
/// `distances` is parallel to `indices` when distances were requested and
/// empty otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neighborhood<T> {
    pub indices: Vec<usize>,
    pub distances: Vec<T>,
}

impl<T: Scalar> Neighborhood<T> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Reorder neighbors by increasing point index, keeping distances aligned.
    pub fn sort_by_index(&mut self) {
        if self.distances.is_empty() {
            self.indices.sort_unstable();
            return;
        }
        let mut pairs: Vec<(usize, T)> = self
            .indices
            .iter()
            .copied()
            .zip(self.distances.iter().copied())
            .collect();
        pairs.sort_unstable_by_key(|&(idx, _)| idx);
        let (indices, distances): (Vec<usize>, Vec<T>) = pairs.into_iter().unzip();
        self.indices = indices;
        self.distances = distances;
    }
}

/// Finds the points of a [`HashGrid`] within one cell size of each query.
///
/// The search radius is the grid's cell size, so the candidate slots of
/// [`HashGrid::candidate_slots`] hold every true neighbor.
#[derive(Debug, Clone, Copy)]
pub struct NeighborEnumerator<'g, 'a, T> {
    grid: &'g HashGrid<'a, T>,
    ball: MetricBall<T>,
    ignore_query_point: bool,
    return_distances: bool,
    sort_neighbors: bool,
}

impl<'g, 'a, T: Scalar> NeighborEnumerator<'g, 'a, T> {
    pub fn new(grid: &'g HashGrid<'a, T>, metric: Metric) -> Self {
        Self {
            grid,
            ball: MetricBall::new(metric, grid.cell_size()),
            ignore_query_point: false,
            return_distances: false,
            sort_neighbors: false,
        }
    }

    /// Exclude the point whose index equals the query index.
    ///
    /// Only meaningful when queries and points share an index space.
    /// Coincident points with different indices are still reported.
    pub fn ignore_query_point(mut self, ignore: bool) -> Self {
        self.ignore_query_point = ignore;
        self
    }

    pub fn return_distances(mut self, enabled: bool) -> Self {
        self.return_distances = enabled;
        self
    }

    /// Emit each query's neighbors in increasing index order.
    pub fn sort_neighbors(mut self, enabled: bool) -> Self {
        self.sort_neighbors = enabled;
        self
    }

    pub fn ball(&self) -> &MetricBall<T> {
        &self.ball
    }

    /// Calls `visit(point_index, distance)` for every neighbor of `query`.
    ///
    /// Neighbors are visited slot by slot, in increasing index order within
    /// a slot.
    #[inline]
    pub fn for_each_neighbor<F>(&self, query: &Point3<T>, query_index: usize, mut visit: F)
    where
        F: FnMut(usize, T),
    {
        let points = self.grid.points();
        for slot in self.grid.candidate_slots(query) {
            for &idx in self.grid.slot(slot as usize) {
                let idx = idx as usize;
                if self.ignore_query_point && idx == query_index {
                    continue;
                }
                if let Some(distance) = self.ball.test(query, &points[idx]) {
                    visit(idx, distance);
                }
            }
        }
    }

    /// Number of neighbors of `query`.
    pub fn count(&self, query: &Point3<T>, query_index: usize) -> usize {
        let mut count = 0;
        self.for_each_neighbor(query, query_index, |_, _| count += 1);
        count
    }

    /// Neighbors of the query at `query_index`.
    pub fn enumerate(&self, query: &Point3<T>, query_index: usize) -> Neighborhood<T> {
        let mut neighborhood = Neighborhood::default();
        let return_distances = self.return_distances;
        self.for_each_neighbor(query, query_index, |idx, distance| {
            neighborhood.indices.push(idx);
            if return_distances {
                neighborhood.distances.push(distance);
            }
        });
        if self.sort_neighbors {
            neighborhood.sort_by_index();
        }
        neighborhood
    }

    /// Neighbors of every query, in query order.
    ///
    /// Queries are independent; with the `parallel` feature they are spread
    /// across the rayon pool, each writing its own buffer.
    pub fn enumerate_all(&self, queries: &[Point3<T>]) -> Vec<Neighborhood<T>> {
        maybe_par_iter!(queries)
            .enumerate()
            .map(|(query_index, query)| self.enumerate(query, query_index))
            .collect()
    }
}
