//! Compute layer for radius queries.
//!
//! This module holds the search engine proper:
//! - Argument validation
//! - Metric balls (radius-bound distance tests)
//! - The spatial hash grid
//! - Per-query neighbor enumeration
//!
//! Nothing here keeps state between calls; every search builds its grid from
//! scratch and drops it when the result set is packed.

/// Conditionally parallel iterator over a slice.
macro_rules! maybe_par_iter {
    ($slice:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $slice.par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter()
        }
    }};
}

pub mod grid;
pub mod metric;
pub mod neighbors;
pub mod validation;

pub use grid::HashGrid;
pub use metric::MetricBall;
pub use neighbors::{NeighborEnumerator, Neighborhood};
