//! Fixed radius neighbor search over 3D point sets, backed by a spatial hash grid.
//!
//! ```rust
//! use radius_search::{Metric, Point3, RadiusSearch};
//!
//! let points = vec![
//!     Point3::new(0.0_f32, 0.0, 0.0),
//!     Point3::new(0.1, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ];
//!
//! let search = RadiusSearch::builder()
//!     .metric(Metric::L2)
//!     .ignore_query_point(true)
//!     .return_distances(true)
//!     .build()?;
//!
//! let result = search.search(&points, &points, 0.2)?;
//! assert_eq!(result.neighbors(0), &[1]);
//! assert_eq!(result.neighbors_prefix_sum(), &[0, 1, 2]);
//! # Ok::<(), radius_search::SearchError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod coords;
pub mod error;
pub mod result;
pub mod search;

pub use builder::RadiusSearchBuilder;
pub use config::SearchConfig;
pub use coords::{Coordinates, DynResultSet};
pub use error::{Result, SearchError};
pub use result::{ResultPacker, ResultSet};
pub use search::{RadiusSearch, fixed_radius_search};

pub use radius_search_types::{Dtype, Metric, ParseMetricError, Point3, Scalar};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        Metric, Point3, RadiusSearch, RadiusSearchBuilder, Result, ResultSet, SearchConfig,
        SearchError, fixed_radius_search,
    };
}
