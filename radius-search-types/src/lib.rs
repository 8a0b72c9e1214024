//! # radius-search-types
//!
//! Core coordinate and metric types for the radius-search engine.
//!
//! - **Precision**: the [`Scalar`](scalar::Scalar) trait, implemented for `f32` and `f64`,
//!   and the runtime [`Dtype`](dtype::Dtype) tag
//! - **Coordinates**: [`Point3`](point::Point3), a plain 3-D coordinate
//! - **Metrics**: [`Metric`](metric::Metric), the L1 / L2 / L∞ distance functions
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use radius_search_types::{metric::Metric, point::Point3};
//!
//! let a = Point3::new(0.0_f64, 0.0, 0.0);
//! let b = Point3::new(1.0, 2.0, 2.0);
//!
//! assert_eq!(Metric::L1.distance(&a, &b), 5.0);
//! // L2 reports the squared Euclidean distance
//! assert_eq!(Metric::L2.distance(&a, &b), 9.0);
//! assert_eq!(Metric::Linf.distance(&a, &b), 2.0);
//! ```

pub mod dtype;
pub mod metric;
pub mod point;
pub mod scalar;

pub use dtype::Dtype;
pub use metric::{Metric, ParseMetricError};
pub use point::Point3;
pub use scalar::Scalar;
