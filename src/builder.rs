//! Search builder for flexible configuration
//!
//! This module provides a builder pattern for assembling a [`RadiusSearch`]
//! from individual options or a whole [`SearchConfig`].

use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::RadiusSearch;
use radius_search_types::Metric;

/// Builder for radius search configuration.
#[derive(Debug, Clone, Default)]
pub struct RadiusSearchBuilder {
    config: SearchConfig,
}

impl RadiusSearchBuilder {
    /// Create a new builder with the default configuration (L2, no flags).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Exclude each query's own index from its neighbors.
    pub fn ignore_query_point(mut self, ignore: bool) -> Self {
        self.config.ignore_query_point = ignore;
        self
    }

    pub fn return_distances(mut self, enabled: bool) -> Self {
        self.config.return_distances = enabled;
        self
    }

    /// Hash slots per input point. Trades memory for fewer slot collisions.
    pub fn hash_table_size_factor(mut self, factor: f64) -> Self {
        self.config.hash_table_size_factor = factor;
        self
    }

    pub fn max_hash_table_size(mut self, max_size: usize) -> Self {
        self.config.max_hash_table_size = max_size;
        self
    }

    pub fn sort_neighbors(mut self, enabled: bool) -> Self {
        self.config.sort_neighbors = enabled;
        self
    }

    /// Validate the configuration and build the search.
    pub fn build(self) -> Result<RadiusSearch> {
        RadiusSearch::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_builder_default() {
        let search = RadiusSearchBuilder::new().build().unwrap();
        assert_eq!(search.config(), &SearchConfig::default());
    }

    #[test]
    fn test_builder_options() {
        let search = RadiusSearchBuilder::new()
            .metric(Metric::L1)
            .ignore_query_point(true)
            .return_distances(true)
            .hash_table_size_factor(1.0 / 8.0)
            .max_hash_table_size(4096)
            .sort_neighbors(true)
            .build()
            .unwrap();

        let config = search.config();
        assert_eq!(search.metric(), Metric::L1);
        assert!(config.ignore_query_point);
        assert!(config.return_distances);
        assert_eq!(config.hash_table_size_factor, 0.125);
        assert_eq!(config.max_hash_table_size, 4096);
        assert!(config.sort_neighbors);
    }

    #[test]
    fn test_builder_with_config() {
        let config = SearchConfig::default()
            .with_metric(Metric::Linf)
            .with_return_distances(true);
        let search = RadiusSearchBuilder::new()
            .config(config.clone())
            .build()
            .unwrap();
        assert_eq!(search.config(), &config);
    }

    #[test]
    fn test_builder_rejects_invalid_sizing() {
        let err = RadiusSearchBuilder::new()
            .hash_table_size_factor(-1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));

        assert!(
            RadiusSearchBuilder::new()
                .max_hash_table_size(0)
                .build()
                .is_err()
        );
    }
}
