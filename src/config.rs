//! Search configuration.
//!
//! Everything about a search except the inputs and the radius: the metric,
//! the output flags and the hash table sizing knobs. Configurations can be
//! built in code, or loaded from JSON (and TOML with the `toml` feature).

use crate::compute::validation::{validate_hash_table_size_factor, validate_max_hash_table_size};
use crate::error::{Result, SearchError};
use radius_search_types::Metric;
use serde::{Deserialize, Serialize};

/// Configuration for fixed radius searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Distance metric used for the inclusion test and reported distances
    #[serde(default)]
    pub metric: Metric,

    /// Exclude the point with the same index as the query
    #[serde(default)]
    pub ignore_query_point: bool,

    /// Produce `neighbors_distance` alongside the neighbor indices
    #[serde(default)]
    pub return_distances: bool,

    /// Hash slots per input point (default: 1/32)
    /// Only affects speed and memory, never the results
    #[serde(default = "SearchConfig::default_hash_table_size_factor")]
    pub hash_table_size_factor: f64,

    /// Upper bound on the number of hash slots (default: 32Mi)
    #[serde(default = "SearchConfig::default_max_hash_table_size")]
    pub max_hash_table_size: usize,

    /// Sort each query's neighbors by increasing point index
    #[serde(default)]
    pub sort_neighbors: bool,
}

impl SearchConfig {
    const fn default_hash_table_size_factor() -> f64 {
        1.0 / 32.0
    }

    const fn default_max_hash_table_size() -> usize {
        33_554_432
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_ignore_query_point(mut self, ignore: bool) -> Self {
        self.ignore_query_point = ignore;
        self
    }

    pub fn with_return_distances(mut self, enabled: bool) -> Self {
        self.return_distances = enabled;
        self
    }

    pub fn with_hash_table_size_factor(mut self, factor: f64) -> Self {
        self.hash_table_size_factor = factor;
        self
    }

    pub fn with_max_hash_table_size(mut self, max_size: usize) -> Self {
        self.max_hash_table_size = max_size;
        self
    }

    pub fn with_sort_neighbors(mut self, enabled: bool) -> Self {
        self.sort_neighbors = enabled;
        self
    }

    /// Check the sizing knobs.
    pub fn validate(&self) -> Result<()> {
        validate_hash_table_size_factor(self.hash_table_size_factor)?;
        validate_max_hash_table_size(self.max_hash_table_size)?;
        Ok(())
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig =
            serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load configuration from a TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: SearchConfig =
            toml::from_str(toml_str).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as a TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            ignore_query_point: false,
            return_distances: false,
            hash_table_size_factor: Self::default_hash_table_size_factor(),
            max_hash_table_size: Self::default_max_hash_table_size(),
            sort_neighbors: false,
        }
    }
}
