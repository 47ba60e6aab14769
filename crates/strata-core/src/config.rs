//! Generation configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Target number of ranges per column. The partitioner emits fewer when a
    /// column has fewer distinct values.
    pub partition_count: usize,

    /// Target number of column orderings to sample during the search.
    pub ordering_sample_target: f64,

    /// Target number of events to sample when building candidate trees.
    pub event_sample_target: f64,

    /// Number of parallel search workers.
    pub workers: usize,

    /// Optional seed for the sampling decisions. Workers derive their own
    /// generators from it; without a seed the search is not reproducible.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            partition_count: 16,
            ordering_sample_target: 4000.0,
            event_sample_target: 1000.0,
            workers: 4,
            seed: None,
        }
    }
}

impl GenConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `STRATA_PARTITION_COUNT`: target ranges per column
    /// - `STRATA_WORKERS`: parallel search workers
    /// - `STRATA_SEED`: sampling seed
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("STRATA_PARTITION_COUNT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.partition_count = v;
            }
        }

        if let Ok(s) = std::env::var("STRATA_WORKERS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.workers = v;
            }
        }

        if let Ok(s) = std::env::var("STRATA_SEED") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.seed = Some(v);
            }
        }

        cfg
    }
}
