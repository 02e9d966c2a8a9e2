//! Tunable matching parameters.

use serde::{Deserialize, Serialize};

use super::types::ConfigError;

/// Minimum similarity (exclusive) for a region to match in the similarity tier.
pub const DEFAULT_REGION_THRESHOLD: f64 = 0.5;

/// Minimum similarity (exclusive) for a sub-region. Looser than regions
/// since geocoders return shorter, noisier district names.
pub const DEFAULT_SUB_REGION_THRESHOLD: f64 = 0.4;

/// Score assigned when one normalized string contains the other.
pub const DEFAULT_CONTAINMENT_SCORE: f64 = 0.8;

/// Thresholds and scores used by the matchers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_region_threshold")]
    pub region_threshold: f64,
    #[serde(default = "default_sub_region_threshold")]
    pub sub_region_threshold: f64,
    #[serde(default = "default_containment_score")]
    pub containment_score: f64,
}

fn default_region_threshold() -> f64 {
    DEFAULT_REGION_THRESHOLD
}

fn default_sub_region_threshold() -> f64 {
    DEFAULT_SUB_REGION_THRESHOLD
}

fn default_containment_score() -> f64 {
    DEFAULT_CONTAINMENT_SCORE
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            region_threshold: DEFAULT_REGION_THRESHOLD,
            sub_region_threshold: DEFAULT_SUB_REGION_THRESHOLD,
            containment_score: DEFAULT_CONTAINMENT_SCORE,
        }
    }
}

impl MatchConfig {
    /// Check that every parameter lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("region_threshold", self.region_threshold),
            ("sub_region_threshold", self.sub_region_threshold),
            ("containment_score", self.containment_score),
        ];
        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    pub fn with_region_threshold(mut self, threshold: f64) -> Self {
        self.region_threshold = threshold;
        self
    }

    pub fn with_sub_region_threshold(mut self, threshold: f64) -> Self {
        self.sub_region_threshold = threshold;
        self
    }

    pub fn with_containment_score(mut self, score: f64) -> Self {
        self.containment_score = score;
        self
    }
}
