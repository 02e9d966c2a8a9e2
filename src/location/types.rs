//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unvalidated place names as received from a reverse-geocoding source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub region_text: Option<String>,
    #[serde(default)]
    pub sub_region_text: Option<String>,
}

impl RawLocation {
    pub fn new(region: impl Into<String>, sub_region: impl Into<String>) -> Self {
        Self {
            region_text: Some(region.into()),
            sub_region_text: Some(sub_region.into()),
        }
    }

    pub fn region_only(region: impl Into<String>) -> Self {
        Self {
            region_text: Some(region.into()),
            sub_region_text: None,
        }
    }
}

/// Resolution result handed back to callers.
///
/// `sub_region` is only ever set when `region` is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub region: Option<String>,
    pub sub_region: Option<String>,
    /// Advisory message carrying the raw text that failed to resolve.
    pub warning: Option<String>,
}

impl ResolvedLocation {
    pub fn is_complete(&self) -> bool {
        self.region.is_some() && self.sub_region.is_some()
    }

    pub fn display_line(&self) -> String {
        match (&self.region, &self.sub_region) {
            (Some(r), Some(s)) => format!("\u{1F4CD} {} \u{203A} {}", r, s),
            (Some(r), None) => format!("\u{1F4CD} {} \u{203A} (select sub-region)", r),
            _ => "\u{1F4CD} (unresolved)".to_string(),
        }
    }
}

/// Which matching stage produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Containment,
    Similarity,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Containment => write!(f, "containment"),
            Self::Similarity => write!(f, "similarity"),
        }
    }
}

/// Best entry found while scanning one vocabulary list. Internal to matchers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchCandidate {
    pub name: String,
    pub score: f64,
    pub tier: MatchTier,
}

/// Outcome of matching one raw string against one vocabulary list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchOutcome {
    Matched {
        name: String,
        tier: MatchTier,
        score: f64,
    },
    Unmatched {
        /// Highest-scoring rejected candidate, if the similarity tier ran.
        #[serde(skip_serializing_if = "Option::is_none")]
        best: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        best_score: Option<f64>,
    },
}

impl MatchOutcome {
    pub(crate) fn unmatched() -> Self {
        Self::Unmatched { best: None, best_score: None }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Matched { name, .. } => Some(name),
            Self::Unmatched { .. } => None,
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            Self::Matched { tier, .. } => Some(*tier),
            Self::Unmatched { .. } => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Matched { name, .. } => Some(name),
            Self::Unmatched { .. } => None,
        }
    }
}

impl MatchCandidate {
    pub(crate) fn into_outcome(self) -> MatchOutcome {
        MatchOutcome::Matched {
            name: self.name,
            tier: self.tier,
            score: self.score,
        }
    }
}

/// Vocabulary construction and loading errors. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Vocabulary contains no regions")]
    NoRegions,

    #[error("Region name at position {0} is empty after normalization")]
    EmptyRegionName(usize),

    #[error("Duplicate region '{0}'")]
    DuplicateRegion(String),

    #[error("Region '{0}' has no sub-regions")]
    EmptySubRegions(String),

    #[error("Region '{region}' has a sub-region that is empty after normalization")]
    EmptySubRegionName { region: String },

    #[error("Duplicate sub-region '{sub_region}' under region '{region}'")]
    DuplicateSubRegion { region: String, sub_region: String },
}

/// Invalid matcher parameters.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
