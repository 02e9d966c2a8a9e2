//! Tiered matching of raw place names onto vocabulary entries.
//!
//! Tiers run in order and the first hit wins:
//!
//! 1. **Exact**: normalized input equals a normalized entry.
//! 2. **Containment**: one normalized string contains the other; first entry in
//!    vocabulary order wins.
//! 3. **Similarity**: highest [`similarity`](super::similarity) score, earliest
//!    entry on ties, accepted only when strictly above the threshold.

use tracing::debug;

use super::config::MatchConfig;
use super::normalize::normalize;
use super::similarity::normalized_similarity;
use super::types::{MatchCandidate, MatchOutcome, MatchTier};
use super::vocabulary::{Term, Vocabulary};

/// One stage of the matching pipeline.
pub(crate) trait MatchStrategy {
    fn tier(&self) -> MatchTier;

    /// Try to match an already-normalized, non-empty input against `candidates`.
    fn attempt(&self, input: &str, candidates: &[Term]) -> Attempt;
}

/// Result of a single strategy.
pub(crate) enum Attempt {
    Hit(MatchCandidate),
    /// No hit; carries the best rejected candidate if the strategy scored any.
    Miss(Option<(String, f64)>),
}

pub(crate) struct ExactTier;

impl MatchStrategy for ExactTier {
    fn tier(&self) -> MatchTier {
        MatchTier::Exact
    }

    fn attempt(&self, input: &str, candidates: &[Term]) -> Attempt {
        match candidates.iter().find(|t| t.normalized == input) {
            Some(t) => Attempt::Hit(MatchCandidate {
                name: t.name.clone(),
                score: 1.0,
                tier: self.tier(),
            }),
            None => Attempt::Miss(None),
        }
    }
}

pub(crate) struct ContainmentTier {
    pub score: f64,
}

impl MatchStrategy for ContainmentTier {
    fn tier(&self) -> MatchTier {
        MatchTier::Containment
    }

    fn attempt(&self, input: &str, candidates: &[Term]) -> Attempt {
        let hit = candidates
            .iter()
            .find(|t| input.contains(t.normalized.as_str()) || t.normalized.contains(input));
        match hit {
            Some(t) => Attempt::Hit(MatchCandidate {
                name: t.name.clone(),
                score: self.score,
                tier: self.tier(),
            }),
            None => Attempt::Miss(None),
        }
    }
}

pub(crate) struct SimilarityTier {
    pub threshold: f64,
    pub containment_score: f64,
}

impl MatchStrategy for SimilarityTier {
    fn tier(&self) -> MatchTier {
        MatchTier::Similarity
    }

    fn attempt(&self, input: &str, candidates: &[Term]) -> Attempt {
        let mut best: Option<(&Term, f64)> = None;
        for term in candidates {
            let score = normalized_similarity(input, &term.normalized, self.containment_score);
            // strict `>` keeps the earliest entry on ties
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((term, score));
            }
        }

        match best {
            Some((term, score)) if score > self.threshold => Attempt::Hit(MatchCandidate {
                name: term.name.clone(),
                score,
                tier: self.tier(),
            }),
            Some((term, score)) => Attempt::Miss(Some((term.name.clone(), score))),
            None => Attempt::Miss(None),
        }
    }
}

/// Ordered exact → containment → similarity pipeline.
pub(crate) struct TieredMatcher {
    strategies: Vec<Box<dyn MatchStrategy + Send + Sync>>,
}

impl TieredMatcher {
    pub fn new(threshold: f64, containment_score: f64) -> Self {
        Self {
            strategies: vec![
                Box::new(ExactTier),
                Box::new(ContainmentTier { score: containment_score }),
                Box::new(SimilarityTier { threshold, containment_score }),
            ],
        }
    }

    /// Run the tiers over `candidates`. Blank input never matches.
    pub fn run(&self, raw: &str, candidates: &[Term]) -> MatchOutcome {
        let input = normalize(raw);
        if input.is_empty() {
            return MatchOutcome::unmatched();
        }

        let mut rejected = None;
        for strategy in &self.strategies {
            match strategy.attempt(&input, candidates) {
                Attempt::Hit(candidate) => {
                    debug!(
                        "'{}' -> '{}' via {} tier (score {:.3})",
                        raw, candidate.name, candidate.tier, candidate.score
                    );
                    return candidate.into_outcome();
                }
                Attempt::Miss(best) => {
                    if best.is_some() {
                        rejected = best;
                    }
                }
            }
        }

        debug!("'{}' unmatched (best rejected: {:?})", raw, rejected);
        let (best, best_score) = match rejected {
            Some((name, score)) => (Some(name), Some(score)),
            None => (None, None),
        };
        MatchOutcome::Unmatched { best, best_score }
    }
}

/// Resolve a raw region name against the vocabulary's regions.
pub fn match_region(raw_region: Option<&str>, vocabulary: &Vocabulary, config: &MatchConfig) -> MatchOutcome {
    let Some(raw) = raw_region else {
        return MatchOutcome::unmatched();
    };
    TieredMatcher::new(config.region_threshold, config.containment_score).run(raw, vocabulary.region_terms())
}

/// Resolve a raw sub-region name against the sub-regions of `region` only.
///
/// Unmatched without scanning when `region` is absent or unknown.
pub fn match_sub_region(
    raw_sub_region: Option<&str>,
    region: Option<&str>,
    vocabulary: &Vocabulary,
    config: &MatchConfig,
) -> MatchOutcome {
    let (Some(raw), Some(region)) = (raw_sub_region, region) else {
        return MatchOutcome::unmatched();
    };
    let Some(candidates) = vocabulary.sub_region_terms(region) else {
        return MatchOutcome::unmatched();
    };
    TieredMatcher::new(config.sub_region_threshold, config.containment_score).run(raw, candidates)
}
