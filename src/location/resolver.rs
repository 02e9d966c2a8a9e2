//! Location resolver: orchestrates region then sub-region matching.
//!
//! Flow:  region text → region matcher → (if resolved) sub-region matcher scoped to that region
//!
//! Every call is a pure function of the raw input, the vocabulary and the
//! match config, so one `Resolver` can be shared across threads.

use serde::Serialize;
use std::sync::Arc;

use super::config::MatchConfig;
use super::matcher::{match_region, match_sub_region};
use super::normalize::normalize;
use super::types::{ConfigError, MatchOutcome, RawLocation, ResolvedLocation};
use super::vocabulary::Vocabulary;

/// The resolver with its vocabulary and thresholds.
#[derive(Debug, Clone)]
pub struct Resolver {
    vocabulary: Arc<Vocabulary>,
    config: MatchConfig,
}

/// A resolution plus the per-level match outcomes that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub location: ResolvedLocation,
    pub region_match: MatchOutcome,
    /// `None` when sub-region matching was skipped for lack of a region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_region_match: Option<MatchOutcome>,
}

impl Resolver {
    /// Create a resolver, rejecting out-of-range thresholds.
    pub fn new(vocabulary: Arc<Vocabulary>, config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { vocabulary, config })
    }

    /// Create a resolver with the default thresholds.
    pub fn with_defaults(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            config: MatchConfig::default(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Resolve raw region/sub-region text onto the vocabulary.
    pub fn resolve(&self, raw: &RawLocation) -> ResolvedLocation {
        self.resolve_detailed(raw).location
    }

    /// Resolve and keep the tier/score of each level for diagnostics.
    pub fn resolve_detailed(&self, raw: &RawLocation) -> Resolution {
        resolve_with(raw, &self.vocabulary, &self.config)
    }
}

/// Resolve with default thresholds.
pub fn resolve(raw: &RawLocation, vocabulary: &Vocabulary) -> ResolvedLocation {
    resolve_with(raw, vocabulary, &MatchConfig::default()).location
}

fn resolve_with(raw: &RawLocation, vocabulary: &Vocabulary, config: &MatchConfig) -> Resolution {
    let region_text = raw.region_text.as_deref();
    let region_match = match_region(region_text, vocabulary, config);

    let Some(region) = region_match.name().map(str::to_string) else {
        let warning = region_text
            .filter(|t| has_content(t))
            .map(|t| format!("region '{}' not recognized", t));
        return Resolution {
            location: ResolvedLocation {
                region: None,
                sub_region: None,
                warning,
            },
            region_match,
            sub_region_match: None,
        };
    };

    let sub_text = raw.sub_region_text.as_deref();
    let sub_region_match = match_sub_region(sub_text, Some(&region), vocabulary, config);
    let sub_region = sub_region_match.name().map(str::to_string);

    // A blank sub-region is "no data", not "no match".
    let warning = match (&sub_region, sub_text) {
        (None, Some(t)) if has_content(t) => {
            Some(format!("sub-region '{}' not recognized under '{}'", t, region))
        }
        _ => None,
    };

    Resolution {
        location: ResolvedLocation {
            region: Some(region),
            sub_region,
            warning,
        },
        region_match,
        sub_region_match: Some(sub_region_match),
    }
}

fn has_content(text: &str) -> bool {
    !normalize(text).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::types::MatchTier;
    use crate::location::vocabulary::RegionEntry;

    fn india_resolver() -> Resolver {
        Resolver::with_defaults(Arc::new(Vocabulary::load_embedded().unwrap()))
    }

    #[test]
    fn test_resolve_exact() {
        let loc = india_resolver().resolve(&RawLocation::new("Kerala", "Ernakulam"));
        assert_eq!(
            loc,
            ResolvedLocation {
                region: Some("kerala".into()),
                sub_region: Some("ernakulam".into()),
                warning: None,
            }
        );
    }

    #[test]
    fn test_resolve_misspelled() {
        let loc = india_resolver().resolve(&RawLocation::new("Keralaa", "Ernakulamm"));
        assert_eq!(loc.region.as_deref(), Some("kerala"));
        assert_eq!(loc.sub_region.as_deref(), Some("ernakulam"));
        assert!(loc.warning.is_none());
    }

    #[test]
    fn test_resolve_unknown_region() {
        let loc = india_resolver().resolve(&RawLocation::new("Atlantis", "Nowhere"));
        assert_eq!(loc.region, None);
        assert_eq!(loc.sub_region, None);
        assert_eq!(loc.warning.as_deref(), Some("region 'Atlantis' not recognized"));
    }

    #[test]
    fn test_resolve_unknown_sub_region() {
        let loc = india_resolver().resolve(&RawLocation::new("Punjab", "Unknowndistrict"));
        assert_eq!(loc.region.as_deref(), Some("punjab"));
        assert_eq!(loc.sub_region, None);
        assert_eq!(
            loc.warning.as_deref(),
            Some("sub-region 'Unknowndistrict' not recognized under 'punjab'")
        );
    }

    #[test]
    fn test_resolve_no_input() {
        let resolver = india_resolver();
        assert_eq!(resolver.resolve(&RawLocation::default()), ResolvedLocation::default());

        let blank = RawLocation {
            region_text: Some("   ".into()),
            sub_region_text: Some("Ernakulam".into()),
        };
        assert_eq!(resolver.resolve(&blank), ResolvedLocation::default());
    }

    #[test]
    fn test_resolve_region_without_sub_region_text() {
        let loc = india_resolver().resolve(&RawLocation::region_only("Bihar"));
        assert_eq!(loc.region.as_deref(), Some("bihar"));
        assert_eq!(loc.sub_region, None);
        assert_eq!(loc.warning, None);
    }

    #[test]
    fn test_unknown_region_skips_sub_region_matching() {
        let res = india_resolver().resolve_detailed(&RawLocation::new("Atlantis", "Ernakulam"));
        assert!(res.sub_region_match.is_none());
        assert!(res.location.sub_region.is_none());
    }

    #[test]
    fn test_resolve_detailed_reports_tiers() {
        let res = india_resolver().resolve_detailed(&RawLocation::new("Orissa", "Cuttack"));
        assert_eq!(res.region_match.tier(), Some(MatchTier::Similarity));
        assert_eq!(res.sub_region_match.unwrap().tier(), Some(MatchTier::Exact));
        assert_eq!(res.location.region.as_deref(), Some("odisha"));
    }

    #[test]
    fn test_resolution_json_flattens_location() {
        let res = india_resolver().resolve_detailed(&RawLocation::new("Kerala", "Ernakulam"));
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["region"], "kerala");
        assert_eq!(json["sub_region"], "ernakulam");
        assert_eq!(json["region_match"]["tier"], "exact");
    }

    #[test]
    fn test_free_function_matches_resolver() {
        let vocab = Vocabulary::load_embedded().unwrap();
        let resolver = Resolver::with_defaults(Arc::new(vocab.clone()));
        let inputs = [
            RawLocation::new("Kerala", "Ernakulam"),
            RawLocation::new("Atlantis", "Nowhere"),
            RawLocation::new("Punjab", "Unknowndistrict"),
            RawLocation::new("Maharastra", "Ahmadnagar"),
            RawLocation::default(),
        ];
        for raw in &inputs {
            assert_eq!(resolve(raw, &vocab), resolver.resolve(raw));
        }
    }

    #[test]
    fn test_sub_region_never_without_region() {
        let resolver = india_resolver();
        let inputs = [
            RawLocation::new("Atlantis", "Ernakulam"),
            RawLocation { region_text: None, sub_region_text: Some("Patna".into()) },
            RawLocation::new("", "Patna"),
        ];
        for raw in &inputs {
            let loc = resolver.resolve(raw);
            assert!(loc.region.is_some() || loc.sub_region.is_none());
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let vocab = Arc::new(Vocabulary::from_regions([RegionEntry::new("goa", ["north goa"])]).unwrap());
        let bad = MatchConfig::default().with_sub_region_threshold(-0.1);
        assert!(Resolver::new(vocab.clone(), bad).is_err());
        assert!(Resolver::new(vocab, MatchConfig::default()).is_ok());
    }

    #[test]
    fn test_custom_config_applies_to_sub_regions() {
        let vocab = Arc::new(Vocabulary::load_embedded().unwrap());
        let loose = Resolver::new(vocab.clone(), MatchConfig::default()).unwrap();
        // "Kachchh" vs "kutch" scores ~0.43
        assert_eq!(
            loose.resolve(&RawLocation::new("Gujarat", "Kachchh")).sub_region.as_deref(),
            Some("kutch")
        );
        let strict = Resolver::new(vocab, MatchConfig::default().with_sub_region_threshold(0.6)).unwrap();
        assert!(strict.resolve(&RawLocation::new("Gujarat", "Kachchh")).sub_region.is_none());
    }
}
