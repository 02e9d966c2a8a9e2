//! The closed region → sub-region vocabulary.
//!
//! Built once at startup and never mutated. Iteration order is the order
//! regions and sub-regions appear in the source data, which the matchers
//! use for tie-breaking.
//!
//! File format:
//!
//! ```json
//! { "version": "1", "regions": [ { "name": "kerala", "sub_regions": ["ernakulam", "idukki"] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::normalize::normalize;
use super::types::VocabularyError;

/// Embedded Indian state → district dataset.
const EMBEDDED_VOCABULARY: &str = include_str!("../../data/india_regions.json");

/// One region and its sub-regions as they appear in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: String,
    pub sub_regions: Vec<String>,
}

impl RegionEntry {
    pub fn new<S: Into<String>>(name: impl Into<String>, sub_regions: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            sub_regions: sub_regions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct VocabularyData {
    #[serde(default = "default_version")]
    version: String,
    regions: Vec<RegionEntry>,
}

fn default_version() -> String {
    "1".to_string()
}

/// Where a vocabulary was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularySource {
    Embedded,
    File(PathBuf),
    Inline,
}

impl fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// A vocabulary name with its precomputed normalized form.
#[derive(Debug, Clone)]
pub(crate) struct Term {
    pub name: String,
    pub normalized: String,
}

/// Immutable lookup table of canonical region and sub-region names.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    regions: Vec<Term>,
    sub_regions: Vec<Vec<Term>>,
    /// normalized region name → position in `regions`
    index: HashMap<String, usize>,
    source: VocabularySource,
}

impl Vocabulary {
    /// Build and validate a vocabulary from ordered region entries.
    ///
    /// Names are stored lower-cased and trimmed. Fails on an empty
    /// vocabulary, blank or duplicate names, and regions without sub-regions.
    pub fn from_regions<I>(entries: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = RegionEntry>,
    {
        let mut regions = Vec::new();
        let mut sub_regions = Vec::new();
        let mut index = HashMap::new();

        for (pos, entry) in entries.into_iter().enumerate() {
            let region = canonical_term(&entry.name).ok_or(VocabularyError::EmptyRegionName(pos))?;
            if index.contains_key(&region.normalized) {
                return Err(VocabularyError::DuplicateRegion(region.name));
            }
            if entry.sub_regions.is_empty() {
                return Err(VocabularyError::EmptySubRegions(region.name));
            }

            let mut seen = HashSet::new();
            let mut subs = Vec::with_capacity(entry.sub_regions.len());
            for raw in &entry.sub_regions {
                let sub = canonical_term(raw).ok_or_else(|| VocabularyError::EmptySubRegionName {
                    region: region.name.clone(),
                })?;
                if !seen.insert(sub.normalized.clone()) {
                    return Err(VocabularyError::DuplicateSubRegion {
                        region: region.name.clone(),
                        sub_region: sub.name,
                    });
                }
                subs.push(sub);
            }

            index.insert(region.normalized.clone(), regions.len());
            regions.push(region);
            sub_regions.push(subs);
        }

        if regions.is_empty() {
            return Err(VocabularyError::NoRegions);
        }

        Ok(Self {
            regions,
            sub_regions,
            index,
            source: VocabularySource::Inline,
        })
    }

    /// Parse a vocabulary from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let data: VocabularyData = serde_json::from_str(json)?;
        Self::from_regions(data.regions)
    }

    /// Load the vocabulary compiled into the binary.
    pub fn load_embedded() -> Result<Self, VocabularyError> {
        let mut vocab = Self::from_json(EMBEDDED_VOCABULARY)?;
        vocab.source = VocabularySource::Embedded;
        Ok(vocab)
    }

    /// Load a vocabulary from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, VocabularyError> {
        let content = fs::read_to_string(path)?;
        let mut vocab = Self::from_json(&content)?;
        vocab.source = VocabularySource::File(path.to_path_buf());
        Ok(vocab)
    }

    /// Load `~/.agri_geo/vocabulary.json` if present, otherwise the embedded data.
    pub fn load_default() -> Result<Self, VocabularyError> {
        let path = Self::default_path();
        if path.is_file() {
            Self::load_from_file(&path)
        } else {
            Self::load_embedded()
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".agri_geo")
            .join("vocabulary.json")
    }

    /// Serialize back to the file format, preserving order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let data = VocabularyData {
            version: default_version(),
            regions: self.entries(),
        };
        serde_json::to_string_pretty(&data)
    }

    pub fn source(&self) -> &VocabularySource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Canonical region names in vocabulary order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|t| t.name.as_str())
    }

    /// Canonical sub-region names for `region`, which may be given in any
    /// form that normalizes to a known region.
    pub fn sub_region_names(&self, region: &str) -> Option<Vec<&str>> {
        self.sub_region_terms(region)
            .map(|terms| terms.iter().map(|t| t.name.as_str()).collect())
    }

    /// Canonical name of the region that `region` normalizes to, if any.
    pub fn canonical_region(&self, region: &str) -> Option<&str> {
        let pos = *self.index.get(&normalize(region))?;
        Some(self.regions[pos].name.as_str())
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.index.contains_key(&normalize(region))
    }

    /// Owned copy of the vocabulary as region entries.
    pub fn entries(&self) -> Vec<RegionEntry> {
        self.regions
            .iter()
            .zip(&self.sub_regions)
            .map(|(r, subs)| RegionEntry {
                name: r.name.clone(),
                sub_regions: subs.iter().map(|t| t.name.clone()).collect(),
            })
            .collect()
    }

    pub(crate) fn region_terms(&self) -> &[Term] {
        &self.regions
    }

    pub(crate) fn sub_region_terms(&self, region: &str) -> Option<&[Term]> {
        let pos = *self.index.get(&normalize(region))?;
        self.sub_regions.get(pos).map(Vec::as_slice)
    }
}

fn canonical_term(raw: &str) -> Option<Term> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return None;
    }
    Some(Term {
        name: raw.trim().to_lowercase(),
        normalized,
    })
}
