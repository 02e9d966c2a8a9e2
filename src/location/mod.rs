//! Location intelligence subsystem for agri_geo.
//!
//! Maps noisy reverse-geocoding place names onto a closed region → sub-region
//! vocabulary with a staged exact → containment → similarity strategy.

pub mod address;
pub mod config;
pub mod matcher;
pub mod normalize;
pub mod resolver;
pub mod similarity;
pub mod types;
pub mod vocabulary;

pub use address::{raw_location_from_json, AddressComponents, ReverseGeocodeResponse};
pub use config::MatchConfig;
pub use matcher::{match_region, match_sub_region};
pub use normalize::normalize;
pub use resolver::{resolve, Resolution, Resolver};
pub use similarity::{edit_distance, similarity, similarity_with_containment};
pub use types::{ConfigError, MatchOutcome, MatchTier, RawLocation, ResolvedLocation, VocabularyError};
pub use vocabulary::{RegionEntry, Vocabulary, VocabularySource};
