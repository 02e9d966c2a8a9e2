//! # agri_geo
//!
//! Resolves free-text place names from reverse-geocoding services onto the
//! exact state/district vocabulary expected by downstream crop prediction
//! services.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agri_geo::location::{RawLocation, Resolver, Vocabulary};
//!
//! let vocab = Arc::new(Vocabulary::load_embedded().unwrap());
//! let resolver = Resolver::with_defaults(vocab);
//! let loc = resolver.resolve(&RawLocation::new("Keralaa", "Ernakulamm"));
//! assert_eq!(loc.region.as_deref(), Some("kerala"));
//! ```

pub mod location;
pub mod server;
