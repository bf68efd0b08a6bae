//! Error types for loading geographic data.

use std::fmt;

/// Errors that abort loading a GeoJSON document.
///
/// Individual bad features never produce an error; they are skipped and
/// reported through [`SkipReason`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document is not valid GeoJSON.
    #[error("Failed to parse GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
    /// The document parsed, but is a bare geometry.
    #[error("Expected a FeatureCollection, found {0}")]
    NotAFeatureCollection(&'static str),
}

/// Why a single feature was left out of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The feature has no geometry.
    MissingGeometry,
    /// The feature has no properties object.
    MissingProperties,
    /// The geometry type cannot describe the expected shape.
    UnsupportedGeometry,
    /// The ring or position has too few coordinates.
    TooFewPoints,
    /// No identifier could be read from the feature.
    MissingId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingGeometry => write!(f, "missing geometry"),
            SkipReason::MissingProperties => write!(f, "missing properties"),
            SkipReason::UnsupportedGeometry => write!(f, "unsupported geometry type"),
            SkipReason::TooFewPoints => write!(f, "too few coordinates"),
            SkipReason::MissingId => write!(f, "missing identifier"),
        }
    }
}
