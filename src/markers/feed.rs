//! Point markers loaded from a GeoJSON feed.

use crate::error::{LoadError, SkipReason};
use geo_types::Coord;
use geojson::{Feature, GeoJson, Value};

/// Marker tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerLevel {
    /// Regional center, drawn with the large pin and the fly-in animation.
    Region,
    /// Any other level (`"news"` by default).
    Other(String),
}

impl MarkerLevel {
    fn parse(level: &str) -> Self {
        match level {
            "region" => MarkerLevel::Region,
            other => MarkerLevel::Other(other.to_string()),
        }
    }
}

/// A geolocated point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    /// Geographic position as (lon, lat).
    pub location: Coord<f64>,
    /// RGBA color.
    pub color: [u8; 4],
    pub kind: String,
    pub name: Option<String>,
    pub level: MarkerLevel,
}

impl MapMarker {
    pub fn is_regional(&self) -> bool {
        self.level == MarkerLevel::Region
    }
}

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Parses a GeoJSON feature collection of `Point` markers.
///
/// Features that are not points or lack coordinates or properties are
/// skipped. A document without a `features` array yields no markers.
pub fn load_markers(geojson_str: &str) -> Result<Vec<MapMarker>, LoadError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return Ok(Vec::new()),
    };

    let mut markers = Vec::with_capacity(features.len());
    for (idx, feature) in features.iter().enumerate() {
        match convert_feature(feature) {
            Ok(marker) => markers.push(marker),
            Err(reason) => log::debug!("Skipping marker feature {}: {}", idx, reason),
        }
    }

    log::info!("Loaded {} markers", markers.len());
    Ok(markers)
}

fn convert_feature(feature: &Feature) -> Result<MapMarker, SkipReason> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(SkipReason::MissingGeometry)?;
    let properties = feature
        .properties
        .as_ref()
        .ok_or(SkipReason::MissingProperties)?;

    let Value::Point(coords) = &geometry.value else {
        return Err(SkipReason::UnsupportedGeometry);
    };
    if coords.len() < 2 {
        return Err(SkipReason::TooFewPoints);
    }

    let text = |key: &str| properties.get(key).and_then(|v| v.as_str());

    Ok(MapMarker {
        location: Coord {
            x: coords[0],
            y: coords[1],
        },
        color: text("marker-color").map(parse_color).unwrap_or(WHITE),
        kind: text("type").unwrap_or("unknown").to_string(),
        name: text("name").map(|s| s.to_string()),
        level: MarkerLevel::parse(text("level").unwrap_or("news")),
    })
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional). Anything else is
/// white.
pub fn parse_color(hex: &str) -> [u8; 4] {
    let hex = hex.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        log::warn!("Invalid marker color '{}'", hex);
        return WHITE;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6) } else { Some(255) };

    match (channel(0), channel(2), channel(4), alpha) {
        (Some(r), Some(g), Some(b), Some(a)) => [r, g, b, a],
        _ => {
            log::warn!("Invalid marker color '{}'", hex);
            WHITE
        }
    }
}
