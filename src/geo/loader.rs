//! GeoJSON region loading.
//!
//! Loading runs in two passes over the feature collection: the first finds
//! the global geographic extent and derives the projection, the second
//! projects every valid feature's outer ring into a [`Region`]. Bad features
//! are skipped with a warning; only an unreadable document is an error.

use super::{BoundingBox, GeoBounds, ProjectionParameters, Region};
use crate::config::MapConfig;
use crate::error::{LoadError, SkipReason};
use geo_types::Coord;
use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Value};
use glam::Vec2;

/// Output of a region load.
#[derive(Debug, Clone)]
pub struct LoadedRegions {
    /// Regions in input feature order.
    pub regions: Vec<Region>,
    /// Projection shared by every region and by marker lookups.
    pub params: ProjectionParameters,
    /// Union of the projected region bounding boxes.
    pub map_bounds: Option<BoundingBox>,
    /// What was loaded and what was skipped.
    pub report: LoadReport,
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of regions produced.
    pub loaded: usize,
    /// Skipped features as (feature index, reason).
    pub skipped: Vec<(usize, SkipReason)>,
}

/// A feature that passed validation, still in geographic coordinates.
struct RawRegion {
    id: String,
    ring: Vec<Coord<f64>>,
}

/// Parses a GeoJSON document and loads its regions.
///
/// A bare `Feature` is treated as a one-feature collection.
pub fn load_regions(geojson_str: &str, config: &MapConfig) -> Result<LoadedRegions, LoadError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(f) => FeatureCollection {
            bbox: None,
            features: vec![f],
            foreign_members: None,
        },
        GeoJson::Geometry(_) => return Err(LoadError::NotAFeatureCollection("Geometry")),
    };

    Ok(load_feature_collection(&collection, config))
}

/// Loads regions from an already parsed feature collection.
pub fn load_feature_collection(fc: &FeatureCollection, config: &MapConfig) -> LoadedRegions {
    let mut report = LoadReport::default();
    let mut raw = Vec::with_capacity(fc.features.len());

    for (idx, feature) in fc.features.iter().enumerate() {
        match read_feature(feature, &config.region_id_property) {
            Ok(region) => raw.push(region),
            Err(reason) => {
                log::warn!("Skipping feature {}: {}", idx, reason);
                report.skipped.push((idx, reason));
            }
        }
    }

    // First pass: global extent
    let mut bounds: Option<GeoBounds> = None;
    for coord in raw.iter().flat_map(|r| r.ring.iter()) {
        match bounds.as_mut() {
            Some(b) => b.include(*coord),
            None => bounds = Some(GeoBounds::at(*coord)),
        }
    }

    let origin = config.world_origin();
    let params = match bounds {
        Some(b) => {
            ProjectionParameters::from_bounds(&b, config.target_span, config.fallback_scale, origin)
        }
        None => ProjectionParameters::new(config.fallback_scale, 0.0, 0.0, origin),
    };

    // Second pass: project rings
    let regions: Vec<Region> = raw
        .into_iter()
        .filter_map(|r| {
            let points: Vec<Vec2> = r.ring.iter().map(|c| params.project_coord(*c)).collect();
            Region::new(r.id, &points)
        })
        .collect();

    let map_bounds = regions
        .iter()
        .map(|r| *r.bounding_box())
        .reduce(|a, b| a.union(&b));

    report.loaded = regions.len();
    log::info!(
        "Loaded {} regions ({} skipped), scale {:.3}, center ({:.4}, {:.4})",
        report.loaded,
        report.skipped.len(),
        params.scale,
        params.center_lat,
        params.center_lon
    );
    if let Some(b) = map_bounds {
        log::info!(
            "Map bounds: X[{}, {}] Y[{}, {}]",
            b.min_x,
            b.max_x,
            b.min_y,
            b.max_y
        );
    }

    LoadedRegions {
        regions,
        params,
        map_bounds,
        report,
    }
}

fn read_feature(feature: &Feature, id_property: &str) -> Result<RawRegion, SkipReason> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(SkipReason::MissingGeometry)?;
    let properties = feature
        .properties
        .as_ref()
        .ok_or(SkipReason::MissingProperties)?;

    let ring = match &geometry.value {
        Value::Polygon(rings) => rings.first().ok_or(SkipReason::TooFewPoints)?,
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .max_by(|a, b| ring_area(a).total_cmp(&ring_area(b)))
            .ok_or(SkipReason::TooFewPoints)?,
        _ => return Err(SkipReason::UnsupportedGeometry),
    };

    let mut coords: Vec<Coord<f64>> = ring
        .iter()
        .filter(|p| p.len() >= 2 && p[0].is_finite() && p[1].is_finite())
        .map(|p| Coord { x: p[0], y: p[1] })
        .collect();
    drop_closing_duplicate(&mut coords);
    if coords.len() < 3 {
        return Err(SkipReason::TooFewPoints);
    }

    let id = match properties.get(id_property) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => match &feature.id {
            Some(Id::String(s)) => Some(s.clone()),
            Some(Id::Number(n)) => Some(n.to_string()),
            None => None,
        },
    }
    .ok_or(SkipReason::MissingId)?;

    Ok(RawRegion { id, ring: coords })
}

fn drop_closing_duplicate(coords: &mut Vec<Coord<f64>>) {
    if coords.len() >= 2 && coords.first() == coords.last() {
        coords.pop();
    }
}

/// Unsigned shoelace area of a GeoJSON ring, in square degrees.
fn ring_area(ring: &[Vec<f64>]) -> f64 {
    let pts: Vec<(f64, f64)> = ring
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (p[0], p[1]))
        .collect();
    if pts.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..pts.len() {
        let (x1, y1) = pts[i];
        let (x2, y2) = pts[(i + 1) % pts.len()];
        sum += x1 * y2 - x2 * y1;
    }
    (sum / 2.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "SR_ID": "A" },
              "geometry": { "type": "Polygon", "coordinates": [[[13.0,45.0],[14.0,45.0],[14.0,46.0],[13.0,46.0],[13.0,45.0]]] } },
            { "type": "Feature", "properties": { "SR_ID": 7 },
              "geometry": { "type": "Polygon", "coordinates": [[[14.0,45.0],[16.5,45.0],[16.5,47.0],[14.0,47.0]]] } }
        ]
    }"#;

    #[test]
    fn test_loads_regions_in_input_order() {
        let loaded = load_regions(TWO_REGIONS, &MapConfig::default()).unwrap();
        assert_eq!(loaded.report.loaded, 2);
        assert!(loaded.report.skipped.is_empty());
        assert_eq!(loaded.regions[0].id(), "A");
        assert_eq!(loaded.regions[1].id(), "7");
        // Closing duplicate dropped
        assert_eq!(loaded.regions[0].vertex_count(), 4);
    }

    #[test]
    fn test_projection_spans_target() {
        let loaded = load_regions(TWO_REGIONS, &MapConfig::default()).unwrap();
        let bounds = loaded.map_bounds.unwrap();
        assert!(bounds.width() <= 700.0 + 1e-2);
        assert!(bounds.height() <= 700.0 + 1e-2);
        // Longest side (3.5 degrees of longitude) fills the span
        assert!((bounds.width() - 700.0).abs() < 1e-2);
        let center = bounds.center();
        assert!((center.x - 400.0).abs() < 1e-2);
        assert!((center.y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_bad_features_are_skipped() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "SR_ID": "nogeom" }, "geometry": null },
                { "type": "Feature", "properties": null,
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]] } },
                { "type": "Feature", "properties": { "SR_ID": "line" },
                  "geometry": { "type": "LineString", "coordinates": [[0,0],[1,1]] } },
                { "type": "Feature", "properties": { "SR_ID": "short" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[0,0]]] } },
                { "type": "Feature", "properties": { "NAME": "anon" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]] } },
                { "type": "Feature", "properties": { "SR_ID": "ok" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2]]] } }
            ]
        }"#;
        let loaded = load_regions(doc, &MapConfig::default()).unwrap();
        assert_eq!(loaded.regions.len(), 1);
        assert_eq!(loaded.regions[0].id(), "ok");
        assert_eq!(
            loaded.report.skipped,
            vec![
                (0, SkipReason::MissingGeometry),
                (1, SkipReason::MissingProperties),
                (2, SkipReason::UnsupportedGeometry),
                (3, SkipReason::TooFewPoints),
                (4, SkipReason::MissingId),
            ]
        );
    }

    #[test]
    fn test_feature_id_fallback() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "id": "fid", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1]]] } }
            ]
        }"#;
        let loaded = load_regions(doc, &MapConfig::default()).unwrap();
        assert_eq!(loaded.regions[0].id(), "fid");
    }

    #[test]
    fn test_multipolygon_uses_largest_outer_ring() {
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "SR_ID": "M" },
                  "geometry": { "type": "MultiPolygon", "coordinates": [
                    [[[0,0],[1,0],[1,1],[0,1]]],
                    [[[5,5],[9,5],[9,9],[5,9]]]
                  ] } }
            ]
        }"#;
        let loaded = load_regions(doc, &MapConfig::default()).unwrap();
        let bbox = loaded.regions[0].bounding_box();
        // The larger square fills the whole target span
        assert!((bbox.width() - 700.0).abs() < 1e-2);
    }

    #[test]
    fn test_unparseable_document_is_an_error() {
        assert!(matches!(
            load_regions("not json", &MapConfig::default()),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            load_regions(
                r#"{ "type": "Point", "coordinates": [1.0, 2.0] }"#,
                &MapConfig::default()
            ),
            Err(LoadError::NotAFeatureCollection(_))
        ));
    }

    #[test]
    fn test_empty_collection_uses_fallback_projection() {
        let doc = r#"{ "type": "FeatureCollection", "features": [] }"#;
        let loaded = load_regions(doc, &MapConfig::default()).unwrap();
        assert!(loaded.regions.is_empty());
        assert!(loaded.map_bounds.is_none());
        assert_eq!(loaded.params.scale, 1.0);
    }
}
