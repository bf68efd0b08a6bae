//! Geofencing of geolocated items against regions.

use crate::geo::{contains, ProjectionParameters, Region};
use geo_types::Coord;

/// Anything with an optional geographic location.
pub trait Geolocated {
    /// Location as (lon, lat), if known.
    fn location(&self) -> Option<Coord<f64>>;
}

impl Geolocated for super::MapMarker {
    fn location(&self) -> Option<Coord<f64>> {
        Some(self.location)
    }
}

/// Checks whether a geographic location falls inside `region`.
///
/// The `(0, 0)` location is how upstream feeds say "unknown", so it is
/// never inside anything.
pub fn location_in_region(
    location: Coord<f64>,
    region: &Region,
    params: &ProjectionParameters,
) -> bool {
    if location.x == 0.0 && location.y == 0.0 {
        return false;
    }
    contains(region, params.project_coord(location))
}

/// Items located inside `region`, in input order.
pub fn filter_in_region<'a, T: Geolocated>(
    items: &'a [T],
    region: &Region,
    params: &ProjectionParameters,
) -> Vec<&'a T> {
    let result: Vec<&T> = items
        .iter()
        .filter(|item| {
            item.location()
                .is_some_and(|loc| location_in_region(loc, region, params))
        })
        .collect();
    log::debug!("Region {}: {} of {} items inside", region.id(), result.len(), items.len());
    result
}
