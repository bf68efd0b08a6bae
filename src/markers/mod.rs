//! Markers and pins on top of the region map.
//!
//! Covers loading point markers, deciding which geolocated items fall in a
//! region, placing item pins at stable spots inside a region, and the pin
//! animations themselves.

mod feed;
mod geofence;
mod pins;
mod placement;

pub use feed::{load_markers, parse_color, MapMarker, MarkerLevel};
pub use geofence::{filter_in_region, location_in_region, Geolocated};
pub use pins::{pin_at, PinDrop, PinDropSet, PinFade, PinSettings};
pub use placement::{sample_point_in_region, MarkerPlacementCache, Placement, PlacementKey};
