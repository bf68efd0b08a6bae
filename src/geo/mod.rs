//! Geographic region engine.
//!
//! This module turns GeoJSON polygon features into projected regions,
//! triangulates them for filled rendering and answers point-in-region
//! queries for hover, selection and marker geofencing.

mod loader;
mod projection;
mod region;
mod triangulate;

pub use hit_test::{contains, point_in_ring, region_at};
pub use loader::{load_feature_collection, load_regions, LoadReport, LoadedRegions};
pub use projection::{GeoBounds, ProjectionParameters};
pub use region::{BoundingBox, Region};
pub use triangulate::{triangulate, RegionMesh};
