#![warn(clippy::all)]

//! Region Workbench - an interactive region map engine.
//!
//! Loads administrative regions from GeoJSON, projects them onto a flat world
//! plane, triangulates them for rendering and answers point-in-region
//! queries. A camera controller handles zoom, pan, animated region focus and
//! a pinnable side panel. Geolocated items can be geofenced into regions and
//! given stable pin positions inside them.
//!
//! Rendering is left to the host: [`RegionMap::draw_list`] hands out the
//! triangles, outlines and styles to draw, and
//! [`CameraController::view_projection`](camera::CameraController::view_projection)
//! the matrix to draw them with.

pub mod camera;
pub mod config;
pub mod error;
pub mod geo;
pub mod markers;
pub mod state;

pub use config::MapConfig;
pub use error::{LoadError, SkipReason};
pub use state::{RegionDraw, RegionMap, RegionStyle, SelectionChange};
