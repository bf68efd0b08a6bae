//! Viewport camera.
//!
//! The controller keeps the camera on the map, zooms about the cursor, pans,
//! and runs eased transitions when regions gain or lose focus.

mod animation;
mod controller;
mod drag;
mod easing;
mod viewport;

pub use animation::{AnimationProgress, CameraAnimation, Waypoint};
pub use controller::{CameraController, CameraSettings};
pub use drag::{DragAction, DragTracker};
pub use easing::{ease_in_out_cubic, ease_out_cubic, ease_out_quad};
pub use viewport::{CameraState, ViewportConstraints};
