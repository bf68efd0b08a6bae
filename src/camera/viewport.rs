//! Camera state and the constraints that keep it on the map.
//!
//! Screen points are given in viewport units: the viewport spans
//! `world_width × world_height` units at zoom 1, origin at the top-left,
//! y growing downward. Hosts scale their pixel coordinates into this space.
//! World space has y growing upward, matching the projected map.

use crate::geo::BoundingBox;
use glam::{Mat4, Vec2};

/// Camera position (world center of the view) and zoom.
///
/// Zoom is a world-units-per-viewport-unit factor: larger values show more of
/// the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec2,
    pub zoom: f32,
}

impl CameraState {
    pub fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    /// Linear blend towards `target` by eased progress `t`.
    pub fn lerp(&self, target: &CameraState, t: f32) -> CameraState {
        CameraState {
            position: self.position + (target.position - self.position) * t,
            zoom: self.zoom + (target.zoom - self.zoom) * t,
        }
    }
}

/// Everything the camera must respect when it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConstraints {
    /// Union of all region bounding boxes.
    pub map_bounds: BoundingBox,
    pub world_width: f32,
    pub world_height: f32,
    /// Side panel width, in viewport units.
    pub panel_width: f32,
    /// While set, clamping is skipped and the panel offset governs position.
    pub panel_pinned: bool,
}

impl ViewportConstraints {
    pub fn new(map_bounds: BoundingBox, world_width: f32, world_height: f32) -> Self {
        Self {
            map_bounds,
            world_width,
            world_height,
            panel_width: 0.0,
            panel_pinned: false,
        }
    }

    /// Size of the viewport in viewport units.
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Size of the visible world rectangle at `zoom`.
    pub fn visible_size(&self, zoom: f32) -> Vec2 {
        self.viewport_size() * zoom
    }

    /// Clamps `camera` so the visible rectangle stays on the map.
    ///
    /// Along an axis where the view is at least as large as the map, the
    /// camera centers on the map instead. Does nothing while the panel is
    /// pinned.
    pub fn clamp(&self, camera: &mut CameraState) {
        if self.panel_pinned {
            return;
        }

        let visible = self.visible_size(camera.zoom);
        let bounds = &self.map_bounds;

        camera.position.x = clamp_axis(
            camera.position.x,
            visible.x,
            bounds.min_x,
            bounds.max_x,
        );
        camera.position.y = clamp_axis(
            camera.position.y,
            visible.y,
            bounds.min_y,
            bounds.max_y,
        );
    }

    /// Converts a viewport point to world coordinates under `camera`.
    pub fn unproject(&self, camera: &CameraState, screen: Vec2) -> Vec2 {
        let half = self.viewport_size() * 0.5;
        Vec2::new(
            camera.position.x + (screen.x - half.x) * camera.zoom,
            camera.position.y + (half.y - screen.y) * camera.zoom,
        )
    }

    /// Converts a world point to viewport coordinates under `camera`.
    pub fn project(&self, camera: &CameraState, world: Vec2) -> Vec2 {
        let half = self.viewport_size() * 0.5;
        Vec2::new(
            (world.x - camera.position.x) / camera.zoom + half.x,
            half.y - (world.y - camera.position.y) / camera.zoom,
        )
    }

    /// World rectangle currently visible under `camera`.
    pub fn visible_rect(&self, camera: &CameraState) -> BoundingBox {
        let half = self.visible_size(camera.zoom) * 0.5;
        BoundingBox::new(
            camera.position.x - half.x,
            camera.position.x + half.x,
            camera.position.y - half.y,
            camera.position.y + half.y,
        )
    }

    /// Orthographic view-projection matrix mapping the visible rectangle to
    /// normalized device coordinates.
    pub fn view_projection(&self, camera: &CameraState) -> Mat4 {
        let rect = self.visible_rect(camera);
        Mat4::orthographic_rh_gl(rect.min_x, rect.max_x, rect.min_y, rect.max_y, -1.0, 1.0)
    }
}

fn clamp_axis(position: f32, visible: f32, min: f32, max: f32) -> f32 {
    if visible >= max - min {
        (min + max) * 0.5
    } else {
        let half = visible * 0.5;
        position.clamp(min + half, max - half)
    }
}
