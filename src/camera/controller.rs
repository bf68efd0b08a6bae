//! Camera controller: zoom, pan, region focus transitions and the side
//! panel offset.

use super::animation::{CameraAnimation, Waypoint};
use super::viewport::{CameraState, ViewportConstraints};
use crate::config::MapConfig;
use crate::geo::{BoundingBox, Region};
use glam::{Mat4, Vec2};

/// Camera zoom limits and transition constants, taken from [`MapConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub default_zoom: f32,
    pub zoom_step: f32,
    pub region_zoom_in: f32,
    pub animation_duration: f32,
    pub panel_zoom_out: f32,
    pub panel_shift_fraction: f32,
}

impl From<&MapConfig> for CameraSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            default_zoom: config.default_zoom,
            zoom_step: config.zoom_step,
            region_zoom_in: config.region_zoom_in,
            animation_duration: config.animation_duration,
            panel_zoom_out: config.panel_zoom_out,
            panel_shift_fraction: config.panel_shift_fraction,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl CameraSettings {
    /// Returns a copy with a usable zoom range and a default zoom inside it.
    ///
    /// An empty, non-positive or NaN range falls back to the default range.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            log::warn!(
                "Invalid camera zoom range [{}, {}], using defaults",
                self.min_zoom,
                self.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !self.default_zoom.is_finite() {
            self.default_zoom = defaults.default_zoom;
        }
        self.default_zoom = self.default_zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }
}

/// State saved when the side panel is pinned, restored when it closes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelOffset {
    original_zoom: f32,
    shift: f32,
}

/// Owns the camera and keeps it within the map.
///
/// Zoom is kept within `[min_zoom, max_zoom]` after every operation. Position
/// is clamped to the map after every operation unless the panel is pinned.
/// At most one animation runs at a time; starting a new one replaces it.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: CameraState,
    constraints: ViewportConstraints,
    settings: CameraSettings,
    animation: Option<CameraAnimation>,
    panel: Option<PanelOffset>,
}

impl CameraController {
    /// Creates a controller resting on the map center at the default zoom.
    pub fn new(constraints: ViewportConstraints, settings: CameraSettings) -> Self {
        let settings = settings.normalized();
        let mut controller = Self {
            camera: CameraState::new(constraints.map_bounds.center(), settings.default_zoom),
            constraints,
            settings,
            animation: None,
            panel: None,
        };
        controller.clamp_to_bounds();
        controller
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn position(&self) -> Vec2 {
        self.camera.position
    }

    pub fn zoom(&self) -> f32 {
        self.camera.zoom
    }

    pub fn constraints(&self) -> &ViewportConstraints {
        &self.constraints
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn animation(&self) -> Option<&CameraAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_panel_pinned(&self) -> bool {
        self.constraints.panel_pinned
    }

    /// Resting view: map center at the default zoom.
    pub fn default_view(&self) -> CameraState {
        CameraState::new(
            self.constraints.map_bounds.center(),
            self.clamp_zoom(self.settings.default_zoom),
        )
    }

    /// Combined view-projection matrix for the renderer.
    pub fn view_projection(&self) -> Mat4 {
        self.constraints.view_projection(&self.camera)
    }

    /// World rectangle currently on screen.
    pub fn visible_rect(&self) -> BoundingBox {
        self.constraints.visible_rect(&self.camera)
    }

    /// Converts a viewport point to world coordinates.
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        self.constraints.unproject(&self.camera, screen)
    }

    /// Converts a world point to viewport coordinates.
    pub fn project(&self, world: Vec2) -> Vec2 {
        self.constraints.project(&self.camera, world)
    }

    fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.camera.zoom;
        }
        zoom.clamp(self.settings.min_zoom, self.settings.max_zoom)
    }

    /// Sets zoom, saturating into the allowed range, then re-clamps.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.camera.zoom = self.clamp_zoom(zoom);
        self.clamp_to_bounds();
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.camera.zoom - self.settings.zoom_step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.camera.zoom + self.settings.zoom_step);
    }

    /// Changes zoom by `zoom_delta` while keeping the world point under
    /// `screen` fixed on screen.
    pub fn zoom_at_point(&mut self, screen: Vec2, zoom_delta: f32) {
        let before = self.unproject(screen);
        self.camera.zoom = self.clamp_zoom(self.camera.zoom + zoom_delta);
        let after = self.unproject(screen);

        self.camera.position += before - after;
        self.clamp_to_bounds();
    }

    /// Scroll-wheel zoom around the cursor, `amount` in scroll units.
    pub fn scroll(&mut self, cursor: Vec2, amount: f32) {
        self.zoom_at_point(cursor, amount * self.settings.zoom_step);
    }

    /// Pans so the world point under `from` ends up under `to`.
    pub fn pan_by_screen(&mut self, from: Vec2, to: Vec2) {
        let delta = self.unproject(from) - self.unproject(to);
        self.camera.position += delta;
        self.clamp_to_bounds();
    }

    /// Keeps the visible rectangle on the map. Skipped while pinned.
    pub fn clamp_to_bounds(&mut self) {
        self.constraints.clamp(&mut self.camera);
    }

    /// Animation targets are always clamped as if unpinned, so they stay
    /// valid once the panel closes.
    fn clamped_target(&self, position: Vec2, zoom: f32) -> CameraState {
        let mut target = CameraState::new(position, self.clamp_zoom(zoom));
        let mut constraints = self.constraints;
        constraints.panel_pinned = false;
        constraints.clamp(&mut target);
        target
    }

    /// Camera as it would be with the panel closed.
    fn resting_camera(&self) -> CameraState {
        match self.panel {
            Some(offset) => CameraState::new(
                self.camera.position - Vec2::new(offset.shift, 0.0),
                offset.original_zoom,
            ),
            None => self.camera,
        }
    }

    /// Shows `base` with the panel offset applied and records that offset.
    fn apply_panel_offset(&mut self, base: CameraState) {
        let shift = self.constraints.panel_width * self.settings.panel_shift_fraction * base.zoom;
        self.panel = Some(PanelOffset {
            original_zoom: base.zoom,
            shift,
        });
        self.camera.position = base.position + Vec2::new(shift, 0.0);
        self.camera.zoom = self.clamp_zoom(base.zoom + self.settings.panel_zoom_out);
    }

    /// Starts a transition focusing `region`.
    ///
    /// From an unfocused view this is one leg zooming in from the current
    /// zoom. When another region is already focused the camera first eases
    /// out to the default view and then in to the new region.
    pub fn focus_on_region(&mut self, region: &Region, currently_focused: bool) {
        let start = self.resting_camera();
        let centroid = region.centroid();
        let duration = self.settings.animation_duration;

        let waypoints = if currently_focused {
            let default = self.default_view();
            let intermediate = self.clamped_target(default.position, default.zoom);
            let target = self.clamped_target(
                centroid,
                self.settings.default_zoom - self.settings.region_zoom_in,
            );
            vec![
                Waypoint::new(intermediate, duration),
                Waypoint::new(target, duration),
            ]
        } else {
            let target =
                self.clamped_target(centroid, start.zoom - self.settings.region_zoom_in);
            vec![Waypoint::new(target, duration)]
        };

        log::debug!(
            "Focusing region {} ({} leg animation)",
            region.id(),
            waypoints.len()
        );
        self.animation = CameraAnimation::new(start, waypoints);
    }

    /// Starts a transition back to the default view.
    pub fn unfocus(&mut self) {
        let default = self.default_view();
        let target = self.clamped_target(default.position, default.zoom);
        log::debug!("Returning camera to default view");
        self.animation = Some(CameraAnimation::single(
            self.resting_camera(),
            target,
            self.settings.animation_duration,
        ));
    }

    /// Drops any running animation, leaving the camera where it is.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Advances the active animation. Returns `true` if an animation
    /// finished during this tick.
    ///
    /// While the panel is pinned the animated view gets the panel offset on
    /// top, so the camera comes to rest shifted and zoomed out, and closing
    /// the panel lands on the animation target.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let state = animation.advance(delta_time);
        let finished = animation.is_finished();
        let base = CameraState::new(state.position, self.clamp_zoom(state.zoom));

        if self.panel.is_some() {
            self.apply_panel_offset(base);
        } else {
            self.camera = base;
            self.clamp_to_bounds();
        }

        if finished {
            log::debug!("Camera animation finished at {:?}", self.camera);
            self.animation = None;
        }
        finished
    }

    /// Pins or unpins the side panel.
    ///
    /// Opening shifts the camera by a fraction of the panel width (in world
    /// units at the current zoom), zooms out and disables clamping. Closing
    /// undoes the recorded shift, restores the recorded zoom and clamps
    /// again. An animation ticking while pinned re-records both, so closing
    /// after it settles returns to its target. Repeated calls with the same
    /// state do nothing.
    pub fn set_panel_pinned(&mut self, open: bool) {
        match (open, self.panel) {
            (true, None) => {
                let base = self.camera;
                self.apply_panel_offset(base);
                self.constraints.panel_pinned = true;
            }
            (false, Some(_)) => {
                let rest = self.resting_camera();
                self.camera.position = rest.position;
                self.camera.zoom = self.clamp_zoom(rest.zoom);
                self.panel = None;
                self.constraints.panel_pinned = false;
                self.clamp_to_bounds();
            }
            _ => {}
        }
    }

    /// Unpins the panel and snaps back to the default view.
    pub fn reset(&mut self) {
        self.animation = None;
        self.panel = None;
        self.constraints.panel_pinned = false;
        self.camera = self.default_view();
        self.clamp_to_bounds();
    }

    /// Updates the viewport size and panel width, then re-clamps.
    pub fn on_resize(&mut self, world_width: f32, world_height: f32, panel_width: f32) {
        if world_width > 0.0 && world_height > 0.0 {
            self.constraints.world_width = world_width;
            self.constraints.world_height = world_height;
        }
        self.constraints.panel_width = panel_width.max(0.0);
        self.clamp_to_bounds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        let constraints =
            ViewportConstraints::new(BoundingBox::new(50.0, 750.0, 50.0, 550.0), 800.0, 600.0);
        CameraController::new(constraints, CameraSettings::default())
    }

    fn square(id: &str, x: f32, y: f32, size: f32) -> Region {
        Region::new(
            id,
            &[
                Vec2::new(x, y),
                Vec2::new(x + size, y),
                Vec2::new(x + size, y + size),
                Vec2::new(x, y + size),
            ],
        )
        .unwrap()
    }

    fn run_to_end(c: &mut CameraController) {
        for _ in 0..200 {
            c.tick(1.0 / 60.0);
            if !c.is_animating() {
                break;
            }
        }
    }

    #[test]
    fn test_set_zoom_saturates() {
        let mut c = controller();
        c.set_zoom(10.0);
        assert_eq!(c.zoom(), 3.0);
        c.set_zoom(-5.0);
        assert_eq!(c.zoom(), 0.1);
        c.set_zoom(f32::NAN);
        assert_eq!(c.zoom(), 0.1);
    }

    #[test]
    fn test_zoom_steps() {
        let mut c = controller();
        c.zoom_in();
        assert!((c.zoom() - 0.9).abs() < 1e-6);
        c.zoom_out();
        c.zoom_out();
        assert!((c.zoom() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_containment_after_zoom() {
        let mut c = controller();
        c.set_zoom(0.5);
        c.pan_by_screen(Vec2::new(400.0, 300.0), Vec2::new(2000.0, -2000.0));

        let visible = c.constraints().visible_size(c.zoom());
        let b = c.constraints().map_bounds;
        let p = c.position();
        assert!(p.x >= b.min_x + visible.x / 2.0 - 1e-3);
        assert!(p.x <= b.max_x - visible.x / 2.0 + 1e-3);
        assert!(p.y >= b.min_y + visible.y / 2.0 - 1e-3);
        assert!(p.y <= b.max_y - visible.y / 2.0 + 1e-3);
    }

    #[test]
    fn test_zoom_at_point_keeps_cursor_fixed() {
        let mut c = controller();
        c.set_zoom(0.5);
        let cursor = Vec2::new(420.0, 310.0);
        let before = c.unproject(cursor);
        c.zoom_at_point(cursor, -0.2);
        let after = c.unproject(cursor);
        assert!((c.zoom() - 0.3).abs() < 1e-6);
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn test_focus_single_leg_ends_on_centroid() {
        let mut c = controller();
        let region = square("r", 300.0, 250.0, 100.0);
        c.focus_on_region(&region, false);
        assert_eq!(c.animation().unwrap().waypoints().len(), 1);

        run_to_end(&mut c);
        assert!(!c.is_animating());
        assert!((c.zoom() - 0.72).abs() < 1e-5);
        assert!((c.position() - Vec2::new(350.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_switching_regions_goes_through_default_view() {
        let mut c = controller();
        c.focus_on_region(&square("a", 100.0, 100.0, 50.0), false);
        run_to_end(&mut c);

        c.focus_on_region(&square("b", 410.0, 270.0, 40.0), true);
        let anim = c.animation().unwrap();
        assert_eq!(anim.waypoints().len(), 2);
        assert_eq!(anim.waypoints()[0].target.zoom, 1.0);
        assert_eq!(anim.waypoints()[0].target.position, Vec2::new(400.0, 300.0));

        run_to_end(&mut c);
        assert!((c.zoom() - 0.72).abs() < 1e-5);
        assert!((c.position() - Vec2::new(430.0, 290.0)).length() < 1e-3);
    }

    #[test]
    fn test_focus_targets_are_clamped() {
        let mut c = controller();
        // Region hugging the map corner: centroid cannot be centered
        c.focus_on_region(&square("corner", 50.0, 50.0, 20.0), false);
        run_to_end(&mut c);
        let rect = c.visible_rect();
        let b = c.constraints().map_bounds;
        assert!(rect.min_x >= b.min_x - 1e-3);
        assert!(rect.min_y >= b.min_y - 1e-3);
    }

    #[test]
    fn test_unfocus_returns_to_default() {
        let mut c = controller();
        c.focus_on_region(&square("r", 300.0, 250.0, 100.0), false);
        run_to_end(&mut c);
        c.unfocus();
        run_to_end(&mut c);
        assert_eq!(c.zoom(), 1.0);
        assert_eq!(c.position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_animation_terminates_without_overshoot() {
        let mut c = controller();
        c.focus_on_region(&square("r", 300.0, 250.0, 100.0), false);
        assert!(!c.tick(0.4));
        assert!(c.tick(0.4));
        assert!(!c.is_animating());
        assert!(!c.tick(0.4));
    }

    #[test]
    fn test_new_focus_replaces_running_animation() {
        let mut c = controller();
        c.focus_on_region(&square("a", 100.0, 100.0, 50.0), false);
        c.tick(0.1);
        c.unfocus();
        assert_eq!(c.animation().unwrap().waypoints().len(), 1);
        assert_eq!(c.animation().unwrap().final_target(), c.default_view());
    }

    #[test]
    fn test_panel_pin_round_trip() {
        let mut c = controller();
        c.on_resize(800.0, 600.0, 264.0);
        c.set_zoom(0.5);
        let start = *c.camera();

        c.set_panel_pinned(true);
        assert!(c.is_panel_pinned());
        assert!((c.zoom() - 0.9).abs() < 1e-6);
        assert!((c.position().x - (start.position.x + 264.0 * 0.47 * 0.5)).abs() < 1e-3);

        // Pinning again is a no-op
        let pinned = *c.camera();
        c.set_panel_pinned(true);
        assert_eq!(*c.camera(), pinned);

        c.set_panel_pinned(false);
        assert!(!c.is_panel_pinned());
        assert_eq!(c.zoom(), 0.5);
        assert!((c.position() - start.position).length() < 1e-3);
    }

    #[test]
    fn test_panel_zoom_out_saturates() {
        let mut c = controller();
        c.set_zoom(2.9);
        c.set_panel_pinned(true);
        assert_eq!(c.zoom(), 3.0);
    }

    #[test]
    fn test_reset_restores_default_view() {
        let mut c = controller();
        c.on_resize(800.0, 600.0, 264.0);
        c.set_zoom(0.4);
        c.set_panel_pinned(true);
        c.reset();
        assert!(!c.is_panel_pinned());
        assert_eq!(*c.camera(), c.default_view());
    }

    #[test]
    fn test_panel_pinned_mid_focus_keeps_focused_view() {
        let mut c = controller();
        c.on_resize(800.0, 600.0, 264.0);
        c.focus_on_region(&square("r", 300.0, 250.0, 100.0), false);
        c.tick(0.1);
        c.set_panel_pinned(true);
        run_to_end(&mut c);

        // Rests on the focused view with the panel offset on top
        let shift = 264.0 * 0.47 * 0.72;
        assert!((c.zoom() - 1.12).abs() < 1e-5);
        assert!((c.position() - Vec2::new(350.0 + shift, 300.0)).length() < 1e-3);

        c.set_panel_pinned(false);
        assert!((c.zoom() - 0.72).abs() < 1e-5);
        assert!((c.position() - Vec2::new(350.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_focus_while_pinned_starts_from_resting_view() {
        let mut c = controller();
        c.on_resize(800.0, 600.0, 264.0);
        c.set_panel_pinned(true);
        c.focus_on_region(&square("r", 300.0, 250.0, 100.0), false);

        let anim = c.animation().unwrap();
        assert!((anim.final_target().zoom - 0.72).abs() < 1e-5);

        // First frame shows the unchanged pinned view
        let pinned = *c.camera();
        c.tick(0.0);
        assert!((c.position() - pinned.position).length() < 1e-3);
        assert!((c.zoom() - pinned.zoom).abs() < 1e-5);

        run_to_end(&mut c);
        c.set_panel_pinned(false);
        assert!((c.zoom() - 0.72).abs() < 1e-5);
        assert!((c.position() - Vec2::new(350.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_inverted_zoom_range_falls_back_to_defaults() {
        let constraints =
            ViewportConstraints::new(BoundingBox::new(50.0, 750.0, 50.0, 550.0), 800.0, 600.0);
        let settings = CameraSettings {
            min_zoom: 4.0,
            max_zoom: 1.0,
            ..CameraSettings::default()
        };
        let mut c = CameraController::new(constraints, settings);
        assert_eq!(c.settings().min_zoom, 0.1);
        assert_eq!(c.settings().max_zoom, 3.0);
        assert_eq!(c.zoom(), 1.0);
        c.set_zoom(10.0);
        assert_eq!(c.zoom(), 3.0);
    }

    #[test]
    fn test_nan_zoom_settings_fall_back_to_defaults() {
        let settings = CameraSettings {
            min_zoom: f32::NAN,
            default_zoom: f32::NAN,
            ..CameraSettings::default()
        }
        .normalized();
        assert_eq!(settings.min_zoom, 0.1);
        assert_eq!(settings.max_zoom, 3.0);
        assert_eq!(settings.default_zoom, 1.0);
    }

    #[test]
    fn test_resize_reclamps_camera() {
        let mut c = controller();
        c.on_resize(400.0, 300.0, 0.0);
        assert_eq!(c.constraints().visible_size(1.0), Vec2::new(400.0, 300.0));

        // Smaller viewport leaves room to pan up to the map edge
        c.pan_by_screen(Vec2::new(0.0, 150.0), Vec2::new(-2000.0, 150.0));
        assert!((c.position().x - 550.0).abs() < 1e-3);

        // Growing past the map recenters on it
        c.on_resize(1600.0, 1200.0, 0.0);
        assert_eq!(c.position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_resize_ignores_empty_size_and_saturates_panel_width() {
        let mut c = controller();
        c.on_resize(0.0, -10.0, 264.0);
        assert_eq!(c.constraints().world_width, 800.0);
        assert_eq!(c.constraints().world_height, 600.0);
        assert_eq!(c.constraints().panel_width, 264.0);

        c.on_resize(1024.0, 768.0, -5.0);
        assert_eq!(c.constraints().world_width, 1024.0);
        assert_eq!(c.constraints().world_height, 768.0);
        assert_eq!(c.constraints().panel_width, 0.0);
    }
}
