//! Map engine configuration.
//!
//! Every tunable constant of the region map lives here. Configuration can be
//! loaded from JSON; missing fields take their defaults and malformed
//! documents fall back to [`MapConfig::default`].

use serde::{Deserialize, Serialize};

/// Tunable constants for projection, camera behavior and marker placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Width of the fixed world viewport, in world units.
    pub world_width: f32,
    /// Height of the fixed world viewport, in world units.
    pub world_height: f32,
    /// Projected size of the longest side of the dataset's bounding box.
    pub target_span: f32,
    /// Scale used when the dataset collapses to a single point.
    pub fallback_scale: f32,

    /// Most zoomed-in camera zoom (smaller shows less of the world).
    pub min_zoom: f32,
    /// Most zoomed-out camera zoom.
    pub max_zoom: f32,
    /// Zoom of the resting, unfocused view.
    pub default_zoom: f32,
    /// Zoom change per button press or per scroll unit.
    pub zoom_step: f32,
    /// How much a region focus zooms in from the starting zoom.
    pub region_zoom_in: f32,
    /// Duration of one camera animation leg, in seconds.
    pub animation_duration: f32,

    /// Extra zoom-out applied while the side panel is pinned open.
    pub panel_zoom_out: f32,
    /// Fraction of the panel width the camera shifts when the panel opens.
    pub panel_shift_fraction: f32,
    /// Fraction of the screen width hosts should give the side panel.
    pub panel_width_fraction: f32,

    /// Pointer travel (screen units) before a press turns into a pan.
    pub drag_threshold: f32,

    /// Rejection-sampling budget for marker placement.
    pub max_placement_attempts: u32,
    /// Feature property holding the region identifier.
    pub region_id_property: String,

    /// Base pin width, in world units.
    pub pin_width: f32,
    /// Base pin height, in world units.
    pub pin_height: f32,
    /// Distance regional pins fly in from.
    pub pin_drop_distance: f32,
    /// Duration of the regional pin fly-in, in seconds.
    pub pin_drop_duration: f32,
    /// Upper bound of the random delay before a pin starts flying in.
    pub pin_drop_max_delay: f32,
    /// Fade-in speed of news pins (fade units per second).
    pub pin_fade_speed: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            target_span: 700.0,
            fallback_scale: 1.0,
            min_zoom: 0.1,
            max_zoom: 3.0,
            default_zoom: 1.0,
            zoom_step: 0.1,
            region_zoom_in: 0.28,
            animation_duration: 0.65,
            panel_zoom_out: 0.4,
            panel_shift_fraction: 0.47,
            panel_width_fraction: 0.33,
            drag_threshold: 5.0,
            max_placement_attempts: 400,
            region_id_property: "SR_ID".to_string(),
            pin_width: 14.0,
            pin_height: 18.0,
            pin_drop_distance: 300.0,
            pin_drop_duration: 1.2,
            pin_drop_max_delay: 0.8,
            pin_fade_speed: 1.5,
        }
    }
}

impl MapConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from JSON, falling back to defaults on error.
    ///
    /// The result is always [validated](Self::validated).
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<MapConfig>(json) {
            Ok(config) => {
                log::info!("Loaded map configuration");
                config.validated()
            }
            Err(e) => {
                log::warn!("Failed to parse map configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Returns a copy with nonsensical values replaced by their defaults.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            log::warn!(
                "Invalid zoom range [{}, {}], using defaults",
                self.min_zoom,
                self.max_zoom
            );
            self.min_zoom = defaults.min_zoom;
            self.max_zoom = defaults.max_zoom;
        }
        if !self.default_zoom.is_finite() {
            log::warn!("Default zoom {} is not finite, using default", self.default_zoom);
            self.default_zoom = defaults.default_zoom;
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            log::warn!("Default zoom {} outside zoom range", self.default_zoom);
            self.default_zoom = self.default_zoom.clamp(self.min_zoom, self.max_zoom);
        }

        repair_positive(&mut self.world_width, defaults.world_width, "world_width");
        repair_positive(&mut self.world_height, defaults.world_height, "world_height");
        repair_positive(&mut self.target_span, defaults.target_span, "target_span");
        repair_positive(
            &mut self.fallback_scale,
            defaults.fallback_scale,
            "fallback_scale",
        );
        repair_positive(
            &mut self.animation_duration,
            defaults.animation_duration,
            "animation_duration",
        );
        repair_positive(
            &mut self.pin_drop_duration,
            defaults.pin_drop_duration,
            "pin_drop_duration",
        );
        repair_positive(
            &mut self.pin_fade_speed,
            defaults.pin_fade_speed,
            "pin_fade_speed",
        );

        if self.max_placement_attempts == 0 {
            log::warn!("max_placement_attempts must be non-zero, using default");
            self.max_placement_attempts = defaults.max_placement_attempts;
        }

        self
    }

    /// Side panel width for a screen `screen_width` units wide.
    ///
    /// Pass the result to `on_resize`.
    pub fn panel_width(&self, screen_width: f32) -> f32 {
        (screen_width * self.panel_width_fraction).max(0.0)
    }

    /// Half of the world viewport: the projection origin.
    pub fn world_origin(&self) -> glam::Vec2 {
        glam::Vec2::new(self.world_width * 0.5, self.world_height * 0.5)
    }
}

fn repair_positive(value: &mut f32, default: f32, name: &str) {
    if !(value.is_finite() && *value > 0.0) {
        log::warn!("{} must be positive (got {}), using {}", name, value, default);
        *value = default;
    }
}
