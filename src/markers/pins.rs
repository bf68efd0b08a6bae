//! Pin animations and pin picking.

use crate::camera::{ease_out_cubic, ease_out_quad};
use crate::config::MapConfig;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pin size and animation constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinSettings {
    pub width: f32,
    pub height: f32,
    pub drop_distance: f32,
    pub drop_duration: f32,
    pub drop_max_delay: f32,
    pub fade_speed: f32,
}

impl From<&MapConfig> for PinSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            width: config.pin_width,
            height: config.pin_height,
            drop_distance: config.pin_drop_distance,
            drop_duration: config.pin_drop_duration,
            drop_max_delay: config.pin_drop_max_delay,
            fade_speed: config.pin_fade_speed,
        }
    }
}

impl Default for PinSettings {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

impl PinSettings {
    /// Radius within which a click picks a pin.
    pub fn pick_radius(&self) -> f32 {
        (self.width * 0.5).max(self.height * 0.5) * 1.5
    }
}

/// Scale of a pin at the start of its animation.
const START_SCALE: f32 = 0.3;

/// A regional pin flying in to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct PinDrop {
    pub target: Vec2,
    pub start: Vec2,
    pub current: Vec2,
    pub scale: f32,
    delay: f32,
    progress: f32,
}

impl PinDrop {
    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    /// Pin already resting on its target.
    pub fn settled(target: Vec2) -> Self {
        Self {
            target,
            start: target,
            current: target,
            scale: 1.0,
            delay: 0.0,
            progress: 1.0,
        }
    }

    fn update(&mut self, delta_time: f32, duration: f32) {
        if !self.is_animating() {
            return;
        }
        if self.delay > 0.0 {
            self.delay -= delta_time;
            return;
        }

        self.progress = (self.progress + delta_time / duration).min(1.0);
        if self.progress >= 1.0 {
            self.current = self.target;
            self.scale = 1.0;
            return;
        }

        let t = ease_out_cubic(self.progress);
        self.current = self.start + (self.target - self.start) * t;
        self.scale = START_SCALE + (1.0 - START_SCALE) * t;
    }
}

/// A set of regional pins dropping in from around the map.
///
/// Pins alternate between arriving from above, the right, below and the
/// left, each after a random delay drawn from a seeded generator.
#[derive(Debug, Clone)]
pub struct PinDropSet {
    pins: Vec<PinDrop>,
    duration: f32,
}

impl PinDropSet {
    pub fn new(targets: &[Vec2], settings: &PinSettings, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let d = settings.drop_distance;
        let offsets = [
            Vec2::new(0.0, d),
            Vec2::new(d, 0.0),
            Vec2::new(0.0, -d),
            Vec2::new(-d, 0.0),
        ];

        let pins = targets
            .iter()
            .enumerate()
            .map(|(i, &target)| {
                let start = target + offsets[i % 4];
                PinDrop {
                    target,
                    start,
                    current: start,
                    scale: START_SCALE,
                    delay: rng.random::<f32>() * settings.drop_max_delay,
                    progress: 0.0,
                }
            })
            .collect();

        Self {
            pins,
            duration: settings.drop_duration,
        }
    }

    /// Pins placed directly on their targets, with no animation.
    pub fn settled(targets: &[Vec2], settings: &PinSettings) -> Self {
        Self {
            pins: targets.iter().map(|&t| PinDrop::settled(t)).collect(),
            duration: settings.drop_duration,
        }
    }

    pub fn update(&mut self, delta_time: f32) {
        for pin in &mut self.pins {
            pin.update(delta_time, self.duration);
        }
    }

    pub fn pins(&self) -> &[PinDrop] {
        &self.pins
    }

    pub fn is_animating(&self) -> bool {
        self.pins.iter().any(PinDrop::is_animating)
    }
}

/// A news pin fading in at its placed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PinFade {
    pub entity_id: String,
    pub position: Vec2,
    pub alpha: f32,
    pub scale: f32,
    fade: f32,
}

impl PinFade {
    pub fn new(entity_id: impl Into<String>, position: Vec2) -> Self {
        Self {
            entity_id: entity_id.into(),
            position,
            alpha: 0.0,
            scale: START_SCALE,
            fade: 0.0,
        }
    }

    /// Pin shown immediately at full size.
    pub fn visible(entity_id: impl Into<String>, position: Vec2) -> Self {
        Self {
            alpha: 1.0,
            scale: 1.0,
            fade: 1.0,
            ..Self::new(entity_id, position)
        }
    }

    pub fn update(&mut self, delta_time: f32, fade_speed: f32) {
        if self.fade >= 1.0 {
            return;
        }
        self.fade = (self.fade + delta_time.max(0.0) * fade_speed).min(1.0);
        let t = ease_out_quad(self.fade);
        self.alpha = t;
        self.scale = START_SCALE + (1.0 - START_SCALE) * t;
    }
}

/// First pin, in order, whose position is within the pick radius of `point`.
pub fn pin_at<'a>(pins: &'a [PinFade], point: Vec2, settings: &PinSettings) -> Option<&'a PinFade> {
    let radius = settings.pick_radius();
    pins.iter()
        .find(|pin| pin.position.distance_squared(point) <= radius * radius)
}
