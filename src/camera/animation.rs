//! Eased camera transitions through one or more waypoints.
//!
//! A focus on a region is a single leg from the current view. Switching
//! directly between two regions is two legs: out to the default view, then
//! in to the new region. Each leg eases independently with the cubic
//! in-out curve.

use super::easing::ease_in_out_cubic;
use super::CameraState;

/// One leg of a camera animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Camera state at the end of the leg.
    pub target: CameraState,
    /// Leg duration in seconds.
    pub duration: f32,
}

impl Waypoint {
    pub fn new(target: CameraState, duration: f32) -> Self {
        Self { target, duration }
    }
}

/// Snapshot of where an animation stands, for display or debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    /// Index of the active leg.
    pub leg: usize,
    /// Number of legs in the animation.
    pub legs: usize,
    /// Linear progress through the active leg (0.0 - 1.0).
    pub leg_progress: f32,
}

/// An in-flight camera animation.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimation {
    /// Start of the active leg.
    leg_start: CameraState,
    waypoints: Vec<Waypoint>,
    leg: usize,
    progress: f32,
}

impl CameraAnimation {
    /// Creates an animation from `start` through `waypoints`.
    ///
    /// Returns `None` when there are no waypoints.
    pub fn new(start: CameraState, waypoints: Vec<Waypoint>) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Self {
            leg_start: start,
            waypoints,
            leg: 0,
            progress: 0.0,
        })
    }

    /// Single-leg animation.
    pub fn single(start: CameraState, target: CameraState, duration: f32) -> Self {
        Self {
            leg_start: start,
            waypoints: vec![Waypoint::new(target, duration)],
            leg: 0,
            progress: 0.0,
        }
    }

    /// Final resting state of the animation.
    pub fn final_target(&self) -> CameraState {
        // Never empty: both constructors guarantee at least one waypoint
        self.waypoints[self.waypoints.len() - 1].target
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn progress(&self) -> AnimationProgress {
        AnimationProgress {
            leg: self.leg,
            legs: self.waypoints.len(),
            leg_progress: self.progress,
        }
    }

    /// Whether the last leg has reached its target.
    pub fn is_finished(&self) -> bool {
        self.leg + 1 >= self.waypoints.len() && self.progress >= 1.0
    }

    /// Advances the active leg by `delta_time` seconds and returns the
    /// camera state to show.
    ///
    /// Progress is clamped to exactly 1.0. Time left over when a leg
    /// completes is not carried into the next leg; the next call starts it.
    pub fn advance(&mut self, delta_time: f32) -> CameraState {
        if self.progress >= 1.0 && self.leg + 1 < self.waypoints.len() {
            self.leg_start = self.waypoints[self.leg].target;
            self.leg += 1;
            self.progress = 0.0;
        }

        let waypoint = self.waypoints[self.leg];
        let step = if waypoint.duration > 0.0 {
            delta_time.max(0.0) / waypoint.duration
        } else {
            1.0
        };
        self.progress = (self.progress + step).min(1.0);

        if self.progress >= 1.0 {
            return waypoint.target;
        }
        self.leg_start
            .lerp(&waypoint.target, ease_in_out_cubic(self.progress))
    }
}
