//! Press-drag-release tracking for panning.

use glam::Vec2;

/// What a pointer movement should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    /// Below the threshold, or no press in progress.
    None,
    /// Pan so that `from` moves to `to`.
    Pan { from: Vec2, to: Vec2 },
}

/// Tracks one pointer gesture.
///
/// Movement under the threshold is ignored so that a slightly shaky click
/// still counts as a click. Once the threshold is crossed the rest of the
/// gesture pans.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    threshold: f32,
    last: Option<Vec2>,
    panning: bool,
}

impl DragTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last: None,
            panning: false,
        }
    }

    /// Starts a gesture at `screen`.
    pub fn press(&mut self, screen: Vec2) {
        self.last = Some(screen);
        self.panning = false;
    }

    /// Pointer moved to `screen` while pressed.
    pub fn drag(&mut self, screen: Vec2) -> DragAction {
        let Some(last) = self.last else {
            return DragAction::None;
        };

        if self.panning || last.distance(screen) > self.threshold {
            self.panning = true;
            self.last = Some(screen);
            return DragAction::Pan {
                from: last,
                to: screen,
            };
        }
        DragAction::None
    }

    /// Ends the gesture. Returns `true` if it was a pan rather than a click.
    pub fn release(&mut self) -> bool {
        let was_panning = self.panning;
        self.last = None;
        self.panning = false;
        was_panning
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }
}
