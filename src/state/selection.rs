//! Hover and selection state over the region list.
//!
//! Regions are referred to by their index in the loaded list and compared by
//! value, never by identity.

use crate::geo::{region_at, Region};
use glam::Vec2;

/// What an activation did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing under the pointer; selection unchanged.
    None,
    /// `index` became selected. `previous` was selected before, if any.
    Selected {
        index: usize,
        previous: Option<usize>,
    },
    /// The selected region was activated again and is now deselected.
    Deselected { index: usize },
}

/// How a region should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    Normal,
    Hovered,
    Selected,
}

/// Hover and selection, tracked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    hovered: Option<usize>,
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Recomputes hover from a world-space pointer position.
    ///
    /// The first region in list order containing the point wins.
    pub fn update_hover(&mut self, regions: &[Region], world_point: Option<Vec2>) -> Option<usize> {
        self.hovered = world_point.and_then(|p| region_at(regions, p));
        self.hovered
    }

    /// Handles a click or tap on the hovered region.
    pub fn activate(&mut self) -> SelectionChange {
        let Some(hovered) = self.hovered else {
            return SelectionChange::None;
        };

        if self.selected == Some(hovered) {
            self.selected = None;
            SelectionChange::Deselected { index: hovered }
        } else {
            let previous = self.selected.replace(hovered);
            SelectionChange::Selected {
                index: hovered,
                previous,
            }
        }
    }

    /// Clears the selection without emitting a change.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Draw style for region `index`. Selection wins over hover.
    pub fn style(&self, index: usize) -> RegionStyle {
        if self.selected == Some(index) {
            RegionStyle::Selected
        } else if self.hovered == Some(index) {
            RegionStyle::Hovered
        } else {
            RegionStyle::Normal
        }
    }
}
