//! Map state.
//!
//! [`RegionMap`] is the root: it owns the loaded regions and every piece of
//! per-frame state built on them. Selection is kept separate so it can be
//! driven and tested without a camera.

mod map;
mod selection;

pub use map::{RegionDraw, RegionMap};
pub use selection::{RegionStyle, SelectionChange, SelectionState};
