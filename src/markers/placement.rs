//! Deterministic marker placement inside regions.
//!
//! An entity shown inside a region gets a stable, pseudo-random spot: the
//! sampler is seeded from a hash of the (entity, region) pair, so the same
//! pair always lands on the same point, across frames and across sessions.
//! The generator is ChaCha8, whose output stream is fixed for a given seed.

use crate::geo::{contains, Region};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Cache key: which entity, in which region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    pub entity_id: String,
    pub region_id: String,
}

impl PlacementKey {
    pub fn new(entity_id: impl Into<String>, region_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            region_id: region_id.into(),
        }
    }

    /// 32-byte RNG seed for this key.
    ///
    /// Both ids are length-prefixed so no choice of characters inside them
    /// can make two different keys hash alike.
    pub fn seed(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for part in [&self.entity_id, &self.region_id] {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        *hasher.finalize().as_bytes()
    }
}

/// Result of sampling a point in a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: Vec2,
    /// `false` when sampling gave up and fell back to the box center, which
    /// may lie outside the polygon.
    pub inside: bool,
}

/// Rejection-samples a point inside `region` from a seeded generator.
///
/// Draws uniform points in the bounding box until one passes the hit test,
/// up to `max_attempts`; then falls back to the bounding box center.
pub fn sample_point_in_region(region: &Region, seed: [u8; 32], max_attempts: u32) -> Placement {
    let mut rng = ChaCha8Rng::from_seed(seed);
    let bbox = region.bounding_box();

    for _ in 0..max_attempts {
        let x = bbox.min_x + rng.random::<f32>() * bbox.width();
        let y = bbox.min_y + rng.random::<f32>() * bbox.height();
        let point = Vec2::new(x, y);
        if contains(region, point) {
            return Placement {
                point,
                inside: true,
            };
        }
    }

    Placement {
        point: bbox.center(),
        inside: false,
    }
}

/// Lazily filled cache of marker positions.
///
/// Entries are never evicted, so the cache grows with the number of distinct
/// (entity, region) pairs seen in a session. Not synchronized: keep it on
/// one thread or behind a lock.
#[derive(Debug, Clone)]
pub struct MarkerPlacementCache {
    entries: HashMap<PlacementKey, Vec2>,
    max_attempts: u32,
}

impl MarkerPlacementCache {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            entries: HashMap::new(),
            max_attempts,
        }
    }

    /// Returns the stable position of `entity_id` inside `region`.
    pub fn place(&mut self, region: &Region, entity_id: &str) -> Vec2 {
        let key = PlacementKey::new(entity_id, region.id());
        if let Some(point) = self.entries.get(&key) {
            return *point;
        }

        let placement = sample_point_in_region(region, key.seed(), self.max_attempts);
        if !placement.inside {
            log::debug!(
                "Placement sampling exhausted for {} in {}, using box center",
                key.entity_id,
                key.region_id
            );
        }
        self.entries.insert(key, placement.point);
        placement.point
    }

    /// Cached position, without sampling.
    pub fn get(&self, region_id: &str, entity_id: &str) -> Option<Vec2> {
        self.entries
            .get(&PlacementKey::new(entity_id, region_id))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MarkerPlacementCache {
    fn default() -> Self {
        Self::new(crate::config::MapConfig::default().max_placement_attempts)
    }
}
