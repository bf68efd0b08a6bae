//! Region geometry in projected plane coordinates.

use glam::Vec2;

/// Axis-aligned bounding box in projected plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Creates a box from explicit extents.
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Tight box around a set of points, or `None` if there are none.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::new(first.x, first.x, first.y, first.y);
        for p in &points[1..] {
            bbox.expand_to(*p);
        }
        Some(bbox)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn expand_to(&mut self, p: Vec2) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Checks if two boxes overlap (touching edges count).
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(other.max_x < self.min_x
            || other.min_x > self.max_x
            || other.max_y < self.min_y
            || other.min_y > self.max_y)
    }
}

/// One administrative area: an identifier and a single closed outer ring.
///
/// Regions are immutable once built. The bounding box is derived from the
/// vertices in the constructor and cannot drift from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: String,
    /// Flattened `x0, y0, x1, y1, ...` ring, without a closing duplicate.
    vertices: Vec<f32>,
    bounding_box: BoundingBox,
}

impl Region {
    /// Builds a region from ring points.
    ///
    /// Returns `None` for an empty ring. Rings with fewer than three points
    /// are accepted here; they simply never contain anything and triangulate
    /// to nothing.
    pub fn new(id: impl Into<String>, points: &[Vec2]) -> Option<Self> {
        let bounding_box = BoundingBox::from_points(points)?;
        let vertices = points.iter().flat_map(|p| [p.x, p.y]).collect();
        Some(Self {
            id: id.into(),
            vertices,
            bounding_box,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Flattened `x, y` vertex pairs.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Iterates the ring points in order.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
    }

    /// Border ring for outline drawing, closed back onto its first point.
    pub fn border_ring(&self) -> Vec<Vec2> {
        let mut ring: Vec<Vec2> = self.points().collect();
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }

    /// Arithmetic mean of the ring vertices.
    ///
    /// This is the camera focus point, not the area centroid.
    pub fn centroid(&self) -> Vec2 {
        let count = self.vertex_count();
        if count == 0 {
            return Vec2::ZERO;
        }
        let sum = self.points().fold(Vec2::ZERO, |acc, p| acc + p);
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Region {
        Region::new(
            "sq",
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_bounding_box_is_tight() {
        let region = Region::new(
            "tri",
            &[
                Vec2::new(-3.0, 2.0),
                Vec2::new(5.0, -1.0),
                Vec2::new(1.0, 7.5),
            ],
        )
        .unwrap();
        let bbox = region.bounding_box();
        assert_eq!(*bbox, BoundingBox::new(-3.0, 5.0, -1.0, 7.5));
    }

    #[test]
    fn test_empty_ring_is_rejected() {
        assert!(Region::new("none", &[]).is_none());
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let c = square().centroid();
        assert!((c.x - 5.0).abs() < 1e-6);
        assert!((c.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_border_ring_is_closed() {
        let ring = square().border_ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_union_and_intersects() {
        let a = BoundingBox::new(0.0, 2.0, 0.0, 2.0);
        let b = BoundingBox::new(3.0, 4.0, -1.0, 1.0);
        assert!(!a.intersects(&b));
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(0.0, 4.0, -1.0, 2.0));
        assert!(u.intersects(&b));
        assert_eq!(u.center(), Vec2::new(2.0, 0.5));
    }
}
