//! Polygon triangulation for filled region rendering.

use super::Region;

/// Ear-clips a flattened `x, y` ring into triangle indices.
///
/// Every three consecutive indices form one triangle and refer to point
/// pairs, so index `i` addresses `vertices[2 * i]` and `vertices[2 * i + 1]`.
/// Rings with fewer than three points, or that the ear clipper rejects,
/// produce no triangles.
pub fn triangulate(vertices: &[f32]) -> Vec<u32> {
    if vertices.len() < 6 {
        return Vec::new();
    }

    let coords: Vec<f64> = vertices[..vertices.len() / 2 * 2]
        .iter()
        .map(|&v| v as f64)
        .collect();

    match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) => indices.into_iter().map(|i| i as u32).collect(),
        Err(e) => {
            log::warn!("Triangulation failed: {:?}", e);
            Vec::new()
        }
    }
}

/// Render data for one region, computed once at load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionMesh {
    /// Triangle indices into the region's vertex pairs.
    pub indices: Vec<u32>,
}

impl RegionMesh {
    pub fn build(region: &Region) -> Self {
        Self {
            indices: triangulate(region.vertices()),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as vertex triples from `region`.
    pub fn triangles<'a>(
        &'a self,
        region: &'a Region,
    ) -> impl Iterator<Item = [glam::Vec2; 3]> + 'a {
        let verts = region.vertices();
        self.indices.chunks_exact(3).map(move |tri| {
            [tri[0], tri[1], tri[2]].map(|i| {
                let i = i as usize * 2;
                glam::Vec2::new(verts[i], verts[i + 1])
            })
        })
    }
}
