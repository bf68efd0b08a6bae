//! Linear projection from geographic coordinates to the map plane.
//!
//! The whole dataset shares one projection, derived once from the bounding
//! box of every loaded feature so that the longest side spans a configured
//! number of world units.

use geo_types::Coord;
use glam::Vec2;

/// Geographic extent of a dataset, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Starts a box at a single coordinate.
    pub fn at(coord: Coord<f64>) -> Self {
        Self {
            min_lon: coord.x,
            max_lon: coord.x,
            min_lat: coord.y,
            max_lat: coord.y,
        }
    }

    /// Grows the box to include `coord`.
    pub fn include(&mut self, coord: Coord<f64>) {
        self.min_lon = self.min_lon.min(coord.x);
        self.max_lon = self.max_lon.max(coord.x);
        self.min_lat = self.min_lat.min(coord.y);
        self.max_lat = self.max_lat.max(coord.y);
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Midpoint as a (lon, lat) coordinate.
    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.min_lon + self.max_lon) / 2.0,
            y: (self.min_lat + self.max_lat) / 2.0,
        }
    }
}

/// Parameters of the map projection, fixed after load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    /// World units per degree.
    pub scale: f32,
    /// Longitude projected onto `origin.x`.
    pub center_lon: f32,
    /// Latitude projected onto `origin.y`.
    pub center_lat: f32,
    /// World-space position of the projection center (half the world).
    pub origin: Vec2,
}

impl ProjectionParameters {
    pub fn new(scale: f32, center_lon: f32, center_lat: f32, origin: Vec2) -> Self {
        Self {
            scale,
            center_lon,
            center_lat,
            origin,
        }
    }

    /// Derives parameters so the longest side of `bounds` spans `target_span`.
    ///
    /// A dataset that collapses to a point has no span to fit, so it gets
    /// `fallback_scale` instead.
    pub fn from_bounds(
        bounds: &GeoBounds,
        target_span: f32,
        fallback_scale: f32,
        origin: Vec2,
    ) -> Self {
        let span = bounds.lon_span().max(bounds.lat_span());
        let scale = if span > 0.0 && span.is_finite() {
            (target_span as f64 / span) as f32
        } else {
            fallback_scale
        };
        let center = bounds.center();

        Self {
            scale,
            center_lon: center.x as f32,
            center_lat: center.y as f32,
            origin,
        }
    }

    /// Projects a latitude/longitude pair to world coordinates.
    pub fn project(&self, lat: f32, lon: f32) -> Vec2 {
        Vec2::new(
            (lon - self.center_lon) * self.scale + self.origin.x,
            (lat - self.center_lat) * self.scale + self.origin.y,
        )
    }

    /// Projects a GeoJSON-ordered (lon, lat) coordinate.
    pub fn project_coord(&self, coord: Coord<f64>) -> Vec2 {
        self.project(coord.y as f32, coord.x as f32)
    }

    /// Inverse of [`project`](Self::project), returned as (lon, lat).
    pub fn unproject(&self, point: Vec2) -> Coord<f64> {
        Coord {
            x: ((point.x - self.origin.x) / self.scale + self.center_lon) as f64,
            y: ((point.y - self.origin.y) / self.scale + self.center_lat) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_literal() {
        let params = ProjectionParameters::new(1.0, 0.0, 0.0, Vec2::new(400.0, 300.0));
        assert_eq!(params.project(10.0, 20.0), Vec2::new(420.0, 310.0));
    }

    #[test]
    fn test_scale_fits_longest_side() {
        let mut bounds = GeoBounds::at(Coord { x: 13.0, y: 45.0 });
        bounds.include(Coord { x: 16.5, y: 47.0 });

        let params = ProjectionParameters::from_bounds(&bounds, 700.0, 1.0, Vec2::ZERO);
        assert!((params.scale - 200.0).abs() < 1e-3);
        assert!((params.center_lon - 14.75).abs() < 1e-5);
        assert!((params.center_lat - 46.0).abs() < 1e-5);

        let a = params.project(45.0, 13.0);
        let b = params.project(47.0, 16.5);
        assert!((b.x - a.x) <= 700.0 + 1e-2);
        assert!((b.y - a.y) <= 700.0 + 1e-2);
    }

    #[test]
    fn test_single_point_uses_fallback_scale() {
        let bounds = GeoBounds::at(Coord { x: 14.5, y: 46.0 });
        let params = ProjectionParameters::from_bounds(&bounds, 700.0, 2.5, Vec2::ZERO);
        assert_eq!(params.scale, 2.5);
        assert_eq!(params.project(46.0, 14.5), Vec2::ZERO);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let params = ProjectionParameters::new(180.0, 14.8, 46.1, Vec2::new(400.0, 300.0));
        let p = params.project(46.5, 15.2);
        let back = params.unproject(p);
        assert!((back.x - 15.2).abs() < 1e-4);
        assert!((back.y - 46.5).abs() < 1e-4);
    }
}
