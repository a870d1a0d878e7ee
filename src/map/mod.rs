// src/map/mod.rs
use eframe::egui::{Pos2, Rect};
use thiserror::Error;

use crate::config::RegionId;

pub mod geometry;
pub mod svg;

pub use geometry::FitProjection;
pub use svg::parse_svg;

/// Errors that can occur while fetching or reading the map resource
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch map: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed SVG: {0}")]
    Svg(String),

    #[error("Map loader stopped before delivering a result")]
    LoaderGone,
}

/// One `<path>` of the map, flattened into rings and pre-triangulated.
#[derive(Debug, Clone)]
pub struct RegionShape {
    pub id: RegionId,
    pub rings: Vec<Vec<Pos2>>,
    pub triangles: Vec<Vec<[u32; 3]>>,
    pub bounds: Rect,
}

impl RegionShape {
    pub fn new(id: RegionId, rings: Vec<Vec<Pos2>>) -> Self {
        let triangles = rings.iter().map(|ring| geometry::triangulate(ring)).collect();
        let bounds = rings.iter()
            .map(|ring| geometry::bounds(ring))
            .fold(Rect::NOTHING, |acc, r| acc.union(r));
        Self { id, rings, triangles, bounds }
    }

    /// Even-odd across all rings, so inner rings cut holes.
    pub fn contains(&self, p: Pos2) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        self.rings.iter()
            .filter(|ring| geometry::ring_contains(ring, p))
            .count() % 2 == 1
    }
}

/// The parsed map resource: a coordinate frame plus shapes in paint order.
#[derive(Debug, Clone)]
pub struct RegionMap {
    pub view_box: Rect,
    pub shapes: Vec<RegionShape>,
}

impl RegionMap {
    /// Topmost shape under `p` (map coordinates) accepted by `filter`.
    pub fn hit_test(&self, p: Pos2, mut filter: impl FnMut(&RegionShape) -> bool) -> Option<&RegionShape> {
        self.shapes.iter()
            .rev()
            .find(|shape| filter(shape) && shape.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn square(id: &str, x: f32, y: f32, size: f32) -> RegionShape {
        RegionShape::new(
            RegionId::from(id),
            vec![vec![pos2(x, y), pos2(x + size, y), pos2(x + size, y + size), pos2(x, y + size)]],
        )
    }

    #[test]
    fn test_hole_is_not_inside() {
        let mut donut = square("A", 0.0, 0.0, 10.0);
        donut.rings.push(vec![pos2(3.0, 3.0), pos2(7.0, 3.0), pos2(7.0, 7.0), pos2(3.0, 7.0)]);
        assert!(donut.contains(pos2(1.0, 1.0)));
        assert!(!donut.contains(pos2(5.0, 5.0)));
    }

    #[test]
    fn test_hit_test_prefers_topmost_and_honours_filter() {
        let map = RegionMap {
            view_box: Rect::from_min_max(pos2(0.0, 0.0), pos2(20.0, 20.0)),
            shapes: vec![square("LOW", 0.0, 0.0, 10.0), square("TOP", 5.0, 5.0, 10.0)],
        };
        let p = pos2(7.0, 7.0);
        assert_eq!(map.hit_test(p, |_| true).unwrap().id.as_str(), "TOP");
        assert_eq!(map.hit_test(p, |s| s.id.as_str() != "TOP").unwrap().id.as_str(), "LOW");
        assert!(map.hit_test(pos2(19.0, 1.0), |_| true).is_none());
    }
}
