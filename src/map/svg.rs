// src/map/svg.rs
use eframe::egui::{pos2, Pos2, Rect};
use tracing::debug;
use usvg::tiny_skia_path::{self, PathSegment};

use super::geometry::polygon_area;
use super::{MapError, RegionMap, RegionShape};
use crate::config::RegionId;

/// Points sampled per Bézier segment when flattening.
pub const CURVE_STEPS: usize = 8;

/// Reads every identified shape of an SVG document into map coordinates.
///
/// Group and element transforms are already folded into each path's absolute
/// transform, and arcs arrive as curves. The root `viewBox` maps onto the
/// document size, so the map frame is `0,0` to that size. Elements outside the
/// SVG namespace are ignored.
pub fn parse_svg(text: &str) -> Result<RegionMap, MapError> {
    let tree = usvg::Tree::from_str(text, &usvg::Options::default())
        .map_err(|e| MapError::Svg(e.to_string()))?;

    let size = tree.size();
    let view_box = Rect::from_min_size(pos2(0.0, 0.0), [size.width(), size.height()].into());

    let mut shapes = Vec::new();
    collect_shapes(tree.root(), &mut shapes);

    debug!("Parsed map with {} region shapes", shapes.len());
    Ok(RegionMap { view_box, shapes })
}

fn collect_shapes(group: &usvg::Group, shapes: &mut Vec<RegionShape>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(group) => collect_shapes(group, shapes),
            usvg::Node::Path(path) => {
                if let Some(shape) = region_shape(path) {
                    shapes.push(shape);
                }
            }
            _ => {}
        }
    }
}

fn region_shape(path: &usvg::Path) -> Option<RegionShape> {
    let id = path.id();
    if id.is_empty() {
        return None;
    }

    let Some(data) = path.data().clone().transform(path.abs_transform()) else {
        debug!("Path {} collapses under its transform", id);
        return None;
    };

    let mut rings = flatten(&data);
    rings.retain(|ring| polygon_area(ring) > f32::EPSILON);
    if rings.is_empty() {
        debug!("Path {} has no fillable area", id);
        return None;
    }
    Some(RegionShape::new(RegionId::new(id), rings))
}

/// Flattens resolved path data into closed rings.
pub fn flatten(data: &tiny_skia_path::Path) -> Vec<Vec<Pos2>> {
    let mut pen = Pen::default();
    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                pen.finish_ring();
                pen.current = pos2(p.x, p.y);
            }
            PathSegment::LineTo(p) => pen.line_to(pos2(p.x, p.y)),
            PathSegment::QuadTo(c, p) => pen.quad_to(pos2(c.x, c.y), pos2(p.x, p.y)),
            PathSegment::CubicTo(c1, c2, p) => {
                pen.cubic_to(pos2(c1.x, c1.y), pos2(c2.x, c2.y), pos2(p.x, p.y))
            }
            PathSegment::Close => pen.finish_ring(),
        }
    }
    pen.finish_ring();
    pen.rings
}

#[derive(Default)]
struct Pen {
    current: Pos2,
    ring: Vec<Pos2>,
    rings: Vec<Vec<Pos2>>,
}

impl Pen {
    fn ensure_started(&mut self) {
        if self.ring.is_empty() {
            self.ring.push(self.current);
        }
    }

    fn line_to(&mut self, to: Pos2) {
        self.ensure_started();
        self.ring.push(to);
        self.current = to;
    }

    fn quad_to(&mut self, control: Pos2, end: Pos2) {
        self.ensure_started();
        let p0 = self.current;
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let point = p0.to_vec2() * (u * u)
                + control.to_vec2() * (2.0 * u * t)
                + end.to_vec2() * (t * t);
            self.ring.push(point.to_pos2());
        }
        self.current = end;
    }

    fn cubic_to(&mut self, c1: Pos2, c2: Pos2, end: Pos2) {
        self.ensure_started();
        let p0 = self.current;
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let point = p0.to_vec2() * (u * u * u)
                + c1.to_vec2() * (3.0 * u * u * t)
                + c2.to_vec2() * (3.0 * u * t * t)
                + end.to_vec2() * (t * t * t);
            self.ring.push(point.to_pos2());
        }
        self.current = end;
    }

    fn finish_ring(&mut self) {
        let mut ring = std::mem::take(&mut self.ring);
        // An explicit return to the start point duplicates the first vertex.
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() >= 3 {
            self.rings.push(ring);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;

    fn document(body: &str) -> String {
        format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">{}</svg>"#, body)
    }

    fn only_shape(map: &RegionMap) -> &RegionShape {
        assert_eq!(map.shapes.len(), 1);
        &map.shapes[0]
    }

    fn close_to(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_extracts_identified_paths() {
        let svg = document(
            r#"<title>test</title>
            <g>
              <path id="INGA" d="M10 10 L40 10 L40 40 Z"/>
              <path d="M0 0 L5 0 L5 5 Z"/>
              <path id="INKL" d="M50,50 l20,0 0,20 -20,0 z"></path>
            </g>"#,
        );
        let map = parse_svg(&svg).unwrap();
        let ids: Vec<&str> = map.shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["INGA", "INKL"]);
        assert_eq!(map.view_box, Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(200.0, 100.0)));
        assert!(map.shapes[1].contains(pos2(60.0, 60.0)));
        assert!(!map.shapes[1].contains(pos2(45.0, 60.0)));
    }

    #[test]
    fn test_group_translate_moves_region() {
        let svg = document(r#"<g transform="translate(100,0)"><path id="INGA" d="M0 0 H10 V10 H0 Z"/></g>"#);
        let map = parse_svg(&svg).unwrap();
        let shape = only_shape(&map);
        assert!(close_to(shape.bounds.min, pos2(100.0, 0.0)));
        assert!(close_to(shape.bounds.max, pos2(110.0, 10.0)));
        assert!(shape.contains(pos2(105.0, 5.0)));
        assert!(!shape.contains(pos2(5.0, 5.0)));
    }

    #[test]
    fn test_nested_transforms_compose() {
        let svg = document(
            r#"<g transform="scale(2)"><path id="INGA" transform="translate(5,5)" d="M0 0 H10 V10 H0 Z"/></g>"#,
        );
        let map = parse_svg(&svg).unwrap();
        let shape = only_shape(&map);
        assert!(close_to(shape.bounds.min, pos2(10.0, 10.0)));
        assert!(close_to(shape.bounds.max, pos2(30.0, 30.0)));
    }

    #[test]
    fn test_arc_only_region_is_kept() {
        let svg = document(r#"<path id="INLD" d="M0 10 A10 10 0 0 1 20 10 A10 10 0 0 1 0 10 Z"/>"#);
        let map = parse_svg(&svg).unwrap();
        let shape = only_shape(&map);
        assert!(shape.contains(pos2(10.0, 10.0)));
        assert!(shape.contains(pos2(10.0, 1.5)));
        assert!(!shape.contains(pos2(19.0, 1.0)));

        let area: f32 = shape.rings.iter().map(|ring| polygon_area(ring)).sum();
        let circle = std::f32::consts::PI * 100.0;
        assert!((area - circle).abs() / circle < 0.02, "area {}", area);
    }

    #[test]
    fn test_width_height_define_frame() {
        let map = parse_svg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="320px" height="240"><path id="A" d="M0 0 H10 V10 Z"/></svg>"#,
        )
        .unwrap();
        assert_eq!(map.view_box.size(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(parse_svg("<svg><path id='A'></svg>"), Err(MapError::Svg(_))));
        assert!(matches!(parse_svg("not xml at all"), Err(MapError::Svg(_))));
    }

    #[test]
    fn test_bundled_map_parses() {
        let map = parse_svg(include_str!("../../assets/india-states.svg")).unwrap();
        assert_eq!(map.shapes.len(), crate::config::REGION_TABLE.len());
        for shape in &map.shapes {
            assert!(shape.id.display_name().is_some(), "{} missing from table", shape.id);
        }
    }
}
