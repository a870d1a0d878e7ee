// src/map/geometry.rs
use eframe::egui::{Pos2, Rect, Vec2};

/// Twice the signed area; positive for counter-clockwise rings in a y-up frame.
fn doubled_area(points: &[Pos2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
    (a - o).x * (b - o).y - (a - o).y * (b - o).x
}

pub fn polygon_area(points: &[Pos2]) -> f32 {
    doubled_area(points).abs() / 2.0
}

pub fn bounds(points: &[Pos2]) -> Rect {
    Rect::from_points(points)
}

/// Even-odd containment test for a single ring.
pub fn ring_contains(points: &[Pos2], p: Pos2) -> bool {
    let mut inside = false;
    let n = points.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn in_triangle(p: Pos2, a: Pos2, b: Pos2, c: Pos2) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ear-clipping triangulation of a simple ring.
///
/// Returns index triples into `points`. Self-intersecting rings that run out
/// of ears are finished with a fan so the shape still gets painted.
pub fn triangulate(points: &[Pos2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if doubled_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let len = remaining.len();
        let ear = (0..len).find(|&i| {
            let prev = points[remaining[(i + len - 1) % len]];
            let cur = points[remaining[i]];
            let next = points[remaining[(i + 1) % len]];
            if cross(prev, cur, next) <= 0.0 {
                return false;
            }
            remaining.iter()
                .map(|&k| points[k])
                .filter(|&p| p != prev && p != cur && p != next)
                .all(|p| !in_triangle(p, prev, cur, next))
        });

        match ear {
            Some(i) => {
                let len = remaining.len();
                triangles.push([
                    remaining[(i + len - 1) % len] as u32,
                    remaining[i] as u32,
                    remaining[(i + 1) % len] as u32,
                ]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    for i in 1..remaining.len() - 1 {
        triangles.push([remaining[0] as u32, remaining[i] as u32, remaining[i + 1] as u32]);
    }

    triangles
}

/// Uniform scale + offset that fits a map's view box inside a screen rect,
/// centered, preserving aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitProjection {
    pub view_box: Rect,
    pub scale: f32,
    pub offset: Vec2,
}

impl FitProjection {
    pub fn new(view_box: Rect, target: Rect) -> Self {
        let scale = if view_box.width() > 0.0 && view_box.height() > 0.0 {
            (target.width() / view_box.width()).min(target.height() / view_box.height())
        } else {
            1.0
        };
        let fitted = view_box.size() * scale;
        let offset = target.min.to_vec2() + (target.size() - fitted) / 2.0;
        Self { view_box, scale, offset }
    }

    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        ((p - self.view_box.min) * self.scale + self.offset).to_pos2()
    }

    pub fn to_map(&self, p: Pos2) -> Pos2 {
        self.view_box.min + (p.to_vec2() - self.offset) / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn l_shape() -> Vec<Pos2> {
        vec![
            pos2(0.0, 0.0),
            pos2(4.0, 0.0),
            pos2(4.0, 1.0),
            pos2(1.0, 1.0),
            pos2(1.0, 3.0),
            pos2(0.0, 3.0),
        ]
    }

    fn triangles_area(points: &[Pos2], triangles: &[[u32; 3]]) -> f32 {
        triangles.iter()
            .map(|t| polygon_area(&[points[t[0] as usize], points[t[1] as usize], points[t[2] as usize]]))
            .sum()
    }

    #[test]
    fn test_contains_concave_ring() {
        let ring = l_shape();
        assert!(ring_contains(&ring, pos2(0.5, 2.5)));
        assert!(ring_contains(&ring, pos2(3.5, 0.5)));
        assert!(!ring_contains(&ring, pos2(2.5, 2.0)));
        assert!(!ring_contains(&ring, pos2(-1.0, 0.5)));
    }

    #[test]
    fn test_triangulate_square() {
        let square = vec![pos2(0.0, 0.0), pos2(2.0, 0.0), pos2(2.0, 2.0), pos2(0.0, 2.0)];
        let triangles = triangulate(&square);
        assert_eq!(triangles.len(), 2);
        assert!((triangles_area(&square, &triangles) - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_triangulate_concave_covers_area_either_winding() {
        let mut ring = l_shape();
        for _ in 0..2 {
            let triangles = triangulate(&ring);
            assert_eq!(triangles.len(), ring.len() - 2);
            assert!((triangles_area(&ring, &triangles) - polygon_area(&ring)).abs() < 1e-4);
            ring.reverse();
        }
        assert_eq!(polygon_area(&ring), 6.0);
    }

    #[test]
    fn test_fit_projection_centers_and_inverts() {
        let view_box = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(100.0, 50.0));
        let target = Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(200.0, 200.0));
        let fit = FitProjection::new(view_box, target);

        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.to_screen(pos2(0.0, 0.0)), pos2(10.0, 60.0));
        assert_eq!(fit.to_screen(pos2(100.0, 50.0)), pos2(210.0, 160.0));
        let back = fit.to_map(pos2(110.0, 110.0));
        assert!((back - pos2(50.0, 25.0)).length() < 1e-4);
    }
}
