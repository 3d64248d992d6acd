//! Geometric helpers for connectors and hit testing.
//!
//! Everything in here is a pure function over plain coordinates. Slopes are
//! `dy / dx`; vertical lines use `f64::INFINITY`.

use kurbo::{Point, Rect};

/// Squared segment length below which a connector counts as a single point.
///
/// Arrowheads and hit corridors are undefined for such segments and are skipped.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Two points on the line through `center` with the given `slope`, each
/// `distance` away from `center`.
///
/// The first point has the smaller x (or the smaller y for vertical lines).
/// A NaN slope yields NaN coordinates; callers reject degenerate segments first.
pub fn equidistant_points(center: Point, slope: f64, distance: f64) -> (Point, Point) {
    if slope == 0.0 {
        return (
            Point::new(center.x - distance, center.y),
            Point::new(center.x + distance, center.y),
        );
    }
    if slope.is_infinite() {
        return (
            Point::new(center.x, center.y - distance),
            Point::new(center.x, center.y + distance),
        );
    }

    let t = (distance * distance / (1.0 + slope * slope)).sqrt();
    let left = Point::new(center.x - t, center.y - slope * t);
    let right = Point::new(center.x + t, center.y + slope * t);
    (left, right)
}

/// Squared Euclidean distance between two points.
///
/// Only ever compared against squared thresholds, so no square root is taken.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).powi(2) + (b.y - a.y).powi(2)
}

/// Slope of the line through `a` and `b`; `f64::INFINITY` for vertical lines.
pub fn slope(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    if dx == 0.0 {
        f64::INFINITY
    } else {
        (b.y - a.y) / dx
    }
}

/// Slope of a line perpendicular to one with slope `k`.
pub fn perpendicular_slope(k: f64) -> f64 {
    if k == 0.0 {
        f64::INFINITY
    } else if k.is_infinite() {
        0.0
    } else {
        -1.0 / k
    }
}

/// Whether the segment `a`-`b` is too short to have a direction.
pub fn is_degenerate(a: Point, b: Point) -> bool {
    distance(a, b) < DEGENERATE_EPSILON
}

/// Quadrilateral enclosing the segment `start`-`end`, each vertex `r` away from
/// the segment along its perpendicular.
///
/// Vertices run around the rectangle starting at the end point:
/// `[end_a, end_b, start_b, start_a]`, where `_a` is the offset with the smaller
/// x (smaller y for horizontal segments). Returns `None` for degenerate segments.
pub fn hit_corridor(start: Point, end: Point, r: f64) -> Option<[Point; 4]> {
    if is_degenerate(start, end) {
        return None;
    }

    let k = perpendicular_slope(slope(start, end));
    let (start_a, start_b) = equidistant_points(start, k, r);
    let (end_a, end_b) = equidistant_points(end, k, r);
    Some([end_a, end_b, start_b, start_a])
}

/// Arrowhead for a connector pointing at `end`: `[wing, tip, wing]`.
///
/// The wing base sits `back` units behind the tip along the segment, on the
/// side of the tail; the wings spread `wing` units either side of it along
/// the perpendicular. Returns `None` for degenerate segments.
pub fn arrowhead_triangle(start: Point, end: Point, back: f64, wing: f64) -> Option<[Point; 3]> {
    if is_degenerate(start, end) {
        return None;
    }

    let k = slope(start, end);
    let (a, b) = equidistant_points(end, k, back);
    let base = if distance(a, start) <= distance(b, start) { a } else { b };

    let (wing_a, wing_b) = equidistant_points(base, perpendicular_slope(k), wing);
    Some([wing_a, end, wing_b])
}

/// Point-in-rectangle test that includes all four edges.
///
/// `kurbo::Rect::contains` excludes the far edges, which would leave a
/// connector ending exactly on a node's right or bottom edge unattached.
pub fn point_in_rect_inclusive(point: Point, rect: Rect) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Even-odd point-in-polygon test. Points on the boundary count as inside.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let edges = || polygon.iter().zip(polygon.iter().cycle().skip(1));

    if edges().any(|(&a, &b)| point_to_segment_dist(point, a, b) < 1e-9) {
        return true;
    }

    let mut inside = false;
    for (&a, &b) in edges() {
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_equidistant_horizontal_is_exact() {
        let (left, right) = equidistant_points(Point::new(3.0, 4.0), 0.0, 7.0);
        assert_eq!(left, Point::new(-4.0, 4.0));
        assert_eq!(right, Point::new(10.0, 4.0));
    }

    #[test]
    fn test_equidistant_vertical() {
        let (top, bottom) = equidistant_points(Point::new(3.0, 4.0), f64::INFINITY, 2.0);
        assert_eq!(top, Point::new(3.0, 2.0));
        assert_eq!(bottom, Point::new(3.0, 6.0));

        let (top, bottom) = equidistant_points(Point::new(3.0, 4.0), f64::NEG_INFINITY, 2.0);
        assert_eq!(top, Point::new(3.0, 2.0));
        assert_eq!(bottom, Point::new(3.0, 6.0));
    }

    #[test]
    fn test_equidistant_diagonal() {
        let center = Point::new(0.0, 0.0);
        let (left, right) = equidistant_points(center, 1.0, 2.0_f64.sqrt());
        assert_point_eq(left, Point::new(-1.0, -1.0));
        assert_point_eq(right, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_distance_is_squared() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_slopes() {
        assert_eq!(slope(Point::new(0.0, 0.0), Point::new(2.0, 1.0)), 0.5);
        assert!(slope(Point::new(1.0, 0.0), Point::new(1.0, 5.0)).is_infinite());
        assert!(perpendicular_slope(0.0).is_infinite());
        assert_eq!(perpendicular_slope(f64::INFINITY), 0.0);
        assert_eq!(perpendicular_slope(2.0), -0.5);
    }

    #[test]
    fn test_corridor_horizontal() {
        let quad = hit_corridor(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 5.0).unwrap();
        assert_eq!(
            quad,
            [
                Point::new(10.0, -5.0),
                Point::new(10.0, 5.0),
                Point::new(0.0, 5.0),
                Point::new(0.0, -5.0),
            ]
        );
    }

    #[test]
    fn test_corridor_vertical() {
        let quad = hit_corridor(Point::new(0.0, 0.0), Point::new(0.0, 10.0), 5.0).unwrap();
        assert_eq!(
            quad,
            [
                Point::new(-5.0, 10.0),
                Point::new(5.0, 10.0),
                Point::new(5.0, 0.0),
                Point::new(-5.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_corridor_degenerate() {
        let p = Point::new(4.0, 4.0);
        assert!(hit_corridor(p, p, 5.0).is_none());
        assert!(arrowhead_triangle(p, p, 10.0, 5.0).is_none());
    }

    #[test]
    fn test_arrowhead_points_back_toward_tail() {
        let tri = arrowhead_triangle(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0, 5.0).unwrap();
        assert_eq!(tri[1], Point::new(100.0, 0.0));
        assert_point_eq(tri[0], Point::new(90.0, -5.0));
        assert_point_eq(tri[2], Point::new(90.0, 5.0));

        // Pointing left: wings must be on the right of the tip.
        let tri = arrowhead_triangle(Point::new(100.0, 0.0), Point::new(0.0, 0.0), 10.0, 5.0).unwrap();
        assert!(tri[0].x > 0.0 && tri[2].x > 0.0);
    }

    #[test]
    fn test_arrowhead_shorter_than_head() {
        // Segment shorter than the back offset still puts the wings behind the tip.
        let tri = arrowhead_triangle(Point::new(0.0, 0.0), Point::new(0.0, 4.0), 10.0, 5.0).unwrap();
        assert_point_eq(tri[0], Point::new(-5.0, -6.0));
        assert_point_eq(tri[2], Point::new(5.0, -6.0));
    }

    #[test]
    fn test_arrowhead_diagonal_wings_are_symmetric() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(30.0, 40.0);
        let [a, tip, b] = arrowhead_triangle(start, end, 10.0, 5.0).unwrap();
        assert_eq!(tip, end);
        assert!((distance(a, tip) - distance(b, tip)).abs() < 1e-9);
        // Base is 10 back along the shaft: (24, 32).
        let mid = a.midpoint(b);
        assert_point_eq(mid, Point::new(24.0, 32.0));
    }

    #[test]
    fn test_point_in_rect_inclusive_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(point_in_rect_inclusive(Point::new(100.0, 50.0), rect));
        assert!(point_in_rect_inclusive(Point::new(0.0, 0.0), rect));
        assert!(!point_in_rect_inclusive(Point::new(100.1, 25.0), rect));
    }

    #[test]
    fn test_point_in_polygon() {
        let quad = [
            Point::new(10.0, -5.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, -5.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 0.0), &quad));
        assert!(point_in_polygon(Point::new(10.0, 5.0), &quad));
        assert!(!point_in_polygon(Point::new(5.0, 6.0), &quad));
        assert!(!point_in_polygon(Point::new(5.0, 0.0), &quad[..2]));
    }

    #[test]
    fn test_point_to_segment_dist() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }
}
