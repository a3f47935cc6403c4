//! Geometry primitives: segment intersection, jump arcs and path simplification.

use kurbo::{Line, Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A line segment between two endpoints.
///
/// Used for intersection tests only; it carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    /// Create a segment from raw coordinates.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a segment between two points.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    pub fn point_at(&self, t: f64) -> Point {
        self.start().lerp(self.end(), t)
    }

    /// Shortest distance from `point` to any point on the segment.
    pub fn distance_to(&self, point: Point) -> f64 {
        point_to_segment_dist(point, self.start(), self.end())
    }
}

impl From<Line> for LineSegment {
    fn from(line: Line) -> Self {
        Self::from_points(line.p0, line.p1)
    }
}

impl From<LineSegment> for Line {
    fn from(seg: LineSegment) -> Self {
        Line::new(seg.start(), seg.end())
    }
}

/// 2D cross product (z component of the 3D cross product).
fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Parameters `(t, u)` where the lines through `a` and `b` cross, if they are not parallel.
fn intersection_params(a: &LineSegment, b: &LineSegment) -> Option<(f64, f64)> {
    let r = a.end() - a.start();
    let s = b.end() - b.start();
    let denom = cross(r, s);
    // Relative to the segment lengths so tiny segments are not taken as parallel.
    let scale = r.hypot() * s.hypot();
    if scale == 0.0 || denom.abs() <= f64::EPSILON * scale {
        return None;
    }
    let qp = b.start() - a.start();
    Some((cross(qp, s) / denom, cross(qp, r) / denom))
}

/// Find the point where two segments cross.
///
/// Returns `None` for parallel or collinear segments and when the crossing
/// lies outside either segment.
pub fn line_intersection(a: &LineSegment, b: &LineSegment) -> Option<Point> {
    let (t, u) = intersection_params(a, b)?;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(a.point_at(t))
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
    point.distance(a + seg * t)
}

/// Perpendicular distance from a point to the infinite line through two points.
pub fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let d = line_end - line_start;
    let line_len_sq = d.hypot2();
    if line_len_sq < f64::EPSILON {
        // Line is a point
        return point.distance(line_start);
    }

    // Area of triangle * 2 / base = height
    cross(point - line_start, d).abs() / line_len_sq.sqrt()
}

/// Quadratic control point for a jump arc whose apex sits `arc_height` off the chord.
fn jump_arc_control(start: Point, end: Point, arc_height: f64) -> Option<Point> {
    let chord = end - start;
    let len = chord.hypot();
    if len < f64::EPSILON {
        return None;
    }
    // Normal pointing "up" on a y-down canvas for a left-to-right chord.
    let normal = Vec2::new(chord.y, -chord.x) / len;
    // The apex of a quadratic is halfway between the chord midpoint and the control point.
    Some(start.midpoint(end) + normal * (2.0 * arc_height))
}

/// Append the curve part (`Q ...` or `L ...`) of a jump arc to `out`.
fn push_jump_arc(out: &mut String, start: Point, end: Point, arc_height: f64) {
    match jump_arc_control(start, end, arc_height) {
        Some(c) => {
            let _ = write!(out, " Q {} {} {} {}", c.x, c.y, end.x, end.y);
        }
        None => {
            let _ = write!(out, " L {} {}", end.x, end.y);
        }
    }
}

/// Build SVG path data for a "jump over" arc from `start` to `end`.
///
/// The arc bulges perpendicular to the chord; its apex is exactly
/// `arc_height` away from the straight line between the endpoints.
pub fn create_jump_arc(start: Point, end: Point, arc_height: f64) -> String {
    let mut d = format!("M {} {}", start.x, start.y);
    push_jump_arc(&mut d, start, end, arc_height);
    d
}

/// A crossing between a connector and another line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Index of the connector segment that is crossed.
    pub segment: usize,
    /// Parameter along that segment.
    pub t: f64,
    /// Crossing point.
    pub point: Point,
}

/// Find the places where a polyline connector crosses other lines.
///
/// Crossings closer than `radius` to a segment's ends are skipped since no
/// jump arc fits there, as are crossings that would overlap a previous jump.
/// Results are ordered along the connector.
pub fn connector_crossings(path: &[Point], others: &[LineSegment], radius: f64) -> Vec<Crossing> {
    let mut crossings = Vec::new();

    for (i, w) in path.windows(2).enumerate() {
        let seg = LineSegment::from_points(w[0], w[1]);
        let len = w[0].distance(w[1]);
        if len < 2.0 * radius || len < f64::EPSILON {
            continue;
        }
        let margin = radius / len;

        let mut hits: Vec<f64> = others
            .iter()
            .filter_map(|other| {
                let (t, u) = intersection_params(&seg, other)?;
                let inside = (margin..=1.0 - margin).contains(&t) && (0.0..=1.0).contains(&u);
                inside.then_some(t)
            })
            .collect();
        hits.sort_by(|a, b| a.total_cmp(b));

        let mut last_t: Option<f64> = None;
        for t in hits {
            if let Some(prev) = last_t {
                if (t - prev) * len < 2.0 * radius {
                    continue;
                }
            }
            last_t = Some(t);
            crossings.push(Crossing { segment: i, t, point: seg.point_at(t) });
        }
    }

    crossings
}

/// Crossing points of a connector with other lines.
pub fn connector_jumps(path: &[Point], others: &[LineSegment], radius: f64) -> Vec<Point> {
    connector_crossings(path, others, radius)
        .into_iter()
        .map(|c| c.point)
        .collect()
}

/// Build SVG path data for a polyline connector that jumps over other lines.
///
/// Each crossing is replaced by a jump arc spanning `2 * radius` along the
/// connector.
pub fn polyline_with_jumps(
    path: &[Point],
    others: &[LineSegment],
    radius: f64,
    arc_height: f64,
) -> String {
    let Some(first) = path.first() else {
        return String::new();
    };
    let crossings = connector_crossings(path, others, radius);

    let mut d = format!("M {} {}", first.x, first.y);
    for (i, w) in path.windows(2).enumerate() {
        let dir = w[1] - w[0];
        let len = dir.hypot();
        for c in crossings.iter().filter(|c| c.segment == i) {
            let offset = dir * (radius / len);
            let before = c.point - offset;
            let after = c.point + offset;
            let _ = write!(d, " L {} {}", before.x, before.y);
            push_jump_arc(&mut d, before, after, arc_height);
        }
        let _ = write!(d, " L {} {}", w[1].x, w[1].y);
    }
    d
}

/// Simplify a polyline with the Ramer-Douglas-Peucker algorithm.
///
/// The first and last points are always kept as given. A point survives
/// only if it lies farther than `tolerance` from the chord of its
/// enclosing span.
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Find point with maximum distance from line between first and last
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = simplify_path(&points[..=max_index], tolerance);
        let right = simplify_path(&points[max_index..], tolerance);

        // Combine, removing duplicate point at junction
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::ParamCurve;

    #[test]
    fn test_diagonals_cross_at_center() {
        let a = LineSegment::new(0.0, 0.0, 10.0, 10.0);
        let b = LineSegment::new(0.0, 10.0, 10.0, 0.0);
        let p = line_intersection(&a, &b).unwrap();
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!((p.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        let a = LineSegment::new(0.0, 0.0, 10.0, 0.0);
        let b = LineSegment::new(0.0, 5.0, 10.0, 5.0);
        assert!(line_intersection(&a, &b).is_none());
    }

    #[test]
    fn test_tiny_perpendicular_segments_intersect() {
        let a = LineSegment::new(0.0, 0.0, 2e-9, 0.0);
        let b = LineSegment::new(1e-9, -1e-9, 1e-9, 1e-9);
        let p = line_intersection(&a, &b).unwrap();
        assert!((p.x - 1e-9).abs() < 1e-18);
        assert!(p.y.abs() < 1e-18);
    }

    #[test]
    fn test_degenerate_segment_has_no_intersection() {
        let a = LineSegment::new(5.0, 5.0, 5.0, 5.0);
        let b = LineSegment::new(0.0, 0.0, 10.0, 10.0);
        assert!(line_intersection(&a, &b).is_none());
    }

    #[test]
    fn test_segment_distance() {
        let seg = LineSegment::new(0.0, 0.0, 10.0, 0.0);
        assert_eq!(seg.distance_to(Point::new(5.0, 3.0)), 3.0);
        // Past the end the nearest point is the endpoint.
        assert_eq!(seg.distance_to(Point::new(13.0, 4.0)), 5.0);
        assert_eq!(point_to_segment_dist(Point::new(3.0, 4.0), Point::ZERO, Point::ZERO), 5.0);
    }

    #[test]
    fn test_vertical_line_intersection() {
        let a = LineSegment::new(3.0, -5.0, 3.0, 5.0);
        let b = LineSegment::new(0.0, 1.0, 10.0, 1.0);
        let p = line_intersection(&a, &b).unwrap();
        assert!((p.x - 3.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_outside_segments() {
        let a = LineSegment::new(0.0, 0.0, 1.0, 1.0);
        let b = LineSegment::new(0.0, 10.0, 10.0, 0.0);
        assert!(line_intersection(&a, &b).is_none());
    }

    #[test]
    fn test_jump_arc_format() {
        let d = create_jump_arc(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 5.0);
        assert!(d.starts_with("M 0 0"));
        assert!(d.contains(" Q "));
        assert!(d.ends_with("10 0"));
    }

    #[test]
    fn test_jump_arc_apex_height() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(20.0, 0.0);
        let c = jump_arc_control(start, end, 4.0).unwrap();
        let apex = kurbo::QuadBez::new(start, c, end).eval(0.5);
        assert!((perpendicular_distance(apex, start, end) - 4.0).abs() < 1e-9);

        let higher = jump_arc_control(start, end, 6.0).unwrap();
        let apex_higher = kurbo::QuadBez::new(start, higher, end).eval(0.5);
        assert!(perpendicular_distance(apex_higher, start, end) > perpendicular_distance(apex, start, end));
    }

    #[test]
    fn test_degenerate_jump_arc() {
        let p = Point::new(2.0, 3.0);
        assert_eq!(create_jump_arc(p, p, 5.0), "M 2 3 L 2 3");
    }

    #[test]
    fn test_connector_jumps() {
        let path = [Point::new(0.0, 50.0), Point::new(100.0, 50.0)];
        let others = [
            LineSegment::new(30.0, 0.0, 30.0, 100.0),
            LineSegment::new(70.0, 0.0, 70.0, 100.0),
            // Too close to the connector end to fit an arc.
            LineSegment::new(98.0, 0.0, 98.0, 100.0),
        ];
        let jumps = connector_jumps(&path, &others, 5.0);
        assert_eq!(jumps.len(), 2);
        assert!((jumps[0].x - 30.0).abs() < 1e-9);
        assert!((jumps[1].x - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyline_with_jumps() {
        let path = [Point::new(0.0, 50.0), Point::new(100.0, 50.0)];
        let others = [LineSegment::new(50.0, 0.0, 50.0, 100.0)];
        let d = polyline_with_jumps(&path, &others, 5.0, 5.0);
        assert_eq!(d, "M 0 50 L 45 50 Q 50 40 55 50 L 100 50");
    }

    #[test]
    fn test_simplify_near_straight() {
        let points: Vec<Point> = (0..11)
            .map(|i| Point::new(i as f64, if i % 2 == 0 { 0.0 } else { 0.1 }))
            .collect();
        let simplified = simplify_path(&points, 0.5);
        assert!(simplified.len() < points.len());
        assert_eq!(simplified.first(), points.first());
        assert_eq!(simplified.last(), points.last());
    }

    #[test]
    fn test_simplify_keeps_corner() {
        let mut points: Vec<Point> = (0..=5).map(|i| Point::new(i as f64 * 2.0, 0.0)).collect();
        points.extend((1..=5).map(|i| Point::new(10.0, i as f64 * 2.0)));
        let simplified = simplify_path(&points, 0.1);
        assert!(simplified.len() >= 3);
        assert!(simplified.contains(&Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_simplify_monotonic_in_tolerance() {
        let points: Vec<Point> = (0..40)
            .map(|i| {
                let x = i as f64;
                Point::new(x, (x * 0.7).sin() * 3.0)
            })
            .collect();
        let mut last = 0;
        for tol in [5.0, 2.0, 1.0, 0.5, 0.1, 0.01] {
            let n = simplify_path(&points, tol).len();
            assert!(n >= last);
            last = n;
        }
    }

    #[test]
    fn test_simplify_short_input() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(simplify_path(&points, 1.0), points);
    }
}
