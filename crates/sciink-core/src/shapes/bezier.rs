//! Bezier path shape drawn with the pen tool.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{
    Affine, BezPath, CubicBez, ParamCurve, ParamCurveNearest, Point, Rect, Shape as _, Vec2,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum number of anchors a path keeps.
pub const MIN_ANCHORS: usize = 2;

/// Accuracy used for nearest-point queries on segments.
const NEAREST_ACCURACY: f64 = 1e-6;

/// Whether an anchor's handles are mirrored or independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    /// Handles stay collinear through the anchor.
    #[default]
    Smooth,
    /// Handles move independently.
    Corner,
}

impl PointType {
    pub fn toggled(self) -> Self {
        match self {
            PointType::Smooth => PointType::Corner,
            PointType::Corner => PointType::Smooth,
        }
    }
}

/// One of the two control handles of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlHandle {
    /// Shapes the segment entering the anchor (`control_point1`).
    In,
    /// Shapes the segment leaving the anchor (`control_point2`).
    Out,
}

impl ControlHandle {
    pub fn opposite(self) -> Self {
        match self {
            ControlHandle::In => ControlHandle::Out,
            ControlHandle::Out => ControlHandle::In,
        }
    }
}

/// An anchor on a bezier path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    /// Unique within the owning path.
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point1: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point2: Option<Point>,
    #[serde(rename = "type", default)]
    pub point_type: PointType,
}

impl BezierPoint {
    pub fn new(id: impl Into<String>, position: Point, point_type: PointType) -> Self {
        Self {
            id: id.into(),
            x: position.x,
            y: position.y,
            control_point1: None,
            control_point2: None,
            point_type,
        }
    }

    /// Set both control handles.
    pub fn with_controls(mut self, control_point1: Option<Point>, control_point2: Option<Point>) -> Self {
        self.control_point1 = control_point1;
        self.control_point2 = control_point2;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn control(&self, handle: ControlHandle) -> Option<Point> {
        match handle {
            ControlHandle::In => self.control_point1,
            ControlHandle::Out => self.control_point2,
        }
    }

    pub fn control_mut(&mut self, handle: ControlHandle) -> &mut Option<Point> {
        match handle {
            ControlHandle::In => &mut self.control_point1,
            ControlHandle::Out => &mut self.control_point2,
        }
    }

    /// Move the anchor, carrying its handles along.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
        for cp in [&mut self.control_point1, &mut self.control_point2].into_iter().flatten() {
            *cp += delta;
        }
    }

    /// Re-align the handles so they are collinear through the anchor.
    ///
    /// Existing handle lengths are kept. A missing handle takes the length
    /// of the other one; with no handles at all, the tangent and lengths
    /// come from the neighbouring anchors.
    pub fn align_handles(&mut self, prev: Option<Point>, next: Option<Point>) {
        let anchor = self.position();
        let h_in = self.control_point1;
        let h_out = self.control_point2;

        let from_handles = match (h_in, h_out) {
            (Some(a), Some(b)) => b - a,
            (None, Some(b)) => b - anchor,
            (Some(a), None) => anchor - a,
            (None, None) => Vec2::ZERO,
        };
        let from_neighbours = match (prev, next) {
            (Some(p), Some(n)) => n - p,
            (None, Some(n)) => n - anchor,
            (Some(p), None) => anchor - p,
            (None, None) => Vec2::ZERO,
        };
        let tangent = if from_handles.hypot2() > f64::EPSILON {
            from_handles
        } else {
            from_neighbours
        };
        if tangent.hypot2() <= f64::EPSILON {
            return;
        }
        let dir = tangent.normalize();

        let handle_len = |h: Option<Point>| h.map(|h| h.distance(anchor)).filter(|l| *l > f64::EPSILON);
        let neighbour_len = |p: Option<Point>| p.map(|p| p.distance(anchor) / 3.0);

        let len_in = handle_len(h_in)
            .or_else(|| handle_len(h_out))
            .or_else(|| neighbour_len(prev))
            .or_else(|| neighbour_len(next))
            .unwrap_or(0.0);
        let len_out = handle_len(h_out)
            .or_else(|| handle_len(h_in))
            .or_else(|| neighbour_len(next))
            .or_else(|| neighbour_len(prev))
            .unwrap_or(0.0);

        self.control_point1 = Some(anchor - dir * len_in);
        self.control_point2 = Some(anchor + dir * len_out);
    }
}

/// A path made of bezier anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BezierPath {
    pub(crate) id: ShapeId,
    /// Anchors in drawing order.
    pub points: Vec<BezierPoint>,
    /// Whether the last anchor connects back to the first.
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub is_edit_mode: bool,
    #[serde(default)]
    pub selected_anchor_id: Option<String>,
    pub style: ShapeStyle,
    /// Counter for generated anchor ids.
    #[serde(default)]
    next_anchor_seq: u64,
}

impl BezierPath {
    /// Create a path from existing anchors.
    pub fn new(points: Vec<BezierPoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            closed: false,
            is_edit_mode: false,
            selected_anchor_id: None,
            style: ShapeStyle::default(),
            next_anchor_seq: 0,
        }
    }

    /// Create a path of corner anchors (as placed by pen-tool clicks).
    pub fn from_anchors(positions: &[Point]) -> Self {
        let mut path = Self::new(Vec::with_capacity(positions.len()));
        for &p in positions {
            let id = path.generate_anchor_id();
            path.points.push(BezierPoint::new(id, p, PointType::Corner));
        }
        path
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    pub fn point(&self, id: &str) -> Option<&BezierPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_mut(&mut self, id: &str) -> Option<&mut BezierPoint> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    /// Produce an anchor id not used by any anchor of this path.
    pub fn generate_anchor_id(&mut self) -> String {
        loop {
            self.next_anchor_seq += 1;
            let id = format!("anchor-{}", self.next_anchor_seq);
            if self.index_of(&id).is_none() {
                return id;
            }
        }
    }

    /// Number of drawable segments.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Indices of the anchors at either end of segment `index`.
    fn segment_anchors(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.segment_count()).then(|| (index, (index + 1) % self.points.len()))
    }

    /// Segment `index` as a cubic curve.
    ///
    /// Missing handles collapse onto their anchor.
    pub fn segment(&self, index: usize) -> Option<CubicBez> {
        let (a, b) = self.segment_anchors(index)?;
        let a = &self.points[a];
        let b = &self.points[b];
        Some(CubicBez::new(
            a.position(),
            a.control_point2.unwrap_or(a.position()),
            b.control_point1.unwrap_or(b.position()),
            b.position(),
        ))
    }

    fn segment_is_straight(&self, index: usize) -> bool {
        self.segment_anchors(index)
            .map(|(a, b)| self.points[a].control_point2.is_none() && self.points[b].control_point1.is_none())
            .unwrap_or(false)
    }

    /// Positions of the anchors before and after `index`.
    pub fn neighbours(&self, index: usize) -> (Option<Point>, Option<Point>) {
        let n = self.points.len();
        if index >= n || n < 2 {
            return (None, None);
        }
        let prev = if index > 0 {
            Some(index - 1)
        } else if self.closed {
            Some(n - 1)
        } else {
            None
        };
        let next = if index + 1 < n {
            Some(index + 1)
        } else if self.closed {
            Some(0)
        } else {
            None
        };
        (
            prev.map(|i| self.points[i].position()),
            next.map(|i| self.points[i].position()),
        )
    }

    /// Closest segment to `point`: `(segment index, curve parameter, distance)`.
    pub fn nearest_segment(&self, point: Point) -> Option<(usize, f64, f64)> {
        (0..self.segment_count())
            .filter_map(|i| {
                let nearest = self.segment(i)?.nearest(point, NEAREST_ACCURACY);
                Some((i, nearest.t, nearest.distance_sq.sqrt()))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
    }

    /// Insert a smooth anchor on segment `index` at parameter `t`.
    ///
    /// The neighbouring handles are shortened so the curve keeps its shape.
    /// Returns the new anchor's id.
    pub fn split_segment(&mut self, index: usize, t: f64) -> Option<String> {
        let (a, b) = self.segment_anchors(index)?;
        let seg = self.segment(index)?;
        let t = t.clamp(1e-3, 1.0 - 1e-3);
        let position = seg.eval(t);
        let id = self.generate_anchor_id();

        let point = if self.segment_is_straight(index) {
            BezierPoint::new(id.clone(), position, PointType::Smooth)
        } else {
            let left = seg.subsegment(0.0..t);
            let right = seg.subsegment(t..1.0);
            self.points[a].control_point2 = Some(left.p1);
            self.points[b].control_point1 = Some(right.p2);
            BezierPoint::new(id.clone(), position, PointType::Smooth)
                .with_controls(Some(left.p2), Some(right.p1))
        };

        self.points.insert(a + 1, point);
        Some(id)
    }

    /// Remove an anchor, joining the segments on either side.
    ///
    /// Refused when the path would drop below [`MIN_ANCHORS`].
    pub fn remove_point(&mut self, id: &str) -> bool {
        if self.points.len() <= MIN_ANCHORS {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.points.remove(index);
        if self.selected_anchor_id.as_deref() == Some(id) {
            self.selected_anchor_id = None;
        }
        true
    }
}

impl ShapeTrait for BezierPath {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }
        self.to_path().bounding_box()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.nearest_segment(point)
            .map(|(_, _, dist)| dist <= tolerance + self.style.stroke_width / 2.0)
            .unwrap_or(false)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(first.position());
        for i in 0..self.segment_count() {
            if self.segment_is_straight(i) {
                let b = (i + 1) % self.points.len();
                path.line_to(self.points[b].position());
            } else if let Some(seg) = self.segment(i) {
                path.curve_to(seg.p1, seg.p2, seg.p3);
            }
        }
        if self.closed {
            path.close_path();
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        for p in &mut self.points {
            let pos = affine * p.position();
            p.x = pos.x;
            p.y = pos.y;
            for cp in [&mut p.control_point1, &mut p.control_point2].into_iter().flatten() {
                *cp = affine * *cp;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_path() -> BezierPath {
        BezierPath::new(vec![
            BezierPoint::new("a", Point::new(0.0, 0.0), PointType::Corner)
                .with_controls(None, Some(Point::new(0.0, -50.0))),
            BezierPoint::new("b", Point::new(100.0, 0.0), PointType::Corner)
                .with_controls(Some(Point::new(100.0, -50.0)), None),
        ])
    }

    #[test]
    fn test_from_anchors_unique_ids() {
        let mut path = BezierPath::from_anchors(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 10.0),
        ]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.segment_count(), 2);
        let id = path.generate_anchor_id();
        assert!(path.index_of(&id).is_none());
        path.closed = true;
        assert_eq!(path.segment_count(), 3);
    }

    #[test]
    fn test_generated_id_skips_existing() {
        let mut path = BezierPath::new(vec![
            BezierPoint::new("anchor-1", Point::new(0.0, 0.0), PointType::Corner),
            BezierPoint::new("anchor-2", Point::new(1.0, 0.0), PointType::Corner),
        ]);
        assert_eq!(path.generate_anchor_id(), "anchor-3");
    }

    #[test]
    fn test_split_preserves_shape() {
        let mut path = curve_path();
        let before = path.segment(0).unwrap();
        let id = path.split_segment(0, 0.5).unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.points[1].id, id);
        assert_eq!(path.points[1].point_type, PointType::Smooth);

        let mid = before.eval(0.5);
        assert!(path.points[1].position().distance(mid) < 1e-9);
        // Points on the original curve stay on the new pair of segments.
        let quarter = before.eval(0.25);
        let (_, _, dist) = path.nearest_segment(quarter).unwrap();
        assert!(dist < 1e-6);
    }

    #[test]
    fn test_split_straight_segment() {
        let mut path = BezierPath::from_anchors(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        path.split_segment(0, 0.3).unwrap();
        let inserted = &path.points[1];
        assert!((inserted.x - 3.0).abs() < 1e-9);
        assert!(inserted.control_point1.is_none());
        assert!(path.points[0].control_point2.is_none());
    }

    #[test]
    fn test_remove_point_guard() {
        let mut path = BezierPath::from_anchors(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        let id = path.points[0].id.clone();
        assert!(!path.remove_point(&id));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_remove_point_keeps_others() {
        let mut path = BezierPath::from_anchors(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ]);
        let first = path.points[0].clone();
        let last = path.points[2].clone();
        let middle = path.points[1].id.clone();
        assert!(path.remove_point(&middle));
        assert_eq!(path.points, vec![first, last]);
        assert_eq!(path.segment_count(), 1);
    }

    #[test]
    fn test_align_handles_preserves_lengths() {
        let mut p = BezierPoint::new("p", Point::new(0.0, 0.0), PointType::Corner)
            .with_controls(Some(Point::new(-10.0, 0.0)), Some(Point::new(0.0, 5.0)));
        p.align_handles(None, None);
        let anchor = p.position();
        let h1 = p.control_point1.unwrap();
        let h2 = p.control_point2.unwrap();
        assert!((h1.distance(anchor) - 10.0).abs() < 1e-9);
        assert!((h2.distance(anchor) - 5.0).abs() < 1e-9);
        let cross = (h2 - anchor).cross(anchor - h1);
        assert!(cross.abs() < 1e-9);
    }

    #[test]
    fn test_align_handles_from_neighbours() {
        let mut p = BezierPoint::new("p", Point::new(10.0, 0.0), PointType::Corner);
        p.align_handles(Some(Point::new(0.0, 0.0)), Some(Point::new(25.0, 0.0)));
        let h1 = p.control_point1.unwrap();
        let h2 = p.control_point2.unwrap();
        assert!(h1.x < 10.0 && h2.x > 10.0);
        assert!(h1.y.abs() < 1e-9 && h2.y.abs() < 1e-9);
    }

    #[test]
    fn test_bounds_and_hit_test() {
        let path = BezierPath::from_anchors(&[Point::new(0.0, 0.0), Point::new(100.0, 50.0)]);
        let bounds = path.bounds();
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.y1 - 50.0).abs() < 1e-9);
        assert!(path.hit_test(Point::new(50.0, 25.0), 1.0));
        assert!(!path.hit_test(Point::new(50.0, 60.0), 1.0));
    }

    #[test]
    fn test_closed_path_data() {
        let mut path = BezierPath::from_anchors(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        path.closed = true;
        let svg = path.to_path().to_svg();
        assert!(svg.starts_with('M'));
        assert!(svg.ends_with('Z'));
    }

    #[test]
    fn test_point_serde_type_field() {
        let p = BezierPoint::new("x", Point::new(1.0, 2.0), PointType::Smooth);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "smooth");
        assert!(json.get("control_point1").is_none());
    }
}
