//! Quadratic curved line with a single control point.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::LineSegment;
use kurbo::{Affine, BezPath, ParamCurve, ParamCurveNearest, Point, QuadBez, Rect, Shape as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transform-control state of a line on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformControls {
    /// Whether the normal selection/transform controls are shown.
    pub has_controls: bool,
    pub lock_scaling: bool,
    pub lock_rotation: bool,
    /// Whether the start/end parts of the line can be picked individually.
    #[serde(default = "default_true")]
    pub selectable_parts: bool,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self {
            has_controls: true,
            lock_scaling: false,
            lock_rotation: false,
            selectable_parts: true,
        }
    }
}

/// A curve from `start` to `end` bent by one control point.
///
/// The endpoints are fixed while editing; only the control point moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvedLine {
    pub(crate) id: ShapeId,
    pub start: Point,
    pub end: Point,
    pub control: Point,
    /// Marks the group as an editable curved line.
    #[serde(default = "default_true")]
    pub is_curved_line: bool,
    #[serde(default)]
    pub is_edit_mode: bool,
    #[serde(default)]
    pub controls: TransformControls,
    /// Whether the control handle and its guide lines are shown.
    #[serde(default)]
    pub control_visible: bool,
    #[serde(default)]
    pub control_selected: bool,
    pub style: ShapeStyle,
}

fn default_true() -> bool {
    true
}

impl CurvedLine {
    pub fn new(start: Point, end: Point, control: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            control,
            is_curved_line: true,
            is_edit_mode: false,
            controls: TransformControls::default(),
            control_visible: false,
            control_selected: false,
            style: ShapeStyle::default(),
        }
    }

    /// A curve whose control point sits `bend` off the chord midpoint.
    pub fn with_bend(start: Point, end: Point, bend: f64) -> Self {
        let chord = end - start;
        let len = chord.hypot();
        let control = if len < f64::EPSILON {
            start.midpoint(end)
        } else {
            start.midpoint(end) + kurbo::Vec2::new(chord.y, -chord.x) * (bend / len)
        };
        Self::new(start, end, control)
    }

    pub fn curve(&self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    /// Point on the curve at parameter `t` in 0..=1.
    pub fn point_at(&self, t: f64) -> Point {
        self.curve().eval(t.clamp(0.0, 1.0))
    }

    /// Midpoint of the curve.
    pub fn apex(&self) -> Point {
        self.point_at(0.5)
    }

    /// Dashed guides from the control point to each fixed endpoint.
    pub fn guide_lines(&self) -> [LineSegment; 2] {
        [
            LineSegment::from_points(self.control, self.start),
            LineSegment::from_points(self.control, self.end),
        ]
    }

    /// SVG path data for the curve.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

impl ShapeTrait for CurvedLine {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.curve().bounding_box()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = self.curve().nearest(point, 1e-6);
        nearest.distance_sq.sqrt() <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.quad_to(self.control, self.end);
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
        self.control = affine * self.control;
    }
}
