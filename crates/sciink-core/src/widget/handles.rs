//! Handle and guide-line definitions for edit overlays.

use crate::geometry::LineSegment;
use crate::shapes::{ControlHandle, StrokeStyle};
use kurbo::Point;

/// A manipulation handle drawn over the object being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position in canvas coordinates.
    pub position: Point,
    /// Visual shape of the handle.
    pub shape: HandleShape,
    pub selected: bool,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Anchor point of a bezier path, by anchor id.
    Anchor(String),
    /// Control handle attached to an anchor.
    Control(String, ControlHandle),
    /// The single control point of a curved line.
    CurveControl,
}

/// Visual shape of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleShape {
    /// Square handle (corner anchors).
    #[default]
    Square,
    /// Circular handle (smooth anchors and control points).
    Circle,
    /// Diamond handle (curved-line control point).
    Diamond,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self {
            kind,
            position,
            shape: HandleShape::default(),
            selected: false,
        }
    }

    /// Set the handle shape.
    pub fn with_shape(mut self, shape: HandleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Whether `point` lies within `tolerance` of the handle.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= tolerance
    }
}

/// What a guide line connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideKind {
    /// Anchor to one of its control handles.
    HandleArm,
    /// Curved-line control point to a fixed endpoint.
    CurveGuide,
    /// Alignment guide across the canvas.
    Alignment,
}

/// A non-interactive line drawn as part of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub kind: GuideKind,
    pub line: LineSegment,
    pub style: StrokeStyle,
}

impl GuideLine {
    pub fn new(kind: GuideKind, line: LineSegment) -> Self {
        let style = match kind {
            GuideKind::HandleArm => StrokeStyle::Solid,
            GuideKind::CurveGuide | GuideKind::Alignment => StrokeStyle::Dashed,
        };
        Self { kind, line, style }
    }
}
