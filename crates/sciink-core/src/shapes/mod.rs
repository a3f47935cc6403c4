//! Editable vector shapes.

mod bezier;
mod curved_line;

pub use bezier::{BezierPath, BezierPoint, ControlHandle, MIN_ANCHORS, PointType};
pub use curved_line::{CurvedLine, TransformControls};

use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style for paths and guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            fill_color: None,
            stroke_style: StrokeStyle::default(),
            opacity: 1.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    BezierPath(BezierPath),
    CurvedLine(CurvedLine),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::BezierPath(s) => s.id(),
            Shape::CurvedLine(s) => s.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::BezierPath(s) => s.bounds(),
            Shape::CurvedLine(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::BezierPath(s) => s.hit_test(point, tolerance),
            Shape::CurvedLine(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::BezierPath(s) => s.to_path(),
            Shape::CurvedLine(s) => s.to_path(),
        }
    }

    /// SVG path data for the host renderer.
    pub fn to_path_data(&self) -> String {
        self.to_path().to_svg()
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::BezierPath(s) => s.style(),
            Shape::CurvedLine(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::BezierPath(s) => s.style_mut(),
            Shape::CurvedLine(s) => s.style_mut(),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::BezierPath(s) => s.transform(affine),
            Shape::CurvedLine(s) => s.transform(affine),
        }
    }

    pub fn as_bezier_path(&self) -> Option<&BezierPath> {
        match self {
            Shape::BezierPath(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_curved_line(&self) -> Option<&CurvedLine> {
        match self {
            Shape::CurvedLine(l) => Some(l),
            _ => None,
        }
    }
}

impl From<BezierPath> for Shape {
    fn from(path: BezierPath) -> Self {
        Shape::BezierPath(path)
    }
}

impl From<CurvedLine> for Shape {
    fn from(line: CurvedLine) -> Self {
        Shape::CurvedLine(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_dispatch() {
        let path = BezierPath::from_anchors(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        let id = path.id();
        let shape: Shape = path.into();
        assert_eq!(shape.id(), id);
        assert!(shape.as_bezier_path().is_some());
        assert!(shape.as_curved_line().is_none());
        assert!(shape.to_path_data().starts_with('M'));
    }

    #[test]
    fn test_shape_serde() {
        let line = CurvedLine::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, -5.0));
        let shape = Shape::from(line);
        let json = serde_json::to_string(&shape).unwrap();
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), shape.id());
    }

    #[test]
    fn test_style_colors() {
        let mut style = ShapeStyle::default();
        style.set_fill(Some(Color::from_rgba8(1, 2, 3, 255)));
        assert_eq!(style.fill_color, Some(SerializableColor::new(1, 2, 3, 255)));
        assert_eq!(SerializableColor::from(style.stroke()), SerializableColor::black());

        style.set_stroke(Color::from_rgba8(200, 10, 20, 128));
        assert_eq!(style.stroke_color, SerializableColor::new(200, 10, 20, 128));
        assert_eq!(style.stroke().to_rgba8(), Color::from_rgba8(200, 10, 20, 128).to_rgba8());
    }
}
