//! Canvas host abstraction.

use kurbo::BezPath;
use peniko::Color;
use sciink_core::widget::{GuideKind, HandleKind};
use std::fmt;
use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown object: {0}")]
    UnknownObject(ObjectId),
    #[error("Host error: {0}")]
    Host(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Identifier the host hands out for an added object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an overlay object stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayRole {
    Handle(HandleKind),
    Guide(GuideKind),
}

/// A transient object drawn over the canvas.
#[derive(Debug, Clone)]
pub struct OverlayObject {
    pub role: OverlayRole,
    /// Outline in canvas coordinates.
    pub path: BezPath,
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
    /// Dash pattern; empty for a solid stroke.
    pub dash: Vec<f64>,
    /// Whether the host lets the pointer pick this object.
    pub selectable: bool,
}

/// Retained scene graph the overlay is drawn into.
pub trait CanvasHost {
    /// Add an object and return its id.
    fn add_object(&mut self, object: OverlayObject) -> RenderResult<ObjectId>;

    /// Remove a previously added object.
    fn remove_object(&mut self, id: ObjectId) -> RenderResult<()>;

    /// Mark an object as the active one, or clear the active object.
    fn set_active_object(&mut self, id: Option<ObjectId>) -> RenderResult<()>;

    /// Ask the host to redraw.
    fn request_render(&mut self);
}
