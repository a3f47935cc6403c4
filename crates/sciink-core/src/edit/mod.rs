//! Edit modes for reshaping paths and curved lines.
//!
//! An edit mode takes exclusive ownership of the object being edited while
//! it is active and hands it back on exit. Only the abstract geometry lives
//! here; visual handles are derived per frame by [`crate::widget`].

mod bezier;
mod curved_line;

pub use bezier::BezierEditMode;
pub use curved_line::CurvedLineEditMode;

use crate::shapes::ControlHandle;

/// What a pointer position hit while editing.
#[derive(Debug, Clone, PartialEq)]
pub enum EditHit {
    /// An anchor of the edited path.
    Anchor(String),
    /// A control handle of an anchor.
    Control(String, ControlHandle),
    /// A point on a path segment.
    Segment { index: usize, t: f64 },
    /// The control point of a curved line.
    CurveControl,
}
