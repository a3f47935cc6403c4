//! Visual overlay derivation for edit modes.
//!
//! Edit modes only hold abstract geometry. Every frame the overlay is derived
//! again from that geometry:
//! - one handle per bezier anchor, shaped by its point type
//! - control handles and their arms for the selected anchor
//! - the curved-line control handle with dashed guides to both endpoints
//! - alignment guides while an object is moved
//!
//! Nothing derived here is stored back on the shapes.

mod handles;

pub use handles::{GuideKind, GuideLine, Handle, HandleKind, HandleShape};

use crate::edit::{BezierEditMode, CurvedLineEditMode};
use crate::geometry::LineSegment;
use crate::guides::AlignmentGuide;
use crate::shapes::{ControlHandle, PointType};
use kurbo::Point;

/// Handles and guide lines for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOverlay {
    pub handles: Vec<Handle>,
    pub guides: Vec<GuideLine>,
}

impl EditOverlay {
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty() && self.guides.is_empty()
    }

    /// Append another overlay.
    pub fn extend(&mut self, other: EditOverlay) {
        self.handles.extend(other.handles);
        self.guides.extend(other.guides);
    }

    /// Topmost handle under `point`. Later handles draw above earlier ones.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<&Handle> {
        self.handles.iter().rev().find(|h| h.contains(point, tolerance))
    }
}

/// Overlay for a bezier path in edit mode.
pub fn bezier_edit_handles(mode: &BezierEditMode) -> EditOverlay {
    let mut overlay = EditOverlay::default();
    let Some(path) = mode.target() else {
        return overlay;
    };
    let selected = mode.selected_anchor_id();

    for point in &path.points {
        let shape = match point.point_type {
            PointType::Smooth => HandleShape::Circle,
            PointType::Corner => HandleShape::Square,
        };
        let is_selected = selected == Some(point.id.as_str());
        overlay.handles.push(
            Handle::new(HandleKind::Anchor(point.id.clone()), point.position())
                .with_shape(shape)
                .with_selected(is_selected),
        );
    }

    // Control handles go last so they win hit tests over anchors.
    if let Some(anchor) = mode.selected_anchor() {
        for which in [ControlHandle::In, ControlHandle::Out] {
            let Some(control) = anchor.control(which) else {
                continue;
            };
            overlay.guides.push(GuideLine::new(
                GuideKind::HandleArm,
                LineSegment::from_points(anchor.position(), control),
            ));
            overlay.handles.push(
                Handle::new(HandleKind::Control(anchor.id.clone(), which), control)
                    .with_shape(HandleShape::Circle),
            );
        }
    }

    overlay
}

/// Overlay for a curved line in edit mode.
pub fn curved_line_handles(mode: &CurvedLineEditMode) -> EditOverlay {
    let mut overlay = EditOverlay::default();
    let Some(line) = mode.target() else {
        return overlay;
    };
    if !line.control_visible {
        return overlay;
    }

    for guide in line.guide_lines() {
        overlay.guides.push(GuideLine::new(GuideKind::CurveGuide, guide));
    }
    overlay.handles.push(
        Handle::new(HandleKind::CurveControl, line.control)
            .with_shape(HandleShape::Diamond)
            .with_selected(line.control_selected),
    );
    overlay
}

/// Guide lines for the current alignment guides.
pub fn alignment_guide_lines(guides: &[AlignmentGuide]) -> Vec<GuideLine> {
    guides
        .iter()
        .map(|g| GuideLine::new(GuideKind::Alignment, g.line()))
        .collect()
}

/// Everything the active edit modes and guides need drawn this frame.
pub fn edit_handles(
    bezier: &BezierEditMode,
    curved: &CurvedLineEditMode,
    guides: &[AlignmentGuide],
) -> EditOverlay {
    let mut overlay = bezier_edit_handles(bezier);
    overlay.extend(curved_line_handles(curved));
    overlay.guides.extend(alignment_guide_lines(guides));
    overlay
}
