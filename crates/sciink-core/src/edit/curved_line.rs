//! Control-point editing for curved lines.

use super::EditHit;
use crate::geometry::LineSegment;
use crate::shapes::{CurvedLine, Shape, TransformControls};
use kurbo::Point;

/// Edit mode for a single curved line.
///
/// While active the line's transform controls are hidden and scaling and
/// rotation are locked; the control handle and guide lines are shown.
#[derive(Debug, Default)]
pub struct CurvedLineEditMode {
    target: Option<CurvedLine>,
    /// Transform controls to restore on exit.
    saved_controls: TransformControls,
    dragging: bool,
}

impl CurvedLineEditMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `shape`.
    ///
    /// Only shapes flagged as curved lines are accepted; anything else is
    /// handed back untouched in `Err`. A previously edited line is exited
    /// and returned in `Ok`.
    pub fn activate(&mut self, shape: Shape) -> Result<Option<CurvedLine>, Shape> {
        let mut line = match shape {
            Shape::CurvedLine(line) if line.is_curved_line => line,
            other => {
                log::warn!("Curved line edit mode requires a curved line, got shape {}", other.id());
                return Err(other);
            }
        };

        let previous = self.deactivate();
        self.saved_controls = line.controls;
        line.is_edit_mode = true;
        line.controls = TransformControls {
            has_controls: false,
            lock_scaling: true,
            lock_rotation: true,
            selectable_parts: false,
        };
        line.control_visible = true;
        line.control_selected = false;
        log::debug!("Entered curved line edit mode for {}", line.id);
        self.target = Some(line);
        Ok(previous)
    }

    /// Stop editing and hand the line back with its original controls.
    pub fn deactivate(&mut self) -> Option<CurvedLine> {
        let mut line = self.target.take()?;
        line.is_edit_mode = false;
        line.controls = self.saved_controls;
        line.control_visible = false;
        line.control_selected = false;
        self.dragging = false;
        log::debug!("Exited curved line edit mode for {}", line.id);
        Some(line)
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&CurvedLine> {
        self.target.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<EditHit> {
        let line = self.target.as_ref()?;
        (line.control.distance(point) <= tolerance).then_some(EditHit::CurveControl)
    }

    /// Begin dragging if `point` grabs the control handle.
    pub fn begin_drag(&mut self, point: Point, tolerance: f64) -> bool {
        if self.hit_test(point, tolerance).is_none() {
            return false;
        }
        if let Some(line) = self.target.as_mut() {
            line.control_selected = true;
        }
        self.dragging = true;
        true
    }

    /// Move the control point; the endpoints stay fixed.
    pub fn drag_control_point(&mut self, to: Point) -> bool {
        let Some(line) = self.target.as_mut() else {
            return false;
        };
        line.control = to;
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn curve_point_at(&self, t: f64) -> Option<Point> {
        self.target.as_ref().map(|line| line.point_at(t))
    }

    pub fn apex(&self) -> Option<Point> {
        self.target.as_ref().map(CurvedLine::apex)
    }

    pub fn to_path_data(&self) -> Option<String> {
        self.target.as_ref().map(CurvedLine::to_path_data)
    }

    /// Current guide lines from the control point to both endpoints.
    pub fn guide_lines(&self) -> Option<[LineSegment; 2]> {
        self.target.as_ref().map(CurvedLine::guide_lines)
    }
}
