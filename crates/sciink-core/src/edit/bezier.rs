//! Anchor editing for bezier paths.

use super::EditHit;
use crate::shapes::{BezierPath, BezierPoint, ControlHandle, MIN_ANCHORS, PointType, Shape};
use kurbo::Point;

/// Edit mode for a single bezier path.
///
/// Inactive until a path is activated; every mutation is a no-op while
/// inactive.
#[derive(Debug, Default)]
pub struct BezierEditMode {
    target: Option<BezierPath>,
}

impl BezierEditMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `shape`.
    ///
    /// Only bezier paths with at least [`MIN_ANCHORS`] anchors are accepted;
    /// anything else is handed back untouched in `Err`. If another path was
    /// being edited it is exited and returned in `Ok`.
    pub fn activate(&mut self, shape: Shape) -> Result<Option<BezierPath>, Shape> {
        let mut path = match shape {
            Shape::BezierPath(path) if path.len() >= MIN_ANCHORS => path,
            Shape::BezierPath(path) => {
                log::warn!(
                    "Cannot edit bezier path {} with {} anchors",
                    path.id,
                    path.len()
                );
                return Err(Shape::BezierPath(path));
            }
            other => {
                log::warn!("Bezier edit mode requires a bezier path, got shape {}", other.id());
                return Err(other);
            }
        };

        let previous = self.deactivate();
        path.is_edit_mode = true;
        path.selected_anchor_id = None;
        log::debug!("Entered bezier edit mode for {}", path.id);
        self.target = Some(path);
        Ok(previous)
    }

    /// Stop editing and hand the path back with its edit flags cleared.
    pub fn deactivate(&mut self) -> Option<BezierPath> {
        let mut path = self.target.take()?;
        path.is_edit_mode = false;
        path.selected_anchor_id = None;
        log::debug!("Exited bezier edit mode for {}", path.id);
        Some(path)
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// The path being edited.
    pub fn target(&self) -> Option<&BezierPath> {
        self.target.as_ref()
    }

    pub fn selected_anchor_id(&self) -> Option<&str> {
        self.target.as_ref()?.selected_anchor_id.as_deref()
    }

    pub fn selected_anchor(&self) -> Option<&BezierPoint> {
        let path = self.target.as_ref()?;
        path.point(path.selected_anchor_id.as_deref()?)
    }

    /// Select one anchor, replacing any previous selection.
    pub fn select_anchor(&mut self, id: &str) -> bool {
        let Some(path) = self.target.as_mut() else {
            return false;
        };
        if path.index_of(id).is_none() {
            return false;
        }
        path.selected_anchor_id = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        if let Some(path) = self.target.as_mut() {
            path.selected_anchor_id = None;
        }
    }

    /// Flip an anchor between smooth and corner.
    ///
    /// Becoming smooth re-aligns the handles through the anchor; becoming a
    /// corner leaves them where they are. Returns the new type.
    pub fn toggle_point_type(&mut self, id: &str) -> Option<PointType> {
        let path = self.target.as_mut()?;
        let index = path.index_of(id)?;
        let (prev, next) = path.neighbours(index);

        let point = &mut path.points[index];
        point.point_type = point.point_type.toggled();
        if point.point_type == PointType::Smooth {
            point.align_handles(prev, next);
        }
        log::debug!("Anchor {} is now {:?}", id, point.point_type);
        Some(point.point_type)
    }

    /// Whether deleting an anchor is currently allowed.
    pub fn can_delete_anchor(&self) -> bool {
        self.target.as_ref().is_some_and(|p| p.len() > MIN_ANCHORS)
    }

    /// Remove an anchor. Refused (returns `false`) below [`MIN_ANCHORS`].
    pub fn delete_anchor_point(&mut self, id: &str) -> bool {
        let Some(path) = self.target.as_mut() else {
            return false;
        };
        let removed = path.remove_point(id);
        if removed {
            log::debug!("Deleted anchor {} ({} left)", id, path.len());
        }
        removed
    }

    /// Remove the selected anchor, if any.
    pub fn delete_selected_anchor(&mut self) -> bool {
        match self.selected_anchor_id().map(str::to_string) {
            Some(id) => self.delete_anchor_point(&id),
            None => false,
        }
    }

    /// Insert a smooth anchor on the segment closest to `click`.
    ///
    /// The click must be within `tolerance` of the path. The new anchor
    /// becomes the selection; its id is returned.
    pub fn add_anchor_point(&mut self, click: Point, tolerance: f64) -> Option<String> {
        let path = self.target.as_mut()?;
        let (segment, t, dist) = path.nearest_segment(click)?;
        if dist > tolerance {
            return None;
        }
        let id = path.split_segment(segment, t)?;
        path.selected_anchor_id = Some(id.clone());
        log::debug!("Inserted anchor {} on segment {}", id, segment);
        Some(id)
    }

    /// Move an anchor to `to`; its handles follow.
    pub fn move_anchor(&mut self, id: &str, to: Point) -> bool {
        let Some(point) = self.target.as_mut().and_then(|p| p.point_mut(id)) else {
            return false;
        };
        let delta = to - point.position();
        point.translate(delta);
        true
    }

    /// Move one control handle of an anchor.
    ///
    /// On a smooth anchor the opposite handle swings to stay collinear,
    /// keeping its own length.
    pub fn move_control_point(&mut self, id: &str, handle: ControlHandle, to: Point) -> bool {
        let Some(point) = self.target.as_mut().and_then(|p| p.point_mut(id)) else {
            return false;
        };
        *point.control_mut(handle) = Some(to);

        if point.point_type == PointType::Smooth {
            let anchor = point.position();
            let offset = to - anchor;
            if offset.hypot2() > f64::EPSILON {
                let dir = offset.normalize();
                let opposite_len = point
                    .control(handle.opposite())
                    .map(|h| h.distance(anchor))
                    .unwrap_or_else(|| offset.hypot());
                *point.control_mut(handle.opposite()) = Some(anchor - dir * opposite_len);
            }
        }
        true
    }

    /// Find what lies under `point`.
    ///
    /// Control handles win over anchors, anchors over segments.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<EditHit> {
        let path = self.target.as_ref()?;
        let within = |p: Point| p.distance(point) <= tolerance;

        for anchor in &path.points {
            for handle in [ControlHandle::In, ControlHandle::Out] {
                if anchor.control(handle).is_some_and(within) {
                    return Some(EditHit::Control(anchor.id.clone(), handle));
                }
            }
        }
        if let Some(anchor) = path.points.iter().find(|a| within(a.position())) {
            return Some(EditHit::Anchor(anchor.id.clone()));
        }
        path.nearest_segment(point)
            .filter(|(_, _, dist)| *dist <= tolerance)
            .map(|(index, t, _)| EditHit::Segment { index, t })
    }
}
