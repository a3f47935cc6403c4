//! Alignment guides shown while moving an object on the canvas.

use crate::geometry::LineSegment;
use kurbo::{Point, Rect, Size, Vec2};

/// Distance (in canvas units) within which edges and centers align.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// Positions closer than this are treated as the same guide.
const MERGE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// Constant x, spans the canvas height.
    Vertical,
    /// Constant y, spans the canvas width.
    Horizontal,
}

/// A guide line spanning the whole canvas along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentGuide {
    pub orientation: GuideOrientation,
    /// x for vertical guides, y for horizontal guides.
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

impl AlignmentGuide {
    pub fn vertical(x: f64, height: f64) -> Self {
        Self {
            orientation: GuideOrientation::Vertical,
            position: x,
            start: 0.0,
            end: height,
        }
    }

    pub fn horizontal(y: f64, width: f64) -> Self {
        Self {
            orientation: GuideOrientation::Horizontal,
            position: y,
            start: 0.0,
            end: width,
        }
    }

    pub fn line(&self) -> LineSegment {
        match self.orientation {
            GuideOrientation::Vertical => {
                LineSegment::new(self.position, self.start, self.position, self.end)
            }
            GuideOrientation::Horizontal => {
                LineSegment::new(self.start, self.position, self.end, self.position)
            }
        }
    }
}

/// Another object on the canvas the moving object may align with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideCandidate {
    pub bounds: Rect,
    /// Grid lines, rulers and existing guides never produce guides.
    pub decoration: bool,
}

impl GuideCandidate {
    pub fn object(bounds: Rect) -> Self {
        Self {
            bounds,
            decoration: false,
        }
    }

    pub fn decoration(bounds: Rect) -> Self {
        Self {
            bounds,
            decoration: true,
        }
    }
}

/// Left, center and right x coordinates.
fn x_stops(rect: Rect) -> [f64; 3] {
    [rect.x0, rect.center().x, rect.x1]
}

/// Top, center and bottom y coordinates.
fn y_stops(rect: Rect) -> [f64; 3] {
    [rect.y0, rect.center().y, rect.y1]
}

fn push_unique(guides: &mut Vec<AlignmentGuide>, guide: AlignmentGuide) {
    let duplicate = guides.iter().any(|g| {
        g.orientation == guide.orientation && (g.position - guide.position).abs() < MERGE_EPSILON
    });
    if !duplicate {
        guides.push(guide);
    }
}

/// Pairs of corresponding stops `(moving, candidate)` within `threshold`.
fn matching_stops(moving: [f64; 3], target: [f64; 3], threshold: f64) -> impl Iterator<Item = (f64, f64)> {
    moving
        .into_iter()
        .zip(target)
        .filter(move |(m, t)| (m - t).abs() <= threshold)
}

/// Find the guides for `moving` against every non-decoration candidate.
///
/// The moving object's left, center and right are each compared with the
/// same stop of a candidate; a match within `threshold` produces a vertical
/// guide at the candidate's coordinate. Top, center and bottom work the same
/// way for horizontal guides. Guides at the same coordinate are merged.
pub fn detect_alignment_guides(
    moving: Rect,
    candidates: &[GuideCandidate],
    threshold: f64,
    canvas: Size,
) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();

    for candidate in candidates.iter().filter(|c| !c.decoration) {
        for (_, x) in matching_stops(x_stops(moving), x_stops(candidate.bounds), threshold) {
            push_unique(&mut guides, AlignmentGuide::vertical(x, canvas.height));
        }
        for (_, y) in matching_stops(y_stops(moving), y_stops(candidate.bounds), threshold) {
            push_unique(&mut guides, AlignmentGuide::horizontal(y, canvas.width));
        }
    }

    guides
}

/// Smallest offset per axis that brings one of `moving`'s stops onto the
/// corresponding stop of a candidate within `threshold`; zero on axes with
/// no match.
pub fn snap_offset(moving: Rect, candidates: &[GuideCandidate], threshold: f64) -> Vec2 {
    let mut best_x: Option<f64> = None;
    let mut best_y: Option<f64> = None;
    let closer = |best: Option<f64>, delta: f64| best.is_none_or(|b| delta.abs() < b.abs());

    for candidate in candidates.iter().filter(|c| !c.decoration) {
        for (m, t) in matching_stops(x_stops(moving), x_stops(candidate.bounds), threshold) {
            if closer(best_x, t - m) {
                best_x = Some(t - m);
            }
        }
        for (m, t) in matching_stops(y_stops(moving), y_stops(candidate.bounds), threshold) {
            if closer(best_y, t - m) {
                best_y = Some(t - m);
            }
        }
    }
    Vec2::new(best_x.unwrap_or(0.0), best_y.unwrap_or(0.0))
}

/// The guides currently drawn for a move in progress.
///
/// Each update replaces the previous guides; nothing accumulates across
/// frames.
#[derive(Debug, Clone, Default)]
pub struct GuideOverlay {
    guides: Vec<AlignmentGuide>,
    threshold: Option<f64>,
}

impl GuideOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            guides: Vec::new(),
            threshold: Some(threshold),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_SNAP_THRESHOLD)
    }

    /// Recompute guides for an object being moved or modified.
    pub fn update(&mut self, moving: Rect, candidates: &[GuideCandidate], canvas: Size) -> &[AlignmentGuide] {
        self.guides = detect_alignment_guides(moving, candidates, self.threshold(), canvas);
        &self.guides
    }

    /// Drop all guides, e.g. when the selection changes or the move ends.
    pub fn clear(&mut self) {
        self.guides.clear();
    }

    pub fn guides(&self) -> &[AlignmentGuide] {
        &self.guides
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}

/// Convenience for an anchor point as a zero-size rect.
pub fn point_bounds(point: Point) -> Rect {
    Rect::from_points(point, point)
}
