//! Alignment and distribution of bounding boxes.
//!
//! All functions are pure: they take the boxes in selection order and return
//! a new vector of repositioned or resized boxes.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of an object at the time of a layout operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Edge or center to align a selection on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

/// Which axis a distribution runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn pos(self, b: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => b.x,
            Axis::Vertical => b.y,
        }
    }

    fn size(self, b: &BoundingBox) -> f64 {
        match self {
            Axis::Horizontal => b.width,
            Axis::Vertical => b.height,
        }
    }

    fn set_pos(self, b: &mut BoundingBox, value: f64) {
        match self {
            Axis::Horizontal => b.x = value,
            Axis::Vertical => b.y = value,
        }
    }
}

/// Spread boxes so the gaps between consecutive facing edges are equal.
///
/// The first and last boxes keep their position.
fn distribute(objects: &[BoundingBox], axis: Axis) -> Vec<BoundingBox> {
    let mut result = objects.to_vec();
    let n = objects.len();
    if n < 3 {
        return result;
    }

    let first = &objects[0];
    let last = &objects[n - 1];
    let span = axis.pos(last) + axis.size(last) - axis.pos(first);
    let occupied: f64 = objects.iter().map(|b| axis.size(b)).sum();
    let gap = (span - occupied) / (n - 1) as f64;

    let mut cursor = axis.pos(first) + axis.size(first) + gap;
    for b in result.iter_mut().take(n - 1).skip(1) {
        axis.set_pos(b, cursor);
        cursor += axis.size(b) + gap;
    }
    result
}

/// Distribute boxes horizontally with equal gaps between them.
pub fn distribute_horizontally(objects: &[BoundingBox]) -> Vec<BoundingBox> {
    distribute(objects, Axis::Horizontal)
}

/// Distribute boxes vertically with equal gaps between them.
pub fn distribute_vertically(objects: &[BoundingBox]) -> Vec<BoundingBox> {
    distribute(objects, Axis::Vertical)
}

/// Set every box's width to `target_width`.
pub fn match_width(objects: &[BoundingBox], target_width: f64) -> Vec<BoundingBox> {
    objects
        .iter()
        .map(|b| BoundingBox { width: target_width, ..*b })
        .collect()
}

/// Set every box's height to `target_height`.
pub fn match_height(objects: &[BoundingBox], target_height: f64) -> Vec<BoundingBox> {
    objects
        .iter()
        .map(|b| BoundingBox { height: target_height, ..*b })
        .collect()
}

/// Union of all boxes, or `None` for an empty selection.
pub fn selection_bounds(objects: &[BoundingBox]) -> Option<Rect> {
    objects
        .iter()
        .map(BoundingBox::to_rect)
        .reduce(|acc, r| acc.union(r))
}

/// Align boxes to an edge or center of the selection bounds.
pub fn align_boxes(objects: &[BoundingBox], alignment: Alignment) -> Vec<BoundingBox> {
    let Some(bounds) = selection_bounds(objects) else {
        return Vec::new();
    };
    let center = bounds.center();

    objects
        .iter()
        .map(|b| {
            let mut out = *b;
            match alignment {
                Alignment::Left => out.x = bounds.x0,
                Alignment::CenterHorizontal => out.x = center.x - b.width / 2.0,
                Alignment::Right => out.x = bounds.x1 - b.width,
                Alignment::Top => out.y = bounds.y0,
                Alignment::CenterVertical => out.y = center.y - b.height / 2.0,
                Alignment::Bottom => out.y = bounds.y1 - b.height,
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaps_x(boxes: &[BoundingBox]) -> Vec<f64> {
        boxes.windows(2).map(|w| w[1].x - w[0].right()).collect()
    }

    fn gaps_y(boxes: &[BoundingBox]) -> Vec<f64> {
        boxes.windows(2).map(|w| w[1].y - w[0].bottom()).collect()
    }

    #[test]
    fn test_distribute_horizontally_equal_gaps() {
        let boxes = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(15.0, 5.0, 30.0, 10.0),
            BoundingBox::new(50.0, 0.0, 5.0, 20.0),
            BoundingBox::new(100.0, 3.0, 20.0, 10.0),
        ];
        let result = distribute_horizontally(&boxes);
        let gaps = gaps_x(&result);
        for g in &gaps {
            assert!((g - gaps[0]).abs() < 1e-9);
        }
        assert_eq!(result[0], boxes[0]);
        assert_eq!(result[3], boxes[3]);
        for (a, b) in result.iter().zip(&boxes) {
            assert_eq!(a.width, b.width);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_distribute_vertically_equal_gaps() {
        let boxes = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(0.0, 12.0, 10.0, 40.0),
            BoundingBox::new(0.0, 200.0, 10.0, 25.0),
        ];
        let result = distribute_vertically(&boxes);
        let gaps = gaps_y(&result);
        assert!((gaps[0] - gaps[1]).abs() < 1e-9);
        assert_eq!(result[0].y, 0.0);
        assert_eq!(result[2].y, 200.0);
    }

    #[test]
    fn test_distribute_two_boxes_unchanged() {
        let boxes = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(40.0, 0.0, 10.0, 10.0),
        ];
        assert_eq!(distribute_horizontally(&boxes), boxes);
    }

    #[test]
    fn test_match_width_and_height() {
        let boxes = vec![
            BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            BoundingBox::new(5.0, 6.0, 7.0, 8.0),
        ];
        let widths = match_width(&boxes, 50.0);
        for (a, b) in widths.iter().zip(&boxes) {
            assert_eq!(a.width, 50.0);
            assert_eq!((a.x, a.y, a.height), (b.x, b.y, b.height));
        }
        let heights = match_height(&boxes, 12.5);
        for (a, b) in heights.iter().zip(&boxes) {
            assert_eq!(a.height, 12.5);
            assert_eq!((a.x, a.y, a.width), (b.x, b.y, b.width));
        }
    }

    #[test]
    fn test_align_boxes() {
        let boxes = vec![
            BoundingBox::new(10.0, 0.0, 20.0, 10.0),
            BoundingBox::new(50.0, 30.0, 10.0, 10.0),
        ];
        let left = align_boxes(&boxes, Alignment::Left);
        assert!(left.iter().all(|b| b.x == 10.0));

        let right = align_boxes(&boxes, Alignment::Right);
        assert!(right.iter().all(|b| b.right() == 60.0));

        let middle = align_boxes(&boxes, Alignment::CenterVertical);
        assert!(middle.iter().all(|b| (b.center_y() - 20.0).abs() < 1e-9));
    }

    #[test]
    fn test_input_not_mutated() {
        let boxes = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(11.0, 0.0, 10.0, 10.0),
            BoundingBox::new(90.0, 0.0, 10.0, 10.0),
        ];
        let copy = boxes.clone();
        let _ = distribute_horizontally(&boxes);
        assert_eq!(boxes, copy);
    }
}
