//! Edit overlay rendering.

use crate::host::{CanvasHost, ObjectId, OverlayObject, OverlayRole, RenderError, RenderResult};
use kurbo::{BezPath, Circle, Point, Rect, Shape as _};
use peniko::Color;
use sciink_core::settings::EditorSettings;
use sciink_core::shapes::StrokeStyle;
use sciink_core::widget::{EditOverlay, GuideLine, Handle, HandleShape};

/// Colors and sizes for overlay objects.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    /// Handle size in canvas units.
    pub handle_size: f64,
    /// Handle outline and selected-handle fill.
    pub selection_color: Color,
    pub handle_fill: Color,
    pub guide_color: Color,
    pub guide_width: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            handle_size: EditorSettings::default().handle_size,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            handle_fill: Color::WHITE,
            guide_color: Color::from_rgba8(236, 72, 153, 255), // Pink
            guide_width: 1.0,
        }
    }
}

impl OverlayStyle {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            handle_size: settings.handle_size,
            ..Self::default()
        }
    }

    /// Set the selection color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Set the guide color.
    pub fn with_guide_color(mut self, color: Color) -> Self {
        self.guide_color = color;
        self
    }
}

fn handle_path(handle: &Handle, size: f64) -> BezPath {
    let half = size / 2.0;
    let pos = handle.position;
    match handle.shape {
        HandleShape::Square => {
            Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half).to_path(0.1)
        }
        HandleShape::Circle => Circle::new(pos, half).to_path(0.1),
        HandleShape::Diamond => {
            let mut path = BezPath::new();
            path.move_to(Point::new(pos.x, pos.y - half));
            path.line_to(Point::new(pos.x + half, pos.y));
            path.line_to(Point::new(pos.x, pos.y + half));
            path.line_to(Point::new(pos.x - half, pos.y));
            path.close_path();
            path
        }
    }
}

fn dash_pattern(style: StrokeStyle) -> Vec<f64> {
    match style {
        StrokeStyle::Solid => Vec::new(),
        StrokeStyle::Dashed => vec![4.0, 4.0],
        StrokeStyle::Dotted => vec![1.0, 3.0],
    }
}

/// Draws an [`EditOverlay`] into a [`CanvasHost`].
///
/// Each frame removes every object added by the previous frame before adding
/// the new ones, so the host never holds stale handles or guides.
#[derive(Debug, Default)]
pub struct OverlayRenderer {
    style: OverlayStyle,
    live: Vec<ObjectId>,
}

impl OverlayRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            live: Vec::new(),
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Objects currently on the host for this overlay.
    pub fn live_objects(&self) -> &[ObjectId] {
        &self.live
    }

    fn handle_object(&self, handle: &Handle) -> OverlayObject {
        let fill = if handle.selected {
            self.style.selection_color
        } else {
            self.style.handle_fill
        };
        OverlayObject {
            role: OverlayRole::Handle(handle.kind.clone()),
            path: handle_path(handle, self.style.handle_size),
            fill: Some(fill),
            stroke: self.style.selection_color,
            stroke_width: 1.5,
            dash: Vec::new(),
            selectable: true,
        }
    }

    fn guide_object(&self, guide: &GuideLine) -> OverlayObject {
        let line = guide.line;
        let mut path = BezPath::new();
        path.move_to(line.start());
        path.line_to(line.end());
        OverlayObject {
            role: OverlayRole::Guide(guide.kind),
            path,
            fill: None,
            stroke: self.style.guide_color,
            stroke_width: self.style.guide_width,
            dash: dash_pattern(guide.style),
            selectable: false,
        }
    }

    /// Remove everything drawn by the previous frame.
    ///
    /// Every object is attempted even if an earlier removal fails; the first
    /// error is returned. Objects the host no longer knows are forgotten,
    /// objects it failed to remove stay tracked for the next attempt.
    pub fn clear(&mut self, host: &mut dyn CanvasHost) -> RenderResult<()> {
        let mut first_error = None;
        let mut kept = Vec::new();
        for id in self.live.drain(..) {
            match host.remove_object(id) {
                Ok(()) => {}
                Err(err) => {
                    log::warn!("Failed to remove overlay object {}: {}", id, err);
                    if !matches!(err, RenderError::UnknownObject(_)) {
                        kept.push(id);
                    }
                    first_error.get_or_insert(err);
                }
            }
        }
        self.live = kept;
        first_error.map_or(Ok(()), Err)
    }

    /// Replace the previous frame's overlay with `overlay`.
    ///
    /// Guides are added before handles so handles sit on top. A selected
    /// handle becomes the host's active object.
    pub fn render_frame(&mut self, host: &mut dyn CanvasHost, overlay: &EditOverlay) -> RenderResult<()> {
        self.clear(host)?;

        for guide in &overlay.guides {
            let id = host.add_object(self.guide_object(guide))?;
            self.live.push(id);
        }

        let mut active = None;
        for handle in &overlay.handles {
            let id = host.add_object(self.handle_object(handle))?;
            self.live.push(id);
            if handle.selected {
                active = Some(id);
            }
        }
        host.set_active_object(active)?;
        host.request_render();

        log::debug!(
            "Overlay frame: {} guides, {} handles",
            overlay.guides.len(),
            overlay.handles.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingHost;
    use sciink_core::edit::{BezierEditMode, CurvedLineEditMode};
    use sciink_core::guides::AlignmentGuide;
    use sciink_core::shapes::{BezierPath, CurvedLine};
    use sciink_core::widget::{GuideKind, HandleKind, edit_handles};

    fn bezier_mode() -> BezierEditMode {
        let path = BezierPath::from_anchors(&[
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(100.0, 0.0),
        ]);
        let mut mode = BezierEditMode::new();
        mode.activate(path.into()).unwrap();
        mode
    }

    #[test]
    fn test_frames_replace_previous_objects() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::default();
        let mut mode = bezier_mode();
        let curved = CurvedLineEditMode::new();

        renderer.render_frame(&mut host, &edit_handles(&mode, &curved, &[])).unwrap();
        assert_eq!(host.len(), 3);

        mode.delete_anchor_point("anchor-2");
        renderer.render_frame(&mut host, &edit_handles(&mode, &curved, &[])).unwrap();
        assert_eq!(host.len(), 2);
        assert_eq!(host.render_requests(), 2);
        assert!(!host
            .objects()
            .any(|(_, o)| o.role == OverlayRole::Handle(HandleKind::Anchor("anchor-2".into()))));
    }

    #[test]
    fn test_selected_handle_is_active() {
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::default();
        let mut mode = bezier_mode();
        mode.select_anchor("anchor-1");

        renderer
            .render_frame(&mut host, &edit_handles(&mode, &CurvedLineEditMode::new(), &[]))
            .unwrap();
        let active = host.active().unwrap();
        let object = host.object(active).unwrap();
        assert_eq!(object.role, OverlayRole::Handle(HandleKind::Anchor("anchor-1".into())));
        assert_eq!(object.fill.unwrap().to_rgba8(), renderer.style().selection_color.to_rgba8());

        mode.clear_selection();
        renderer
            .render_frame(&mut host, &edit_handles(&mode, &CurvedLineEditMode::new(), &[]))
            .unwrap();
        assert!(host.active().is_none());
    }

    #[test]
    fn test_curved_line_guides_dashed() {
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::default();
        let mut curved = CurvedLineEditMode::new();
        let line = CurvedLine::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(50.0, -40.0));
        curved.activate(line.into()).unwrap();

        let guides = [AlignmentGuide::vertical(50.0, 600.0)];
        renderer
            .render_frame(&mut host, &edit_handles(&BezierEditMode::new(), &curved, &guides))
            .unwrap();
        assert_eq!(host.len(), 4);

        let dashed = host
            .objects()
            .filter(|(_, o)| matches!(o.role, OverlayRole::Guide(_)))
            .inspect(|(_, o)| assert!(!o.selectable))
            .filter(|(_, o)| !o.dash.is_empty())
            .count();
        assert_eq!(dashed, 3);
        assert!(host
            .objects()
            .any(|(_, o)| o.role == OverlayRole::Guide(GuideKind::Alignment)));
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::default();
        renderer
            .render_frame(&mut host, &edit_handles(&bezier_mode(), &CurvedLineEditMode::new(), &[]))
            .unwrap();
        renderer.clear(&mut host).unwrap();
        assert!(host.is_empty());
        assert!(renderer.live_objects().is_empty());
    }

    #[test]
    fn test_clear_continues_after_failed_removal() {
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::default();
        renderer
            .render_frame(&mut host, &edit_handles(&bezier_mode(), &CurvedLineEditMode::new(), &[]))
            .unwrap();
        let gone = renderer.live_objects()[0];
        host.remove_object(gone).unwrap();

        let result = renderer.clear(&mut host);
        assert!(matches!(result, Err(RenderError::UnknownObject(id)) if id == gone));
        assert!(host.is_empty());
        assert!(renderer.live_objects().is_empty());
    }

    /// Host whose removals fail for one object.
    struct StickyHost {
        inner: RecordingHost,
        sticky: Option<ObjectId>,
    }

    impl CanvasHost for StickyHost {
        fn add_object(&mut self, object: OverlayObject) -> RenderResult<ObjectId> {
            self.inner.add_object(object)
        }

        fn remove_object(&mut self, id: ObjectId) -> RenderResult<()> {
            if self.sticky == Some(id) {
                return Err(RenderError::Host("busy".to_string()));
            }
            self.inner.remove_object(id)
        }

        fn set_active_object(&mut self, id: Option<ObjectId>) -> RenderResult<()> {
            self.inner.set_active_object(id)
        }

        fn request_render(&mut self) {
            self.inner.request_render();
        }
    }

    #[test]
    fn test_clear_keeps_objects_the_host_refused() {
        let mut host = StickyHost {
            inner: RecordingHost::new(),
            sticky: None,
        };
        let mut renderer = OverlayRenderer::default();
        renderer
            .render_frame(&mut host, &edit_handles(&bezier_mode(), &CurvedLineEditMode::new(), &[]))
            .unwrap();
        let stuck = renderer.live_objects()[1];
        host.sticky = Some(stuck);

        assert!(matches!(renderer.clear(&mut host), Err(RenderError::Host(_))));
        assert_eq!(host.inner.len(), 1);
        assert_eq!(renderer.live_objects(), &[stuck]);

        host.sticky = None;
        renderer.clear(&mut host).unwrap();
        assert!(host.inner.is_empty());
        assert!(renderer.live_objects().is_empty());
    }

    #[test]
    fn test_style_colors_applied() {
        let red = Color::from_rgba8(255, 0, 0, 255);
        let green = Color::from_rgba8(0, 255, 0, 255);
        let style = OverlayStyle::default()
            .with_selection_color(red)
            .with_guide_color(green);
        let mut host = RecordingHost::new();
        let mut renderer = OverlayRenderer::new(style);
        let guides = [AlignmentGuide::horizontal(20.0, 800.0)];
        renderer
            .render_frame(&mut host, &edit_handles(&bezier_mode(), &CurvedLineEditMode::new(), &guides))
            .unwrap();

        for (_, object) in host.objects() {
            let expected = match object.role {
                OverlayRole::Handle(_) => red,
                OverlayRole::Guide(_) => green,
            };
            assert_eq!(object.stroke.to_rgba8(), expected.to_rgba8());
        }
    }

    #[test]
    fn test_host_errors_propagate() {
        let mut host = RecordingHost::new();
        assert!(matches!(
            host.remove_object(ObjectId(42)),
            Err(RenderError::UnknownObject(ObjectId(42)))
        ));
        assert!(host.set_active_object(Some(ObjectId(7))).is_err());
    }

    #[test]
    fn test_handle_shapes() {
        let handle = Handle::new(HandleKind::CurveControl, Point::new(10.0, 10.0))
            .with_shape(HandleShape::Diamond);
        let bounds = handle_path(&handle, 8.0).bounding_box();
        assert_eq!(bounds, Rect::new(6.0, 6.0, 14.0, 14.0));

        let style = OverlayStyle::from_settings(&EditorSettings {
            handle_size: 12.0,
            ..EditorSettings::default()
        });
        assert_eq!(style.handle_size, 12.0);
    }
}
