//! In-memory canvas host for tests and headless use.

use crate::host::{CanvasHost, ObjectId, OverlayObject, RenderError, RenderResult};
use std::collections::BTreeMap;

/// Canvas host that just records what it is told.
#[derive(Debug, Default)]
pub struct RecordingHost {
    objects: BTreeMap<ObjectId, OverlayObject>,
    next_id: u64,
    active: Option<ObjectId>,
    render_requests: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &OverlayObject)> {
        self.objects.iter()
    }

    pub fn object(&self, id: ObjectId) -> Option<&OverlayObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn render_requests(&self) -> usize {
        self.render_requests
    }
}

impl CanvasHost for RecordingHost {
    fn add_object(&mut self, object: OverlayObject) -> RenderResult<ObjectId> {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.insert(id, object);
        Ok(id)
    }

    fn remove_object(&mut self, id: ObjectId) -> RenderResult<()> {
        self.objects
            .remove(&id)
            .map(|_| ())
            .ok_or(RenderError::UnknownObject(id))?;
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) -> RenderResult<()> {
        if let Some(id) = id {
            if !self.objects.contains_key(&id) {
                return Err(RenderError::UnknownObject(id));
            }
        }
        self.active = id;
        Ok(())
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}
