//! SciInk Render Library
//!
//! Canvas host abstraction and the per-frame edit overlay renderer.
//! The host is whatever retained scene graph draws the canvas; this crate
//! only adds, removes and activates objects on it.

mod host;
mod recording;
mod renderer;

pub use host::{CanvasHost, ObjectId, OverlayObject, OverlayRole, RenderError, RenderResult};
pub use recording::RecordingHost;
pub use renderer::{OverlayRenderer, OverlayStyle};
