//! SciInk Core Library
//!
//! Platform-agnostic geometry and editing state for the SciInk scientific
//! illustration editor.

pub mod align;
pub mod color;
pub mod edit;
pub mod geometry;
pub mod guides;
pub mod preferences;
pub mod settings;
pub mod shapes;
pub mod units;
pub mod widget;

pub use align::{Alignment, BoundingBox, align_boxes, distribute_horizontally, distribute_vertically};
pub use color::{Cmyk, ColorError, ColorPalette, Rgb, cmyk_to_rgb, hex_to_rgb, rgb_to_cmyk, rgb_to_hex};
pub use edit::{BezierEditMode, CurvedLineEditMode, EditHit};
pub use geometry::{LineSegment, create_jump_arc, line_intersection, simplify_path};
pub use guides::{AlignmentGuide, GuideCandidate, GuideOverlay, detect_alignment_guides};
pub use preferences::{MemoryPreferences, PreferenceError, PreferenceStore, Preferences};
pub use settings::{EditorSettings, SettingsError};
pub use shapes::{BezierPath, BezierPoint, CurvedLine, PointType, Shape, ShapeTrait};
pub use units::{Unit, UnitError, convert_units};
pub use widget::{EditOverlay, GuideLine, Handle, HandleKind, HandleShape, edit_handles};

#[cfg(not(target_arch = "wasm32"))]
pub use preferences::FilePreferences;
