/// Polyview Core Library - projective geometry for convex polyhedra
///
/// This library provides the camera model, the perspective projector with
/// near-plane clipping, backface-culled faces, and the drawing surface
/// contract that front ends implement.

pub mod camera;
pub mod error;
pub mod face;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod vector;

// Re-export commonly used types
pub use camera::{Camera, CameraPose, Viewport};
pub use error::{Error, Result};
pub use face::Face;
pub use projection::{fixed_axis_position, project, project_segment, Projected};
pub use scene::{FrameStats, RenderStyle, Scene};
pub use surface::{DrawCommand, RecordingSurface, Rgb, ScreenPoint, Surface};
pub use vector::{direction_vector, Point3, Vec3, VectorExt};
