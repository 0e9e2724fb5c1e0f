/// tri3d Core Library - Transformation pipeline and software rasterizer
///
/// This library builds the model, view and projection matrices for a scene
/// and draws the transformed geometry into a color buffer.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod rasterizer;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use error::{FrameError, RasterError, SceneError};
pub use frame::FrameBuffer;
pub use geometry::{Primitive, Triangle};
pub use projection::{orthographic_matrix, perspective_matrix, Camera};
pub use rasterizer::{Buffers, IndexHandle, PositionHandle, Rasterizer};
pub use scene::{Scene, ANGLE_STEP, CANVAS_SIZE, DEFAULT_OUTPUT};
pub use transform::Transform;
