/// Error types for the rendering core
use thiserror::Error;

use crate::geometry::Primitive;
use crate::rasterizer::{IndexHandle, PositionHandle};

/// Errors raised by a draw call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("no position buffer registered for {0:?}")]
    UnknownPositions(PositionHandle),
    #[error("no index buffer registered for {0:?}")]
    UnknownIndices(IndexHandle),
    #[error("index {index} is out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("drawing {0:?} primitives is not implemented")]
    UnsupportedPrimitive(Primitive),
}

/// Errors raised while converting or writing a frame
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame buffer of {len} pixels does not fit {width}x{height}")]
    SizeMismatch { width: usize, height: usize, len: usize },
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors raised while configuring a scene
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("rotation axis must be non-zero")]
    DegenerateAxis,
}
