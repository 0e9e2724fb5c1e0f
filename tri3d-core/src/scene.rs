/// Scene configuration: canvas, camera, geometry and rotation settings
use nalgebra::{Point3, Unit, Vector3};

use crate::error::SceneError;
use crate::projection::Camera;

/// Default canvas edge length in pixels
pub const CANVAS_SIZE: usize = 700;

/// Degrees added or removed by one rotation key press
pub const ANGLE_STEP: f32 = 10.0;

/// File written by an offline render when no name is given
pub const DEFAULT_OUTPUT: &str = "output.png";

/// Everything needed to set up a render: canvas size, camera and geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub camera: Camera,
    pub positions: Vec<Vector3<f32>>,
    pub indices: Vec<[usize; 3]>,
    /// Axis used by offline renders
    pub rotation_axis: Unit<Vector3<f32>>,
}

impl Scene {
    /// The reference scene: a single triangle facing a camera at `(0, 0, 5)`
    pub fn new() -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            camera: Camera::new(CANVAS_SIZE as u32, CANVAS_SIZE as u32),
            positions: vec![
                Vector3::new(2.0, 0.0, -2.0),
                Vector3::new(0.0, 2.0, -2.0),
                Vector3::new(-2.0, 0.0, -2.0),
            ],
            indices: vec![[0, 1, 2]],
            rotation_axis: Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0)),
        }
    }

    /// Resize the canvas; the camera aspect ratio follows
    pub fn with_canvas(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self.camera.aspect = width as f32 / height as f32;
        self
    }

    pub fn with_eye(mut self, eye: Point3<f32>) -> Self {
        self.camera.position = eye;
        self
    }

    pub fn with_geometry(mut self, positions: Vec<Vector3<f32>>, indices: Vec<[usize; 3]>) -> Self {
        self.positions = positions;
        self.indices = indices;
        self
    }

    /// Set the offline rotation axis, normalizing it. A zero axis is rejected.
    pub fn with_rotation_axis(mut self, axis: Vector3<f32>) -> Result<Self, SceneError> {
        self.rotation_axis =
            Unit::try_new(axis, f32::EPSILON).ok_or(SceneError::DegenerateAxis)?;
        Ok(self)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
