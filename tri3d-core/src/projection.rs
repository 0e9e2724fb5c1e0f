/// Camera and projection utilities
use nalgebra::{Matrix4, Point3};

use crate::transform::{radians, Transform};

/// Build a perspective projection matrix.
///
/// `near` and `far` are distances in front of the eye. They are negated
/// internally so the frustum lies along `-z`, then the frustum is squashed
/// into a box and mapped to the canonical cube by an orthographic projection.
/// Points on the near plane land at `z = 1`, points on the far plane at
/// `z = -1`.
pub fn perspective_matrix(fov: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let n = -near.abs();
    let f = -far.abs();

    let t = (radians(fov) / 2.0).tan() * n.abs();
    let r = aspect * t;

    #[rustfmt::skip]
    let persp_to_ortho = Matrix4::new(
        n,   0.0, 0.0,   0.0,
        0.0, n,   0.0,   0.0,
        0.0, 0.0, n + f, -n * f,
        0.0, 0.0, 1.0,   0.0,
    );

    orthographic_matrix(r, t, n, f) * persp_to_ortho
}

/// Map the box `[-r, r] x [-t, t] x [f, n]` onto `[-1, 1]³`.
///
/// `n` and `f` are z coordinates (both negative for a camera looking down `-z`).
pub fn orthographic_matrix(r: f32, t: f32, n: f32, f: f32) -> Matrix4<f32> {
    let scale = Transform::scale_matrix(1.0 / r, 1.0 / t, 2.0 / (n - f));
    let translate = Transform::translation_matrix(0.0, 0.0, -(n + f) / 2.0);

    scale * translate
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            fov: 45.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 50.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::view_matrix(&self.position)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective_matrix(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(700, 700)
    }
}
