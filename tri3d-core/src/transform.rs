/// Model and view transformation matrices
use nalgebra::{Matrix3, Matrix4, Point3, Unit, Vector3};
use std::f32::consts::PI;

/// Convert an angle in degrees to radians
pub fn radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create the view matrix moving the eye to the origin.
    ///
    /// The camera basis is never rotated: it always looks down `-z`.
    pub fn view_matrix(eye: &Point3<f32>) -> Matrix4<f32> {
        Self::translation_matrix(-eye.x, -eye.y, -eye.z)
    }

    /// Rotation about the Z axis, angle in degrees
    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = radians(angle).sin_cos();

        #[rustfmt::skip]
        let model = Matrix4::new(
            cos, -sin, 0.0, 0.0,
            sin,  cos, 0.0, 0.0,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        );
        model
    }

    /// Rotation about an arbitrary unit axis, angle in degrees.
    ///
    /// Uses Rodrigues' formula `R = I + sin(θ)K + (1 - cos(θ))K²` where `K` is
    /// the cross-product matrix of `axis`. The axis is used as given.
    pub fn axis_rotation(axis: &Unit<Vector3<f32>>, angle: f32) -> Matrix4<f32> {
        Self::compose_axis_rotation(&Matrix4::identity(), axis, angle)
    }

    /// Apply an axis rotation on top of an existing model matrix (`R * base`)
    pub fn compose_axis_rotation(
        base: &Matrix4<f32>,
        axis: &Unit<Vector3<f32>>,
        angle: f32,
    ) -> Matrix4<f32> {
        let (sin, cos) = radians(angle).sin_cos();
        let k = axis.cross_matrix();
        let r: Matrix3<f32> = Matrix3::identity() + k * sin + k * k * (1.0 - cos);

        r.to_homogeneous() * base
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn upper_left(m: &Matrix4<f32>) -> Matrix3<f32> {
        m.fixed_view::<3, 3>(0, 0).into_owned()
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        for eye in [
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(1.5, -3.0, 7.25),
            Point3::new(-10.0, 4.0, -2.0),
        ] {
            let view = Transform::view_matrix(&eye);
            let moved = view.transform_point(&eye);
            assert_relative_eq!(moved, Point3::origin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_view_has_no_rotation() {
        let view = Transform::view_matrix(&Point3::new(0.0, 0.0, 5.0));
        assert_eq!(upper_left(&view), Matrix3::identity());
        assert_eq!(view[(2, 3)], -5.0);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let model = Transform::rotation_z(90.0);
        let p = model.transform_point(&Point3::new(1.0, 0.0, 3.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_z_round_trip() {
        for angle in [0.0, 10.0, 45.0, 90.0, 137.5, -220.0, 360.0, 1000.0] {
            let there = Transform::rotation_z(angle);
            let back = Transform::rotation_z(-angle);
            assert_relative_eq!(back * there, Matrix4::identity(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_axis_rotation_is_orthonormal() {
        let axes = [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-0.3, 2.0, 0.7),
            Vector3::new(5.0, -1.0, 0.0),
        ];
        for axis in axes {
            let axis = Unit::new_normalize(axis);
            for angle in [0.0, 15.0, 90.0, 181.0, -75.0] {
                let r = upper_left(&Transform::axis_rotation(&axis, angle));
                assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-5);
                assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_axis_rotation_is_affine() {
        let axis = Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0));
        let m = Transform::axis_rotation(&axis, 33.0);
        assert_eq!(m.row(3).clone_owned(), Matrix4::<f32>::identity().row(3).clone_owned());
        assert_eq!(m.fixed_view::<3, 1>(0, 3).into_owned(), Vector3::zeros());
    }

    #[test]
    fn test_axis_rotation_about_z_matches_rotation_z() {
        let axis = Vector3::z_axis();
        for angle in [0.0, 30.0, -120.0] {
            assert_relative_eq!(
                Transform::axis_rotation(&axis, angle),
                Transform::rotation_z(angle),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_axis_rotation_keeps_axis_fixed() {
        let axis = Unit::new_normalize(Vector3::new(1.0, 2.0, 3.0));
        let m = Transform::axis_rotation(&axis, 70.0);
        let on_axis = Point3::from(axis.into_inner() * 2.0);
        assert_relative_eq!(m.transform_point(&on_axis), on_axis, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_axis_rotation_chains() {
        let axis = Unit::new_normalize(Vector3::new(0.0, 1.0, 1.0));
        let first = Transform::axis_rotation(&axis, 20.0);
        let chained = Transform::compose_axis_rotation(&first, &axis, 25.0);
        assert_relative_eq!(chained, Transform::axis_rotation(&axis, 45.0), epsilon = 1e-5);
    }

    #[test]
    fn test_mvp_order() {
        let model = Transform::scale_matrix(2.0, 2.0, 2.0);
        let view = Transform::translation_matrix(1.0, 0.0, 0.0);
        let projection = Matrix4::identity();
        let mvp = Transform::mvp_matrix(&model, &view, &projection);
        let p = mvp.transform_point(&Point3::new(1.0, 0.0, 0.0));
        // scaled first, then translated
        assert_relative_eq!(p, Point3::new(3.0, 0.0, 0.0));
    }
}
