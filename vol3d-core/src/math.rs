/// Vector and matrix helpers for the transform pipeline
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::error::{SceneError, SceneResult};

pub type Vec3 = Vector3<f64>;
pub type Mat4 = Matrix4<f64>;

/// Build a `Vec3` from a runtime-sized slice.
///
/// This is the checked boundary for data arriving from parsed text or CLI
/// arguments; anything other than exactly three components is rejected.
pub fn vec3_from_slice(components: &[f64]) -> SceneResult<Vec3> {
    match components {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        other => Err(SceneError::Dimension {
            expected: 3,
            got: other.len(),
        }),
    }
}

/// Unit-length copy of `v`, or `None` when `v` has zero length.
pub fn normalize(v: &Vec3) -> Option<Vec3> {
    let len = v.norm();
    if len > 0.0 {
        Some(v / len)
    } else {
        None
    }
}

/// Non-uniform scale matrix. Components are used as-is: zero or negative
/// scale produces degenerate or mirrored geometry, never an error.
pub fn scale_matrix(s: &Vec3) -> Mat4 {
    Mat4::new_nonuniform_scaling(s)
}

pub fn translation_matrix(t: &Vec3) -> Mat4 {
    Mat4::new_translation(t)
}

/// Right-handed rotation about the X axis, angle in degrees.
pub fn rot_x(degrees: f64) -> Mat4 {
    Mat4::new_rotation(Vec3::new(degrees.to_radians(), 0.0, 0.0))
}

/// Right-handed rotation about the Y axis, angle in degrees.
pub fn rot_y(degrees: f64) -> Mat4 {
    Mat4::new_rotation(Vec3::new(0.0, degrees.to_radians(), 0.0))
}

/// Right-handed rotation about the Z axis, angle in degrees.
pub fn rot_z(degrees: f64) -> Mat4 {
    Mat4::new_rotation(Vec3::new(0.0, 0.0, degrees.to_radians()))
}

/// Combined rotation `Rx * Ry * Rz`, per-axis angles in degrees.
pub fn rotation_matrix(angles: &Vec3) -> Mat4 {
    rot_x(angles.x) * rot_y(angles.y) * rot_z(angles.z)
}

/// Transform a point: homogeneous coordinate 1, truncated back to three
/// components. Affine only, no perspective divide.
pub fn transform_point(p: &Vec3, m: &Mat4) -> Vec3 {
    let h = m * Vector4::new(p.x, p.y, p.z, 1.0);
    Vec3::new(h.x, h.y, h.z)
}

/// Transform a direction: homogeneous coordinate 0, so translation has no
/// effect.
pub fn transform_vector(v: &Vec3, m: &Mat4) -> Vec3 {
    let h = m * Vector4::new(v.x, v.y, v.z, 0.0);
    Vec3::new(h.x, h.y, h.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_vec3_from_slice() {
        let v = vec3_from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));

        let err = vec3_from_slice(&[1.0, 2.0]).unwrap_err();
        match err {
            SceneError::Dimension { expected, got } => {
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize() {
        let v = normalize(&Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert!(approx(&v, &Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_normalize_zero_length() {
        assert!(normalize(&Vec3::zeros()).is_none());
    }

    #[test]
    fn test_rotation_is_right_handed() {
        // Rotating +X about +Y by 90 degrees lands on -Z.
        let rotated = transform_point(&Vec3::new(1.0, 0.0, 0.0), &rot_y(90.0));
        assert!(approx(&rotated, &Vec3::new(0.0, 0.0, -1.0)));

        // Rotating +Y about +X by 90 degrees lands on +Z.
        let rotated = transform_point(&Vec3::new(0.0, 1.0, 0.0), &rot_x(90.0));
        assert!(approx(&rotated, &Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_identity_rotation() {
        let m = rotation_matrix(&Vec3::zeros());
        assert!((m - Mat4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = translation_matrix(&Vec3::new(5.0, -2.0, 7.0));
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx(&transform_vector(&v, &m), &v));
        assert!(approx(
            &transform_point(&v, &m),
            &Vec3::new(6.0, 0.0, 10.0)
        ));
    }
}
