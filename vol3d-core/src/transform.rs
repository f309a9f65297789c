/// Flat per-mesh affine transform state
use crate::math::{self, Mat4, Vec3};

/// Translation, scale and rotation for a single mesh.
///
/// Rotation angles are in degrees and apply in X, Y, Z order. There is no
/// parent/child nesting: every mesh carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Vec3::zeros(),
        }
    }

    /// Compose the model matrix as `Translation * Scale * Rotation`, with
    /// rotation itself composed `Rx * Ry * Rz`: vertices are rotated first,
    /// then scaled, then translated.
    pub fn matrix(&self) -> Mat4 {
        math::translation_matrix(&self.translation)
            * math::scale_matrix(&self.scale)
            * math::rotation_matrix(&self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
