/// Camera, lights and the flat scene aggregate
use nalgebra::Point3;

use crate::geometry::Mesh;
use crate::math::{Mat4, Vec3};

/// Projection mode for a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective,
    /// Axis-aligned orthographic view over the unit cell, clipped to the
    /// depth band [near, far]. Sweeping the band across frames produces
    /// volumetric slices.
    Orthographic { near: f64, far: f64 },
}

/// Camera configuration, immutable for the duration of a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Field of view in degrees; only meaningful for perspective passes but
    /// always carried (and serialized) regardless of projection.
    pub fov: f64,
    pub projection: Projection,
}

impl Camera {
    pub fn perspective(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            fov: 60.0,
            projection: Projection::Perspective,
        }
    }

    /// Copy of this camera with an orthographic depth band over
    /// [near, far]. Volume slicing builds one camera per slice rather than
    /// mutating a shared one.
    pub fn with_orthographic(&self, near: f64, far: f64) -> Self {
        Self {
            projection: Projection::Orthographic { near, far },
            ..*self
        }
    }

    /// View matrix. Orthographic passes view the cell axis-aligned, so the
    /// camera position only participates in perspective passes.
    pub fn view_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective => Mat4::look_at_rh(
                &Point3::from(self.position),
                &Point3::from(self.look_at),
                &Vec3::new(0.0, 1.0, 0.0),
            ),
            Projection::Orthographic { .. } => Mat4::identity(),
        }
    }

    /// Projection matrix for the given aspect ratio. The orthographic
    /// matrix maps the world depth band [near, far] into clip range, so
    /// fragments outside the band are dropped by the depth clip.
    pub fn projection_matrix(&self, aspect: f64) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::new_perspective(aspect, self.fov.to_radians(), 1.0, 10.0)
            }
            Projection::Orthographic { near, far } => {
                Mat4::new_orthographic(0.0, 1.0, 0.0, 1.0, -near, -far)
            }
        }
    }
}

/// A point light, immutable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Light {
    /// White light at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_color(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// The flat unit handed to exporters: one camera, some lights, some meshes.
/// No parent/child nesting; borrows everything from the caller.
pub struct Scene<'a> {
    pub camera: &'a Camera,
    pub lights: &'a [Light],
    pub meshes: Vec<&'a Mesh>,
}

impl<'a> Scene<'a> {
    pub fn new(camera: &'a Camera, lights: &'a [Light], meshes: Vec<&'a Mesh>) -> Self {
        Self {
            camera,
            lights,
            meshes,
        }
    }
}
