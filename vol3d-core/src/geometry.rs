/// Triangle-soup meshes with material and transform state
use std::f64::consts::PI;

use crate::error::{SceneError, SceneResult};
use crate::math::{self, Vec3};
use crate::transform::Transform;

/// A triangle in local (untransformed) mesh space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }
}

/// Surface appearance with fixed (ambient, diffuse) coefficient pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Fully ambient, unlit: (1.0, 0.0).
    Simple,
    /// Mostly diffuse shading: (0.1, 0.6).
    Diffuse,
}

impl Material {
    pub fn from_name(name: &str) -> SceneResult<Self> {
        match name {
            "simple" => Ok(Material::Simple),
            "diffuse" => Ok(Material::Diffuse),
            other => Err(SceneError::InvalidMaterial(other.to_string())),
        }
    }

    /// Reverse lookup from an (ambient, diffuse) coefficient pair, used
    /// when reading scene descriptions back in.
    pub fn from_coefficients(ambient: f64, diffuse: f64) -> SceneResult<Self> {
        for kind in [Material::Simple, Material::Diffuse] {
            if kind.ambient() == ambient && kind.diffuse() == diffuse {
                return Ok(kind);
            }
        }
        Err(SceneError::InvalidMaterial(format!(
            "ambient {ambient} diffuse {diffuse}"
        )))
    }

    pub fn ambient(self) -> f64 {
        match self {
            Material::Simple => 1.0,
            Material::Diffuse => 0.1,
        }
    }

    pub fn diffuse(self) -> f64 {
        match self {
            Material::Simple => 0.0,
            Material::Diffuse => 0.6,
        }
    }
}

/// A triangle soup plus its appearance and flat affine transform.
///
/// The triangle list is fixed at construction; the transform, color and
/// material are mutated freely across animation frames.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    pub transform: Transform,
    color: Vec3,
    material: Material,
}

impl Mesh {
    /// Wrap an existing triangle soup. The soup must not be empty.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        debug_assert!(!triangles.is_empty(), "a mesh needs at least one triangle");
        Self {
            triangles,
            transform: Transform::identity(),
            color: Vec3::new(1.0, 1.0, 1.0),
            material: Material::Diffuse,
        }
    }

    /// A unit cube spanning [-0.5, 0.5] on every axis, 12 triangles wound
    /// counter-clockwise seen from outside.
    pub fn cube() -> Self {
        Self::from_triangles(box_faces(&CUBE_FACES))
    }

    /// A cube missing its front and back faces, used as a see-through
    /// containment cell. 8 triangles.
    pub fn open_box() -> Self {
        Self::from_triangles(box_faces(&CUBE_FACES[2..]))
    }

    /// A unit-radius UV sphere built from a latitude (ring) by longitude
    /// (sector) grid. The two pole bands collapse their quads into pairs of
    /// pole triangles; interior bands split each quad in two. Always emits
    /// exactly `rings * sectors * 2` triangles.
    pub fn uv_sphere(rings: usize, sectors: usize) -> Self {
        debug_assert!(rings >= 2 && sectors >= 3);
        let mut triangles = Vec::with_capacity(rings * sectors * 2);

        for r in 0..rings {
            let theta1 = r as f64 / rings as f64 * PI;
            let theta2 = (r + 1) as f64 / rings as f64 * PI;

            for s in 0..sectors {
                let phi1 = s as f64 / sectors as f64 * 2.0 * PI;
                let phi2 = (s + 1) as f64 / sectors as f64 * 2.0 * PI;

                let v1 = spherical_to_cartesian(theta1, phi1);
                let v2 = spherical_to_cartesian(theta1, phi2);
                let v3 = spherical_to_cartesian(theta2, phi2);
                let v4 = spherical_to_cartesian(theta2, phi1);

                if r == 0 {
                    triangles.push(Triangle::new(v1, v3, v4));
                    triangles.push(Triangle::new(v1, v3, v2));
                } else if r + 1 == rings {
                    triangles.push(Triangle::new(v3, v1, v2));
                    triangles.push(Triangle::new(v3, v1, v4));
                } else {
                    triangles.push(Triangle::new(v1, v2, v4));
                    triangles.push(Triangle::new(v2, v3, v4));
                }
            }
        }

        Self::from_triangles(triangles)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn set_translation(&mut self, t: Vec3) {
        self.transform.translation = t;
    }

    pub fn set_scale(&mut self, s: Vec3) {
        self.transform.scale = s;
    }

    pub fn set_rotation(&mut self, r: Vec3) {
        self.transform.rotation = r;
    }

    pub fn add_translation(&mut self, t: Vec3) {
        self.transform.translation += t;
    }

    pub fn add_scale(&mut self, s: Vec3) {
        self.transform.scale += s;
    }

    pub fn add_rotation(&mut self, r: Vec3) {
        self.transform.rotation += r;
    }

    /// World-space copy of every triangle, in order. Pure: the mesh itself
    /// is untouched.
    pub fn world_triangles(&self) -> Vec<Triangle> {
        let m = self.transform.matrix();
        self.triangles
            .iter()
            .map(|t| {
                Triangle::new(
                    math::transform_point(&t.vertices[0], &m),
                    math::transform_point(&t.vertices[1], &m),
                    math::transform_point(&t.vertices[2], &m),
                )
            })
            .collect()
    }
}

fn spherical_to_cartesian(theta: f64, phi: f64) -> Vec3 {
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Quad corners for the six cube faces, counter-clockwise from outside.
/// Order: front, back, top, bottom, right, left; the open box drops the
/// first two entries.
const CUBE_FACES: [[[f64; 3]; 4]; 6] = [
    // front (+z)
    [
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ],
    // back (-z)
    [
        [-0.5, -0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, -0.5, -0.5],
    ],
    // top (+y)
    [
        [-0.5, 0.5, -0.5],
        [-0.5, 0.5, 0.5],
        [0.5, 0.5, 0.5],
        [0.5, 0.5, -0.5],
    ],
    // bottom (-y)
    [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, -0.5, 0.5],
        [-0.5, -0.5, 0.5],
    ],
    // right (+x)
    [
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
        [0.5, -0.5, 0.5],
    ],
    // left (-x)
    [
        [-0.5, -0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [-0.5, 0.5, 0.5],
        [-0.5, 0.5, -0.5],
    ],
];

fn box_faces(faces: &[[[f64; 3]; 4]]) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(faces.len() * 2);
    for face in faces {
        let [a, b, c, d] = face.map(|v| Vec3::new(v[0], v[1], v[2]));
        triangles.push(Triangle::new(a, b, c));
        triangles.push(Triangle::new(a, c, d));
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_triangle_count() {
        assert_eq!(Mesh::cube().triangles().len(), 12);
        assert_eq!(Mesh::open_box().triangles().len(), 8);
    }

    #[test]
    fn test_cube_spans_unit_box() {
        for triangle in Mesh::cube().triangles() {
            for v in &triangle.vertices {
                for c in [v.x, v.y, v.z] {
                    assert!(c == 0.5 || c == -0.5);
                }
            }
        }
    }

    #[test]
    fn test_open_box_has_no_front_or_back() {
        // No triangle of the open box lies entirely in a z = +-0.5 plane.
        for triangle in Mesh::open_box().triangles() {
            let zs: Vec<f64> = triangle.vertices.iter().map(|v| v.z).collect();
            assert!(!(zs.iter().all(|&z| z == 0.5) || zs.iter().all(|&z| z == -0.5)));
        }
    }

    #[test]
    fn test_sphere_triangle_count() {
        for (rings, sectors) in [(2, 3), (4, 8), (12, 24)] {
            let sphere = Mesh::uv_sphere(rings, sectors);
            assert_eq!(sphere.triangles().len(), rings * sectors * 2);
        }
    }

    #[test]
    fn test_sphere_vertices_on_unit_sphere() {
        for triangle in Mesh::uv_sphere(6, 12).triangles() {
            for v in &triangle.vertices {
                assert!((v.norm() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_world_triangles_identity() {
        for mesh in [Mesh::cube(), Mesh::open_box(), Mesh::uv_sphere(4, 6)] {
            let world = mesh.world_triangles();
            assert_eq!(world.len(), mesh.triangles().len());
            for (w, t) in world.iter().zip(mesh.triangles()) {
                for (a, b) in w.vertices.iter().zip(&t.vertices) {
                    assert!((a - b).norm() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_world_triangles_translation() {
        let mut mesh = Mesh::from_triangles(vec![Triangle::new(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )]);
        mesh.set_translation(Vec3::new(1.0, 0.0, 0.0));
        let world = mesh.world_triangles();
        assert!((world[0].vertices[0] - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_negative_scale_mirrors() {
        let mut mesh = Mesh::from_triangles(vec![Triangle::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )]);
        mesh.set_scale(Vec3::new(-1.0, 1.0, 1.0));
        let world = mesh.world_triangles();
        assert!((world[0].vertices[0] - Vec3::new(-1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_accumulating_setters() {
        let mut mesh = Mesh::cube();
        mesh.set_rotation(Vec3::new(0.0, 10.0, 0.0));
        mesh.add_rotation(Vec3::new(0.0, 5.0, 1.0));
        assert_eq!(mesh.transform.rotation, Vec3::new(0.0, 15.0, 1.0));

        mesh.add_scale(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.transform.scale, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_material_names_and_coefficients() {
        assert_eq!(Material::from_name("simple").unwrap(), Material::Simple);
        assert_eq!(Material::from_name("diffuse").unwrap(), Material::Diffuse);
        assert!(matches!(
            Material::from_name("chrome"),
            Err(SceneError::InvalidMaterial(_))
        ));

        assert_eq!(
            Material::from_coefficients(1.0, 0.0).unwrap(),
            Material::Simple
        );
        assert_eq!(
            Material::from_coefficients(0.1, 0.6).unwrap(),
            Material::Diffuse
        );
        assert!(Material::from_coefficients(0.5, 0.5).is_err());
    }
}
