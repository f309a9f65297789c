/// vol3d Core Library - Scene model and transform pipeline
///
/// This library provides the stateless core for generating animated 3D
/// scene data: vector/matrix math, triangle-soup meshes with flat affine
/// transforms, procedural shape generators, the bouncing-ball stepper,
/// and the textual scene-description serializer/parser.

pub mod describe;
pub mod error;
pub mod geometry;
pub mod math;
pub mod scene;
pub mod sim;
pub mod transform;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use geometry::{Material, Mesh, Triangle};
pub use math::{Mat4, Vec3};
pub use scene::{Camera, Light, Projection, Scene};
pub use sim::{Ball, BallPit};
pub use transform::Transform;
