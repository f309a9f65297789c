/// vol3d Render Library - Frame export pipeline and renderer boundaries
///
/// Everything that turns a scene into per-frame output files lives here:
/// the `Rasterizer` and `RayTracer` collaborator traits, the POV-Ray
/// subprocess backend, the frame pipeline with its file naming scheme,
/// and the two animation scenarios.

pub mod pipeline;
pub mod raytrace;
pub mod scenario;

pub use pipeline::{generate, RasterContext, Rasterizer};
pub use raytrace::{Disabled, PovRay, RayTracer};
pub use scenario::{BouncingBalls, Scenario, SpinningCube};
