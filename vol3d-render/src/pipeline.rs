/// Per-frame output generation
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::debug;
use vol3d_core::{describe, Camera, Mesh, Scene, SceneResult};

use crate::raytrace::RayTracer;

/// Rasterizer collaborator boundary.
///
/// `open` scopes one render context to a single camera configuration; the
/// context is released when it drops, on every exit path. The external
/// OpenGL backend implements this with `png` output; the in-tree terminal
/// backend writes `txt`.
pub trait Rasterizer {
    type Context: RasterContext;

    /// Extension for the frame files this backend writes.
    fn extension(&self) -> &'static str;

    fn open(&mut self, camera: &Camera) -> SceneResult<Self::Context>;
}

/// A render context bound to one camera configuration.
pub trait RasterContext {
    fn render(&mut self, meshes: &[&Mesh], path: &Path, wireframe: bool) -> SceneResult<()>;
}

/// Write every per-frame artifact for `scene` into `out_dir`.
///
/// With extension `E` from the rasterizer and frame postfix `i`, the output
/// set is: `rast{i}.E` and `rast_wire{i}.E` (perspective, one shared
/// context), `rast_ortho{i}.E` (orthographic over the whole cell),
/// `volume{i}_{k}.E` for k in [0, volume_depth) (non-overlapping depth
/// bands jointly spanning [0, 1]), `ray{i}.txt` (the scene description,
/// handed to the ray tracer), and `points{i}.txt` (world-space vertex
/// dump). The first failing collaborator aborts the rest of the frame and
/// propagates to the caller.
pub fn generate<R: Rasterizer>(
    out_dir: &Path,
    scene: &Scene,
    postfix: &str,
    volume_depth: u32,
    rasterizer: &mut R,
    ray_tracer: &dyn RayTracer,
) -> SceneResult<()> {
    fs::create_dir_all(out_dir)?;
    let ext = rasterizer.extension();

    // Perspective pass: filled and wireframe share one context.
    {
        let mut ctx = rasterizer.open(scene.camera)?;
        ctx.render(
            &scene.meshes,
            &out_dir.join(format!("rast{postfix}.{ext}")),
            false,
        )?;
        ctx.render(
            &scene.meshes,
            &out_dir.join(format!("rast_wire{postfix}.{ext}")),
            true,
        )?;
    }

    // Orthographic pass over the full cell depth.
    {
        let ortho = scene.camera.with_orthographic(0.0, 1.0);
        let mut ctx = rasterizer.open(&ortho)?;
        ctx.render(
            &scene.meshes,
            &out_dir.join(format!("rast_ortho{postfix}.{ext}")),
            false,
        )?;
    }

    // Volume slices: fragments outside a slice's depth band are clipped,
    // so the stack reconstructs a 3D occupancy volume of the unit cell.
    for k in 0..volume_depth {
        let near = f64::from(k) / f64::from(volume_depth);
        let far = f64::from(k + 1) / f64::from(volume_depth);
        let slice = scene.camera.with_orthographic(near, far);
        let mut ctx = rasterizer.open(&slice)?;
        ctx.render(
            &scene.meshes,
            &out_dir.join(format!("volume{postfix}_{k}.{ext}")),
            false,
        )?;
    }

    // Ray-traced pass: serialize the scene, then hand it to the tracer.
    let scene_file = out_dir.join(format!("ray{postfix}.txt"));
    fs::write(&scene_file, describe::scene_description(scene))?;
    ray_tracer.render(&scene_file)?;

    write_points(&out_dir.join(format!("points{postfix}.txt")), &scene.meshes)?;
    debug!("frame {postfix} written to {}", out_dir.display());
    Ok(())
}

/// World-space vertex dump: one line per mesh holding its transformed
/// triangle list, with a blank line between meshes. A debugging artifact,
/// nothing downstream consumes it.
fn write_points(path: &Path, meshes: &[&Mesh]) -> SceneResult<()> {
    let mut file = File::create(path)?;
    for mesh in meshes {
        let line = mesh
            .world_triangles()
            .iter()
            .map(|t| {
                format!(
                    "{} {} {}",
                    describe::vector_literal(&t.vertices[0]),
                    describe::vector_literal(&t.vertices[1]),
                    describe::vector_literal(&t.vertices[2]),
                )
            })
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(file, "{line}\n")?;
    }
    Ok(())
}
