/// Ray-tracer collaborator boundary
use std::path::Path;
use std::process::Command;

use log::debug;
use vol3d_core::{SceneError, SceneResult};

/// An external ray tracer consuming a scene-description file. The image it
/// produces (and its extension) is owned entirely by the collaborator; the
/// pipeline only cares about success.
pub trait RayTracer {
    fn render(&self, scene_file: &Path) -> SceneResult<()>;
}

/// POV-Ray invoked as a subprocess on the written scene description.
pub struct PovRay {
    pub binary: String,
    pub width: u32,
    pub height: u32,
}

impl PovRay {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            width: 500,
            height: 500,
        }
    }
}

impl Default for PovRay {
    fn default() -> Self {
        Self::new("povray")
    }
}

impl RayTracer for PovRay {
    fn render(&self, scene_file: &Path) -> SceneResult<()> {
        debug!("invoking {} on {}", self.binary, scene_file.display());
        let status = Command::new(&self.binary)
            .arg(format!("-W{}", self.width))
            .arg(format!("-H{}", self.height))
            .arg(format!("+I{}", scene_file.display()))
            .status()
            .map_err(|e| SceneError::RenderFailure {
                renderer: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SceneError::RenderFailure {
                renderer: self.binary.clone(),
                reason: format!("exit status {status}"),
            })
        }
    }
}

/// A no-op backend for runs without a ray tracer installed. The scene
/// description is still written by the pipeline; only the subprocess call
/// is skipped.
pub struct Disabled;

impl RayTracer for Disabled {
    fn render(&self, _scene_file: &Path) -> SceneResult<()> {
        Ok(())
    }
}
