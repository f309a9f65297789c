/// Animation scenarios shared by the batch drivers and the live preview
use vol3d_core::{Ball, BallPit, Camera, Light, Mesh, Scene, Vec3};

/// A self-contained animated scene: advance one frame, then borrow the
/// current state for export or preview.
pub trait Scenario {
    fn advance(&mut self);
    fn scene(&self) -> Scene<'_>;
}

fn default_camera() -> Camera {
    Camera::perspective(Vec3::new(0.5, 0.5, -1.2), Vec3::new(0.5, 0.5, 1.0))
}

fn default_lights() -> Vec<Light> {
    vec![Light::new(Vec3::new(2.0, 4.0, -3.0))]
}

/// Colliding balls inside an open-sided unit box.
pub struct BouncingBalls {
    camera: Camera,
    lights: Vec<Light>,
    cell: Mesh,
    pit: BallPit,
}

impl BouncingBalls {
    pub fn new(pit: BallPit) -> Self {
        // The open box spans [-0.5, 0.5]^3 locally; translating it to the
        // cell center makes it wrap the [0, 1]^3 simulation cell.
        let mut cell = Mesh::open_box();
        cell.set_translation(Vec3::new(0.5, 0.5, 0.5));

        Self {
            camera: default_camera(),
            lights: default_lights(),
            cell,
            pit,
        }
    }
}

impl Scenario for BouncingBalls {
    fn advance(&mut self) {
        self.pit.step();
    }

    fn scene(&self) -> Scene<'_> {
        let mut meshes: Vec<&Mesh> = self.pit.balls().iter().map(Ball::mesh).collect();
        meshes.push(&self.cell);
        Scene::new(&self.camera, &self.lights, meshes)
    }
}

/// A diffuse cube spinning about the Y axis, one full revolution over the
/// configured frame count.
pub struct SpinningCube {
    camera: Camera,
    lights: Vec<Light>,
    cube: Mesh,
    step_rotation: Vec3,
}

impl SpinningCube {
    pub fn new(frames: u32) -> Self {
        let mut cube = Mesh::cube();
        cube.set_translation(Vec3::new(0.5, 0.5, 0.5));
        cube.set_scale(Vec3::new(0.4, 0.4, 0.4));
        cube.set_rotation(Vec3::new(30.0, 60.0, 10.0));

        Self {
            camera: default_camera(),
            lights: default_lights(),
            cube,
            step_rotation: Vec3::new(0.0, 360.0 / f64::from(frames.max(1)), 0.0),
        }
    }
}

impl Scenario for SpinningCube {
    fn advance(&mut self) {
        self.cube.add_rotation(self.step_rotation);
    }

    fn scene(&self) -> Scene<'_> {
        Scene::new(&self.camera, &self.lights, vec![&self.cube])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bouncing_balls_scene_contents() {
        let mut rng = StdRng::seed_from_u64(1);
        let pit = BallPit::spawn(10, 0.07, &mut rng);
        let scenario = BouncingBalls::new(pit);

        let scene = scenario.scene();
        // Ten balls plus the containment cell.
        assert_eq!(scene.meshes.len(), 11);
        assert_eq!(scene.lights.len(), 1);
        // The cell comes last and is the 8-triangle open box.
        assert_eq!(scene.meshes[10].triangles().len(), 8);
    }

    #[test]
    fn test_spinning_cube_accumulates_rotation() {
        let mut scenario = SpinningCube::new(50);
        let initial = scenario.scene().meshes[0].transform.rotation;
        assert_eq!(initial, Vec3::new(30.0, 60.0, 10.0));

        for _ in 0..50 {
            scenario.advance();
        }
        let rotation = scenario.scene().meshes[0].transform.rotation;
        assert!((rotation.y - (60.0 + 360.0)).abs() < 1e-9);
        assert_eq!(rotation.x, 30.0);
        assert_eq!(rotation.z, 10.0);
    }
}
