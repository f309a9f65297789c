/// Bouncing-ball animation stepper
use rand::Rng;

use crate::geometry::Mesh;
use crate::math::Vec3;

const SPHERE_RINGS: usize = 12;
const SPHERE_SECTORS: usize = 24;
const BALL_COLOR: Vec3 = Vec3::new(1.0, 1.0, 0.0);
/// Spawn velocities are uniform in +-MAX_SPAWN_SPEED per axis.
const MAX_SPAWN_SPEED: f64 = 0.05;

/// A sphere mesh plus the kinematic state driving it.
#[derive(Debug, Clone)]
pub struct Ball {
    mesh: Mesh,
    position: Vec3,
    velocity: Vec3,
}

impl Ball {
    pub fn new(position: Vec3, velocity: Vec3, diameter: f64) -> Self {
        let mut mesh = Mesh::uv_sphere(SPHERE_RINGS, SPHERE_SECTORS);
        mesh.set_scale(Vec3::new(diameter, diameter, diameter));
        mesh.set_color(BALL_COLOR);
        mesh.set_translation(position);
        Self {
            mesh,
            position,
            velocity,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

/// A population of colliding balls inside the unit cell [0, 1]^3.
pub struct BallPit {
    balls: Vec<Ball>,
    diameter: f64,
}

impl BallPit {
    pub fn new(balls: Vec<Ball>, diameter: f64) -> Self {
        Self { balls, diameter }
    }

    /// Spawn `count` balls uniformly inside the cell inset by one radius,
    /// with uniform random velocities.
    pub fn spawn<R: Rng>(count: usize, diameter: f64, rng: &mut R) -> Self {
        let radius = diameter / 2.0;
        let balls = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(radius..=1.0 - radius),
                    rng.gen_range(radius..=1.0 - radius),
                    rng.gen_range(radius..=1.0 - radius),
                );
                let velocity = Vec3::new(
                    rng.gen_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
                    rng.gen_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
                    rng.gen_range(-MAX_SPAWN_SPEED..=MAX_SPAWN_SPEED),
                );
                Ball::new(position, velocity, diameter)
            })
            .collect();
        Self { balls, diameter }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Advance one frame with a unit time step.
    ///
    /// All reads come from a frame-start snapshot and results are committed
    /// at frame end, so the outcome is independent of ball order. Per ball:
    ///
    /// 1. Integrate: `position += velocity`.
    /// 2. Wall bounce per axis: the velocity component flips when the new
    ///    position is within one diameter of a cell wall. The position is
    ///    never clamped; an overshoot is corrected one step late.
    /// 3. Pairwise collision against every other ball's snapshot position:
    ///    when the center distance falls below one diameter (2 x radius),
    ///    all three velocity components flip. Each qualifying partner
    ///    toggles again, so two simultaneous partners cancel out. A partner
    ///    is skipped only when its snapshot position is bit-for-bit equal
    ///    to this ball's, which in practice means itself. O(n^2), fine at
    ///    tens of balls.
    /// 4. Commit the new position as the mesh translation.
    pub fn step(&mut self) {
        let snapshot: Vec<(Vec3, Vec3)> = self
            .balls
            .iter()
            .map(|b| (b.position, b.velocity))
            .collect();
        let diameter = self.diameter;

        for (i, ball) in self.balls.iter_mut().enumerate() {
            let (old_position, old_velocity) = snapshot[i];
            let position = old_position + old_velocity;
            let mut velocity = old_velocity;

            for axis in 0..3 {
                if position[axis] + diameter >= 1.0 || position[axis] - diameter <= 0.0 {
                    velocity[axis] = -velocity[axis];
                }
            }

            for (other_position, _) in &snapshot {
                if *other_position == old_position {
                    continue;
                }
                if (position - other_position).norm() < diameter {
                    velocity = -velocity;
                }
            }

            ball.position = position;
            ball.velocity = velocity;
            ball.mesh.set_translation(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAMETER: f64 = 0.07;

    fn still_ball(x: f64, y: f64, z: f64) -> Ball {
        Ball::new(Vec3::new(x, y, z), Vec3::zeros(), DIAMETER)
    }

    #[test]
    fn test_ball_mesh_matches_state() {
        let ball = Ball::new(Vec3::new(0.2, 0.3, 0.4), Vec3::zeros(), DIAMETER);
        assert_eq!(ball.mesh().transform.translation, Vec3::new(0.2, 0.3, 0.4));
        assert_eq!(
            ball.mesh().transform.scale,
            Vec3::new(DIAMETER, DIAMETER, DIAMETER)
        );
    }

    #[test]
    fn test_wall_bounce_high_side() {
        let ball = Ball::new(
            Vec3::new(0.95, 0.5, 0.5),
            Vec3::new(0.05, 0.0, 0.0),
            DIAMETER,
        );
        let mut pit = BallPit::new(vec![ball], DIAMETER);
        pit.step();

        let ball = &pit.balls()[0];
        // Integrated to x = 1.0; 1.0 + 0.07 >= 1.0 flips the component.
        assert!((ball.position().x - 1.0).abs() < 1e-12);
        assert_eq!(ball.velocity().x, -0.05);
        assert_eq!(ball.mesh().transform.translation, ball.position());
    }

    #[test]
    fn test_wall_bounce_low_side() {
        let ball = Ball::new(
            Vec3::new(0.08, 0.5, 0.5),
            Vec3::new(-0.02, 0.0, 0.0),
            DIAMETER,
        );
        let mut pit = BallPit::new(vec![ball], DIAMETER);
        pit.step();

        let ball = &pit.balls()[0];
        assert_eq!(ball.velocity().x, 0.02);
    }

    #[test]
    fn test_no_bounce_in_the_interior() {
        let ball = Ball::new(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.01, -0.02, 0.03),
            DIAMETER,
        );
        let mut pit = BallPit::new(vec![ball], DIAMETER);
        pit.step();

        let ball = &pit.balls()[0];
        assert_eq!(ball.velocity(), Vec3::new(0.01, -0.02, 0.03));
    }

    #[test]
    fn test_collision_inside_threshold_flips_all_components() {
        let moving = Ball::new(
            Vec3::new(0.29, 0.5, 0.5),
            Vec3::new(0.01, 0.0, 0.0),
            DIAMETER,
        );
        // Rests exactly 0.0699 (< diameter) from the mover's integrated
        // position.
        let resting = still_ball(0.29 + 0.01 + 0.0699, 0.5, 0.5);
        let mut pit = BallPit::new(vec![moving, resting], DIAMETER);
        pit.step();

        assert_eq!(pit.balls()[0].velocity(), Vec3::new(-0.01, 0.0, 0.0));
        // The resting ball is 0.0799 from the mover's old position, so its
        // own (zero) velocity stays untouched.
        assert_eq!(pit.balls()[1].velocity(), Vec3::zeros());
    }

    #[test]
    fn test_collision_outside_threshold_is_ignored() {
        let moving = Ball::new(
            Vec3::new(0.29, 0.5, 0.5),
            Vec3::new(0.01, 0.0, 0.0),
            DIAMETER,
        );
        let resting = still_ball(0.29 + 0.01 + 0.0701, 0.5, 0.5);
        let mut pit = BallPit::new(vec![moving, resting], DIAMETER);
        pit.step();

        assert_eq!(pit.balls()[0].velocity(), Vec3::new(0.01, 0.0, 0.0));
    }

    #[test]
    fn test_two_simultaneous_partners_cancel_out() {
        let moving = Ball::new(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.01, 0.0, 0.0),
            DIAMETER,
        );
        let left = still_ball(0.51 - 0.05, 0.5, 0.5);
        let right = still_ball(0.51 + 0.05, 0.5, 0.5);
        let mut pit = BallPit::new(vec![moving, left, right], DIAMETER);
        pit.step();

        // Both partners are within one diameter, so the velocity flips
        // twice and lands back where it started.
        assert_eq!(pit.balls()[0].velocity(), Vec3::new(0.01, 0.0, 0.0));
    }

    #[test]
    fn test_coincident_balls_are_skipped() {
        // Two balls spawned at the same position compare equal and skip
        // each other rather than colliding forever.
        let a = still_ball(0.5, 0.5, 0.5);
        let b = still_ball(0.5, 0.5, 0.5);
        let mut pit = BallPit::new(vec![a, b], DIAMETER);
        pit.step();

        assert_eq!(pit.balls()[0].velocity(), Vec3::zeros());
        assert_eq!(pit.balls()[1].velocity(), Vec3::zeros());
    }

    #[test]
    fn test_step_is_order_independent() {
        let a = Ball::new(Vec3::new(0.3, 0.5, 0.5), Vec3::new(0.02, 0.0, 0.0), DIAMETER);
        let b = Ball::new(Vec3::new(0.38, 0.5, 0.5), Vec3::new(-0.02, 0.0, 0.0), DIAMETER);

        let mut forward = BallPit::new(vec![a.clone(), b.clone()], DIAMETER);
        let mut reversed = BallPit::new(vec![b, a], DIAMETER);
        forward.step();
        reversed.step();

        assert_eq!(forward.balls()[0].position(), reversed.balls()[1].position());
        assert_eq!(forward.balls()[0].velocity(), reversed.balls()[1].velocity());
        assert_eq!(forward.balls()[1].position(), reversed.balls()[0].position());
        assert_eq!(forward.balls()[1].velocity(), reversed.balls()[0].velocity());
    }

    #[test]
    fn test_spawn_respects_cell_inset() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        let pit = BallPit::spawn(10, DIAMETER, &mut rng);
        assert_eq!(pit.balls().len(), 10);

        let radius = DIAMETER / 2.0;
        for ball in pit.balls() {
            let p = ball.position();
            for c in [p.x, p.y, p.z] {
                assert!((radius..=1.0 - radius).contains(&c));
            }
            let v = ball.velocity();
            for c in [v.x, v.y, v.z] {
                assert!(c.abs() <= MAX_SPAWN_SPEED);
            }
        }
    }
}
