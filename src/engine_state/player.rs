//! # Player Body
//!
//! The player is a vertical cylinder anchored at the eye: it spans from
//! `position.y - height` up to `position.y`, with `radius` in the xz-plane.
//!
//! Velocity is stored in the player's local frame (x right, y up, z forward)
//! and converted to the world frame through the current yaw. Yaw 0 looks down
//! the world -z axis.

use cgmath::{InnerSpace, Matrix, Matrix3, Point3, Vector3};

use crate::config::PlayerParams;

/// The simulated player body and its control state.
#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position in world space
    pub position: Point3<f32>,
    /// Velocity in the local frame (x right, y up, z forward)
    pub velocity: Vector3<f32>,
    /// Desired local horizontal velocity, copied into `velocity` every step
    pub input: Vector3<f32>,
    /// Heading in radians around the world y axis
    pub yaw: f32,
    /// Set by physics when the last step ended standing on a block
    pub on_ground: bool,
    pub radius: f32,
    pub height: f32,
    pub max_speed: f32,
    pub jump_speed: f32,
    pub spawn_position: Point3<f32>,
}

impl Player {
    /// Creates a player at its spawn position, at rest.
    pub fn new(params: &PlayerParams) -> Self {
        let spawn_position = Point3::from(params.spawn_position);
        Player {
            position: spawn_position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            input: Vector3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            on_ground: false,
            radius: params.radius,
            height: params.height,
            max_speed: params.max_speed,
            jump_speed: params.jump_speed,
            spawn_position,
        }
    }

    /// Local-to-world rotation for the current yaw. Columns are the world-space
    /// right, up and forward axes.
    pub fn basis(&self) -> Matrix3<f32> {
        let (sin, cos) = self.yaw.sin_cos();
        Matrix3::from_cols(
            Vector3::new(cos, 0.0, -sin),
            Vector3::unit_y(),
            Vector3::new(-sin, 0.0, -cos),
        )
    }

    /// Velocity in the world frame.
    pub fn world_velocity(&self) -> Vector3<f32> {
        self.basis() * self.velocity
    }

    /// Applies a velocity change given in the world frame.
    pub fn apply_world_delta_velocity(&mut self, delta: Vector3<f32>) {
        self.velocity += self.basis().transpose() * delta;
    }

    /// Copies the movement input into the horizontal velocity and integrates position over `dt` seconds.
    pub fn apply_inputs(&mut self, dt: f32) {
        self.velocity.x = self.input.x;
        self.velocity.z = self.input.z;
        self.position += self.world_velocity() * dt;
    }

    /// Sets the desired movement. Both axes are clamped to `[-1, 1]` and scaled by `max_speed`.
    ///
    /// # Arguments
    /// * `right` - Strafe amount, positive to the right
    /// * `forward` - Walk amount, positive forward
    pub fn set_movement_input(&mut self, right: f32, forward: f32) {
        self.input.x = right.clamp(-1.0, 1.0) * self.max_speed;
        self.input.z = forward.clamp(-1.0, 1.0) * self.max_speed;
    }

    /// Adds the jump impulse if the player is standing on something.
    ///
    /// # Returns
    /// Whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y += self.jump_speed;
        true
    }

    /// Teleports back to the spawn position and stops all motion.
    pub fn respawn(&mut self) {
        self.position = self.spawn_position;
        self.velocity = Vector3::new(0.0, 0.0, 0.0);
    }

    /// Center of the body cylinder.
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            self.position.x,
            self.position.y - self.height / 2.0,
            self.position.z,
        )
    }

    /// Whether `point` lies strictly inside the body cylinder.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let offset = point - self.center();
        let horizontal = Vector3::new(offset.x, 0.0, offset.z);
        offset.y.abs() < self.height / 2.0 && horizontal.magnitude2() < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn player() -> Player {
        Player::new(&PlayerParams::default())
    }

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < EPSILON, "{:?} != {:?}", a, b);
    }

    #[test]
    fn spawns_at_rest() {
        let player = player();
        assert_eq!(player.position, Point3::new(32.0, 50.0, 32.0));
        assert_eq!(player.velocity, Vector3::new(0.0, 0.0, 0.0));
        assert!(!player.on_ground);
    }

    #[test]
    fn forward_follows_yaw() {
        let mut player = player();
        player.velocity = Vector3::new(0.0, 0.0, 1.0);
        assert_close(player.world_velocity(), Vector3::new(0.0, 0.0, -1.0));

        player.yaw = std::f32::consts::FRAC_PI_2;
        assert_close(player.world_velocity(), Vector3::new(-1.0, 0.0, 0.0));

        player.velocity = Vector3::new(1.0, 0.0, 0.0);
        assert_close(player.world_velocity(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn world_delta_velocity_round_trips() {
        let mut player = player();
        player.yaw = 0.7;
        player.velocity = Vector3::new(1.0, -2.0, 3.0);
        let before = player.world_velocity();

        player.apply_world_delta_velocity(Vector3::new(0.5, 1.0, -0.25));
        assert_close(player.world_velocity(), before + Vector3::new(0.5, 1.0, -0.25));
    }

    #[test]
    fn inputs_move_along_heading() {
        let mut player = player();
        player.set_movement_input(0.0, 2.0);
        assert_eq!(player.input.z, player.max_speed);

        player.apply_inputs(0.5);
        assert_close(
            player.position - Point3::new(32.0, 50.0, 32.0),
            Vector3::new(0.0, 0.0, -2.5),
        );
    }

    #[test]
    fn jump_requires_ground_and_respawn_resets() {
        let mut player = player();
        assert!(!player.jump());
        player.on_ground = true;
        assert!(player.jump());
        assert_eq!(player.velocity.y, player.jump_speed);

        player.position = Point3::new(1.0, 2.0, 3.0);
        player.respawn();
        assert_eq!(player.position, player.spawn_position);
        assert_eq!(player.velocity, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn cylinder_containment() {
        let mut player = player();
        player.position = Point3::new(0.0, 1.75, 0.0);
        assert!(player.contains_point(Point3::new(0.3, 0.1, 0.0)));
        assert!(!player.contains_point(Point3::new(0.4, 1.0, 0.0)));
        assert!(!player.contains_point(Point3::new(0.0, 0.0, 0.0)));
        assert!(!player.contains_point(Point3::new(0.0, 1.8, 0.0)));
    }
}
