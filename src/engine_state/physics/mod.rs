//! # Physics
//!
//! Fixed-timestep simulation of the player body against the voxel world.
//!
//! Frame time is added to an accumulator; every whole step it holds is consumed
//! as one discrete step:
//!
//! 1. gravity is integrated into the vertical velocity
//! 2. movement input is applied and the position integrated
//! 3. collisions are detected and resolved
//!
//! Large frame times only run more steps, a single step never grows. The
//! accumulator is kept as a `Duration`, so step counts are exact.

pub mod collision;

use log::warn;
use web_time::Duration;

use crate::config::PhysicsParams;

use collision::{broad_phase, narrow_phase, resolve_collisions, CollisionDebug};

use super::{player::Player, voxels::world::BlockLookup};

/// Step length used when the configured simulation rate cannot produce one.
const FALLBACK_STEP: Duration = Duration::from_millis(4);

/// The fixed-timestep physics engine.
pub struct Physics {
    /// Downward acceleration in blocks per second squared
    pub gravity: f32,
    /// Length of one simulation step
    step: Duration,
    /// Frame time not yet simulated
    accumulator: Duration,
    /// Whether to record [`CollisionDebug`] data
    pub visualize_collisions: bool,
    debug: CollisionDebug,
}

impl Physics {
    pub fn new(params: &PhysicsParams) -> Self {
        let step = match Duration::try_from_secs_f64(1.0 / params.simulation_rate as f64) {
            Ok(step) if !step.is_zero() => step,
            _ => {
                warn!(
                    "Invalid simulation rate {}, using {:?} steps",
                    params.simulation_rate, FALLBACK_STEP
                );
                FALLBACK_STEP
            }
        };

        Physics {
            gravity: params.gravity,
            step,
            accumulator: Duration::ZERO,
            visualize_collisions: params.visualize_collisions,
            debug: CollisionDebug::default(),
        }
    }

    pub fn step_size(&self) -> Duration {
        self.step
    }

    /// Advances the simulation by `dt`, running as many whole steps as have accumulated.
    ///
    /// # Returns
    /// The number of steps run.
    pub fn update(&mut self, dt: Duration, player: &mut Player, world: &impl BlockLookup) -> u32 {
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.step_once(player, world);
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Runs one discrete step regardless of the accumulator.
    pub fn step_once(&mut self, player: &mut Player, world: &impl BlockLookup) {
        let dt = self.step.as_secs_f32();
        player.velocity.y -= self.gravity * dt;
        player.apply_inputs(dt);
        self.detect_collisions(player, world);
    }

    /// Finds and resolves every collision of the player at its current position.
    ///
    /// Sets the grounded flag when a block underneath pushes the player up.
    pub fn detect_collisions(&mut self, player: &mut Player, world: &impl BlockLookup) {
        player.on_ground = false;

        let candidates = broad_phase(player, world);
        let collisions = narrow_phase(&candidates, player);

        if self.visualize_collisions {
            self.debug.contacts = collisions.iter().map(|c| c.contact_point).collect();
            self.debug.candidates = candidates;
        }

        if collisions.is_empty() {
            return;
        }
        player.on_ground = collisions.iter().any(|c| c.normal.y > 0.0);
        resolve_collisions(collisions, player);
    }

    /// Candidates and contacts of the last step, if visualisation is enabled.
    pub fn debug(&self) -> Option<&CollisionDebug> {
        self.visualize_collisions.then_some(&self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerParams;
    use crate::engine_state::voxels::block::{block_type::BlockType, Voxel};
    use cgmath::Point3;
    use std::collections::HashSet;

    struct Blocks(HashSet<(i32, i32, i32)>);

    impl BlockLookup for Blocks {
        fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
            self.0.contains(&(x, y, z)).then(|| Voxel {
                id: BlockType::DIRT.id(),
                instance: None,
            })
        }
    }

    fn floor(half_extent: i32) -> Blocks {
        let mut blocks = HashSet::new();
        for x in -half_extent..=half_extent {
            for z in -half_extent..=half_extent {
                blocks.insert((x, 0, z));
            }
        }
        Blocks(blocks)
    }

    fn player_at(x: f32, y: f32, z: f32) -> Player {
        let mut player = Player::new(&PlayerParams::default());
        player.position = Point3::new(x, y, z);
        player
    }

    fn physics() -> Physics {
        Physics::new(&PhysicsParams::default())
    }

    #[test]
    fn accumulator_runs_whole_steps_only() {
        let mut physics = physics();
        let mut player = player_at(0.0, 100.0, 0.0);
        let empty = Blocks(HashSet::new());

        assert_eq!(physics.step_size(), Duration::from_millis(4));
        assert_eq!(physics.update(Duration::from_millis(10), &mut player, &empty), 2);
        assert_eq!(physics.update(Duration::from_millis(1), &mut player, &empty), 0);
        assert_eq!(physics.update(Duration::from_millis(1), &mut player, &empty), 1);
        assert_eq!(physics.update(Duration::from_millis(400), &mut player, &empty), 100);
    }

    #[test]
    fn gravity_accelerates_free_fall() {
        let mut physics = physics();
        let mut player = player_at(0.0, 100.0, 0.0);
        physics.step_once(&mut player, &Blocks(HashSet::new()));

        let dt = 0.004_f32;
        assert!((player.velocity.y + 32.0 * dt).abs() < 1e-5);
        assert!((player.position.y - (100.0 - 32.0 * dt * dt)).abs() < 1e-4);
        assert!(!player.on_ground);
    }

    #[test]
    fn overlapping_block_below_is_resolved_in_one_step() {
        let mut physics = physics();
        let mut player = player_at(0.0, 0.5 + 1.75 - 0.05, 0.0);
        let world = Blocks(HashSet::from([(0, 0, 0)]));

        physics.step_once(&mut player, &world);

        assert!((player.position.y - 2.25).abs() < 1e-4);
        assert!(player.on_ground);
        assert!(player.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn falling_player_comes_to_rest_on_the_floor() {
        let mut physics = physics();
        let mut player = player_at(0.0, 4.0, 0.0);
        let world = floor(3);

        physics.update(Duration::from_secs(2), &mut player, &world);

        assert!(player.on_ground);
        assert!((player.position.y - 2.25).abs() < 1e-3);
        assert!(player.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn buried_player_climbs_out_of_the_ground() {
        let mut physics = physics();
        let mut ground = HashSet::new();
        for x in -3..=3 {
            for y in -10..=5 {
                for z in -3..=3 {
                    ground.insert((x, y, z));
                }
            }
        }
        let world = Blocks(ground);
        let mut player = player_at(0.0, 4.0, 0.0);

        for _ in 0..50 {
            physics.step_once(&mut player, &world);
            assert!(player.position.y > 3.99, "sank to {}", player.position.y);
        }
        physics.update(Duration::from_secs(1), &mut player, &world);

        assert!(player.on_ground);
        assert!((player.position.y - (5.5 + 1.75)).abs() < 1e-3);
    }

    #[test]
    fn walls_stop_horizontal_motion() {
        let mut physics = physics();
        let mut player = player_at(0.15, 2.0, 0.0);
        player.yaw = std::f32::consts::FRAC_PI_2;
        player.set_movement_input(0.0, -1.0);
        // Yaw π/2 faces -x, so walking backwards heads towards +x.
        let world = Blocks(HashSet::from([(1, 1, 0)]));

        physics.step_once(&mut player, &world);

        assert!((player.position.x - 0.1).abs() < 1e-4);
        assert!(player.world_velocity().x.abs() < 1e-4);
        assert!(!player.on_ground);
    }

    #[test]
    fn jumping_leaves_the_ground() {
        let mut physics = physics();
        let mut player = player_at(0.0, 2.25, 0.0);
        let world = floor(1);
        physics.update(Duration::from_millis(100), &mut player, &world);
        assert!(player.on_ground);

        assert!(player.jump());
        physics.update(Duration::from_millis(100), &mut player, &world);
        assert!(!player.on_ground);
        assert!(player.position.y > 2.5);
    }

    #[test]
    fn collision_debug_is_recorded_on_request() {
        let world = Blocks(HashSet::from([(0, 0, 0)]));
        let mut player = player_at(0.0, 2.2, 0.0);

        let mut quiet = physics();
        quiet.step_once(&mut player, &world);
        assert!(quiet.debug().is_none());

        let mut physics = Physics::new(&PhysicsParams {
            visualize_collisions: true,
            ..PhysicsParams::default()
        });
        player.position = Point3::new(0.0, 2.2, 0.0);
        physics.step_once(&mut player, &world);
        let debug = physics.debug().unwrap();
        assert_eq!(debug.candidates, vec![Point3::new(0, 0, 0)]);
        assert_eq!(debug.contacts.len(), 1);
    }
}
