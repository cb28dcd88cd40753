//! # Engine State Module
//!
//! The core engine module that owns the simulated world and drives it frame by frame.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `physics` - Fixed-timestep player physics and collision handling
//! * `player` - The player body and its controls
//! * `rendering` - Renderer-facing mesh output
//! * `task_management` - Deferred work with idle-time scheduling
//! * `voxels` - Voxel data, chunks, and world generation
//!
//! ## Frame Order
//!
//! 1. Pending player actions are applied to the player
//! 2. Physics consumes the frame time in fixed steps
//! 3. The world's live chunk set follows the player's new position
//! 4. Queued chunk generation runs within the idle budget

use cgmath::Point3;
use log::info;
use web_time::Duration;

use physics::Physics;
use player::Player;
use voxels::world::World;

use crate::config::{EngineConfig, WorldParams};

pub mod physics;
pub mod player;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// Time each frame may spend on queued chunk generation before deadlines force it.
pub const IDLE_BUDGET: Duration = Duration::from_millis(4);

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```
/// use voxel_world::config::EngineConfig;
/// use voxel_world::engine_state::EngineState;
/// use web_time::Duration;
///
/// let mut engine_state = EngineState::new(EngineConfig::default());
/// engine_state.player_actions.move_forward = true;
/// engine_state.frame(Duration::from_millis(16));
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// The simulated player body
    pub player: Player,
    /// Fixed-timestep physics engine
    pub physics: Physics,
    /// Player actions to apply on the next frame
    pub player_actions: PlayerAction,
    /// Time per frame granted to queued tasks
    pub idle_budget: Duration,
}

impl EngineState {
    /// Creates a new engine state and loads the chunks around the spawn point.
    ///
    /// # Arguments
    ///
    /// * `config` - World, player and physics parameters, assumed valid
    pub fn new(config: EngineConfig) -> Self {
        let player = Player::new(&config.player);
        let physics = Physics::new(&config.physics);
        let mut world = World::new(config.world);
        world.update(player.position);

        info!(
            "Engine initialized: {} chunks around spawn {:?}",
            world.chunk_coords().len(),
            player.position
        );

        Self {
            world,
            player,
            physics,
            player_actions: PlayerAction::default(),
            idle_budget: IDLE_BUDGET,
        }
    }

    /// Advances the engine by one frame.
    ///
    /// # Arguments
    ///
    /// * `dt` - The time elapsed since the last frame
    ///
    /// # Returns
    ///
    /// The number of physics steps that ran.
    pub fn frame(&mut self, dt: Duration) -> u32 {
        self.apply_player_actions();
        let steps = self.physics.update(dt, &mut self.player, &self.world);
        self.world.update(self.player.position);
        self.world.process_tasks(self.idle_budget);
        steps
    }

    /// Replaces the generation parameters and regenerates the world around the player.
    pub fn set_world_params(&mut self, params: WorldParams) {
        self.world.set_params(params, self.player.position);
    }

    /// Regenerates the world around the player with the current parameters.
    pub fn regenerate(&mut self) {
        self.world.regenerate(self.player.position);
    }

    pub fn player_position(&self) -> Point3<f32> {
        self.player.position
    }

    /// Applies held movement and consumes the one-shot actions.
    fn apply_player_actions(&mut self) {
        let actions = &mut self.player_actions;
        let right = axis(actions.move_right, actions.move_left);
        let forward = axis(actions.move_forward, actions.move_backward);
        self.player.set_movement_input(right, forward);

        if let Some(delta) = actions.rotate_view.take() {
            self.player.yaw += delta;
        }
        if std::mem::take(&mut actions.jump) {
            self.player.jump();
        }
        if std::mem::take(&mut actions.respawn) {
            self.player.respawn();
        }
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Represents player actions derived from input
///
/// Movement flags are held state; `rotate_view`, `jump` and `respawn` are
/// consumed by the next frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true while the key is held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,

    /// Yaw change in radians
    pub rotate_view: Option<f32>,

    /// Jump if standing on a block
    pub jump: bool,
    /// Return to the spawn position
    pub respawn: bool,
}
