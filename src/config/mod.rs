//! # Configuration
//!
//! Every tunable value of the engine, grouped the way the parameter UI groups
//! them: world generation, player, physics.
//!
//! All structs deserialize with defaults, so a JSON file only has to name the
//! values it changes:
//!
//! ```json
//! {
//!     "world": {
//!         "seed": 42,
//!         "terrain": { "magnitude": 0.4 },
//!         "loading": { "mode": "synchronous" }
//!     }
//! }
//! ```
//!
//! The core assumes a configuration it receives is valid. [`EngineConfig::load`]
//! and [`EngineConfig::from_json_str`] validate before returning.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::engine_state::voxels::block::{self, block_type::BlockType};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Size of a chunk in blocks. Chunks are `width × height × width`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkDimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self {
            width: 64,
            height: 16,
        }
    }
}

/// Parameters of the surface height field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Horizontal noise scale; world coordinates are divided by this.
    pub scale: f64,
    /// Height variation as a fraction of chunk height.
    pub magnitude: f64,
    /// Mean surface height as a fraction of chunk height.
    pub offset: f64,
    /// Depth of the dirt band below grass.
    pub dirt_layer: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: 30.0,
            magnitude: 0.2,
            offset: 0.5,
            dirt_layer: 3.0,
        }
    }
}

/// Per-axis noise scale of a resource.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceScale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Placement parameters of one valuable block.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceParams {
    pub block: BlockType,
    pub scarcity: f64,
    pub scale: ResourceScale,
}

impl ResourceParams {
    /// The registry defaults for every valuable block, in id order.
    pub fn registry_defaults() -> Vec<ResourceParams> {
        block::resources()
            .filter_map(|descriptor| {
                descriptor.generation.map(|generation| ResourceParams {
                    block: descriptor.block_type,
                    scarcity: generation.scarcity,
                    scale: ResourceScale {
                        x: generation.scale[0],
                        y: generation.scale[1],
                        z: generation.scale[2],
                    },
                })
            })
            .collect()
    }
}

/// How newly visible chunks get generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChunkLoading {
    /// Generate inside `World::update`, before it returns.
    Synchronous,
    /// Queue generation for idle time, forcing it once `timeout_ms` has passed.
    Background { timeout_ms: u64 },
}

impl ChunkLoading {
    /// The forced-run deadline of background generation, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            ChunkLoading::Synchronous => None,
            ChunkLoading::Background { timeout_ms } => Some(Duration::from_millis(*timeout_ms)),
        }
    }
}

impl Default for ChunkLoading {
    fn default() -> Self {
        ChunkLoading::Background { timeout_ms: 1000 }
    }
}

/// Everything that determines the generated world.
///
/// Changing any of these requires a full regenerate, see
/// [`World::set_params`](crate::engine_state::voxels::world::World::set_params).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    pub seed: u32,
    /// Radius in chunks of the loaded square around the player.
    pub draw_distance: u32,
    pub chunk: ChunkDimensions,
    pub terrain: TerrainParams,
    pub resources: Vec<ResourceParams>,
    pub loading: ChunkLoading,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            seed: 0,
            draw_distance: 1,
            chunk: ChunkDimensions::default(),
            terrain: TerrainParams::default(),
            resources: ResourceParams::registry_defaults(),
            loading: ChunkLoading::default(),
        }
    }
}

impl WorldParams {
    /// Checks the preconditions the generator and world manager rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk.width == 0 || self.chunk.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk dimensions must be positive, got {}x{}",
                self.chunk.width, self.chunk.height
            )));
        }
        if self.terrain.scale == 0.0 {
            return Err(ConfigError::Invalid("terrain scale must be non-zero".into()));
        }
        for resource in &self.resources {
            if !block::descriptor(resource.block).valuable {
                return Err(ConfigError::Invalid(format!(
                    "{} is not a resource block",
                    resource.block
                )));
            }
            if !(0.0..1.0).contains(&resource.scarcity) {
                return Err(ConfigError::Invalid(format!(
                    "{} scarcity must be in [0, 1), got {}",
                    resource.block, resource.scarcity
                )));
            }
            let scale = resource.scale;
            if scale.x <= 0.0 || scale.y <= 0.0 || scale.z <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} scale must be positive on every axis",
                    resource.block
                )));
            }
        }
        Ok(())
    }
}

/// Player body and controls.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParams {
    pub height: f32,
    pub radius: f32,
    pub max_speed: f32,
    pub jump_speed: f32,
    /// Eye position the player starts at and respawns to.
    pub spawn_position: [f32; 3],
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            height: 1.75,
            radius: 0.4,
            max_speed: 5.0,
            jump_speed: 10.0,
            spawn_position: [32.0, 50.0, 32.0],
        }
    }
}

/// Fixed-timestep simulation settings.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration in blocks/s².
    pub gravity: f32,
    /// Steps per simulated second.
    pub simulation_rate: f32,
    /// Keep the last step's candidates and contact points for a debug renderer.
    pub visualize_collisions: bool,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            simulation_rate: 250.0,
            visualize_collisions: false,
        }
    }
}

/// Top-level configuration of the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldParams,
    pub player: PlayerParams,
    pub physics: PhysicsParams,
}

impl EngineConfig {
    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if self.physics.simulation_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "simulation rate must be positive".into(),
            ));
        }
        if self.player.height <= 0.0 || self.player.radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "player height and radius must be positive".into(),
            ));
        }
        Ok(())
    }
}
