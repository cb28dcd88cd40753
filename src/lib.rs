#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A procedurally generated, chunked voxel world with a walking player.
//!
//! The crate provides the simulation core of a block-building game: seeded
//! terrain and ore generation, a face-culling mesher producing per-chunk
//! instance groups for a renderer, chunk streaming around the player, and
//! fixed-timestep cylinder-versus-block physics.
//!
//! ## Key Modules
//!
//! * `config` - Tunable parameters, JSON loading and validation
//! * `core` - Shared single-threaded resource handles
//! * `engine_state` - The world, player, physics, meshing and task scheduling
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = voxel_world::run() {
//!         eprintln!("{}", err);
//!     }
//! }
//! ```
//!
//! Embedding the engine directly:
//!
//! ```
//! use voxel_world::config::{ChunkLoading, EngineConfig};
//! use voxel_world::engine_state::EngineState;
//! use web_time::Duration;
//!
//! let mut config = EngineConfig::default();
//! config.world.chunk.width = 16;
//! config.world.loading = ChunkLoading::Synchronous;
//!
//! let mut engine = EngineState::new(config);
//! engine.frame(Duration::from_millis(16));
//! assert!(engine.world.get_block(32, 0, 32).is_some());
//! ```

use log::info;
use web_time::Duration;

use config::{ConfigError, EngineConfig};
use engine_state::EngineState;

pub mod config;
pub mod core;
pub mod engine_state;

/// Frames simulated by the headless driver when none are requested.
pub const DEFAULT_FRAME_COUNT: u32 = 600;

/// Simulated frame length of the headless driver.
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Runs the engine headless.
///
/// Arguments, both optional: a JSON config path and a frame count. The player
/// state is logged once per simulated second.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };
    let frames = match args.get(2) {
        Some(count) => count
            .parse::<u32>()
            .map_err(|err| ConfigError::Invalid(format!("invalid frame count {:?}: {}", count, err)))?,
        None => DEFAULT_FRAME_COUNT,
    };

    let mut state = EngineState::new(config);
    let frames_per_second = (1.0 / FRAME_TIME.as_secs_f64()).round() as u32;

    for frame in 1..=frames {
        state.frame(FRAME_TIME);

        if frame % frames_per_second == 0 {
            let position = state.player_position();
            info!(
                "t={}s position=({:.3}, {:.3}, {:.3}) grounded={} loaded_chunks={}",
                frame / frames_per_second,
                position.x,
                position.y,
                position.z,
                state.player.on_ground,
                state.world.loaded_chunk_count()
            );
        }
    }

    info!("Simulated {} frames", frames);
    Ok(())
}
