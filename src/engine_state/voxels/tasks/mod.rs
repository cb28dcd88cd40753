//! # Voxel Task System
//!
//! Deferred work belonging to the voxel world, scheduled through the engine's
//! `TaskManager`.

pub mod chunk_generation_task;

pub use chunk_generation_task::ChunkGenerationTask;
