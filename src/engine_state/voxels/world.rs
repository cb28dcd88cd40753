//! # World Module
//!
//! This module provides the `World` struct which owns the live chunks around the
//! player and answers world-space block queries.
//!
//! ## Architecture
//!
//! The live set is fully derived from the player's position: after every
//! [`World::update`] it holds exactly the chunks within `draw_distance` (Chebyshev)
//! of the chunk containing the player. Chunks entering the set are created in the
//! `generating` state and generated either synchronously or through a background
//! [`ChunkGenerationTask`]; chunks leaving it are dropped together with their
//! voxels and mesh.
//!
//! ## Coordinates
//!
//! Only the horizontal axes are chunked:
//! - `chunk = floor(world / width)`
//! - `local = world - width * chunk`
//! - local y equals world y

use std::collections::HashMap;
use std::rc::Rc;

use cgmath::Point3;
use log::{debug, info, warn};
use web_time::Duration;

use crate::config::WorldParams;
use crate::core::StResource;
use crate::engine_state::task_management::{task::TaskPriority, TaskManager};
use crate::engine_state::voxels::{
    block::{block_type::BlockType, BlockTypeSize, Voxel},
    chunk::{Chunk, ChunkCoord, ChunkState},
    tasks::ChunkGenerationTask,
};

/// Read access to blocks by integer world coordinates.
///
/// Physics depends on this contract rather than on [`World`] directly.
pub trait BlockLookup {
    /// Voxel at the world coordinates, `None` when nothing is known there.
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel>;

    /// Whether a solid block occupies the cell. Unknown cells are not solid.
    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_some_and(|voxel| !voxel.is_air())
    }
}

/// Represents the voxel world as a set of live chunks keyed by chunk coordinate.
pub struct World {
    /// Generation parameters shared with queued generation tasks
    params: Rc<WorldParams>,
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, StResource<Chunk>>,
    /// Deferred chunk generation
    task_manager: TaskManager,
}

impl World {
    /// Creates a new, empty world. No chunk exists until the first [`World::update`].
    pub fn new(params: WorldParams) -> Self {
        World {
            params: Rc::new(params),
            chunks: HashMap::new(),
            task_manager: TaskManager::new(),
        }
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    /// Brings the live set in line with the chunks visible from `player_position`.
    ///
    /// Chunks outside the draw distance are dropped, missing ones are created one
    /// at a time, each entering the `generating` state on its own.
    pub fn update(&mut self, player_position: Point3<f32>) {
        let center = ChunkCoord::from_world_position(player_position, self.params.chunk.width);
        let draw_distance = self.params.draw_distance;

        self.chunks.retain(|coord, _| {
            let keep = coord.chebyshev_distance(center) <= draw_distance;
            if !keep {
                debug!("Unloading chunk {}", coord);
            }
            keep
        });

        for coord in self.visible_chunks(center) {
            if !self.chunks.contains_key(&coord) {
                self.add_chunk(coord);
            }
        }
    }

    /// Drops every chunk and pending generation, then rebuilds the live set.
    pub fn regenerate(&mut self, player_position: Point3<f32>) {
        info!(
            "Regenerating world (seed {}, draw distance {})",
            self.params.seed, self.params.draw_distance
        );
        self.chunks.clear();
        self.task_manager.clear();
        self.update(player_position);
    }

    /// Replaces the generation parameters. Always followed by a full regenerate.
    pub fn set_params(&mut self, params: WorldParams, player_position: Point3<f32>) {
        self.params = Rc::new(params);
        self.regenerate(player_position);
    }

    /// Block at integer world coordinates.
    ///
    /// # Returns
    /// `None` if the owning chunk is absent or still generating, or if `y` is
    /// outside the world height.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        let (coord, local) = self.world_to_local(x, y, z);
        let chunk = self.chunks.get(&coord)?.get();
        if !chunk.is_loaded() {
            return None;
        }
        chunk.get_block(local.x, local.y, local.z)
    }

    /// Sets the block at integer world coordinates and remeshes the owning chunk.
    ///
    /// # Returns
    /// `false` if the id is unknown, or the owning chunk is not loaded, or `y` is
    /// outside the world height.
    pub fn set_block_id(&mut self, x: i32, y: i32, z: i32, id: BlockTypeSize) -> bool {
        if BlockType::from_id(id).is_none() {
            warn!("Ignoring edit with unknown block id {}", id);
            return false;
        }

        let (coord, local) = self.world_to_local(x, y, z);
        let Some(chunk) = self.chunks.get(&coord) else {
            return false;
        };
        let mut chunk = chunk.get_mut();
        if !chunk.is_loaded() {
            return false;
        }
        chunk.set_block(local.x, local.y, local.z, id)
    }

    /// Runs queued chunk generation: all overdue tasks plus whatever fits in `idle_budget`.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn process_tasks(&mut self, idle_budget: Duration) -> usize {
        self.task_manager.process_queued_tasks(idle_budget)
    }

    /// Splits integer world coordinates into a chunk coordinate and chunk-local coordinates.
    pub fn world_to_local(&self, x: i32, y: i32, z: i32) -> (ChunkCoord, Point3<i32>) {
        let width = self.params.chunk.width;
        let coord = ChunkCoord::from_block(x, z, width);
        let origin = coord.origin(width);
        (coord, Point3::new(x - origin.x, y, z - origin.z))
    }

    /// Inverse of [`World::world_to_local`].
    pub fn local_to_world(&self, coord: ChunkCoord, local: Point3<i32>) -> Point3<i32> {
        let origin = coord.origin(self.params.chunk.width);
        Point3::new(origin.x + local.x, local.y, origin.z + local.z)
    }

    pub fn chunk_state(&self, coord: ChunkCoord) -> ChunkState {
        self.chunks
            .get(&coord)
            .map_or(ChunkState::Absent, |chunk| chunk.get().state())
    }

    /// Handle to a live chunk.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<StResource<Chunk>> {
        self.chunks.get(&coord).cloned()
    }

    /// Coordinates of every live chunk, sorted.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|chunk| chunk.get().is_loaded())
            .count()
    }

    /// Number of generation tasks still queued, including ones whose chunk was since dropped.
    pub fn pending_tasks(&self) -> usize {
        self.task_manager.len()
    }

    fn visible_chunks(&self, center: ChunkCoord) -> Vec<ChunkCoord> {
        let distance = self.params.draw_distance as i32;
        let mut coords = Vec::new();
        for x in -distance..=distance {
            for z in -distance..=distance {
                coords.push(ChunkCoord::new(center.x + x, center.z + z));
            }
        }
        coords
    }

    fn add_chunk(&mut self, coord: ChunkCoord) {
        debug!("Creating chunk {}", coord);
        let chunk = StResource::new(Chunk::new(coord, &self.params.chunk));
        let task = ChunkGenerationTask::new(chunk.downgrade(), self.params.clone());
        self.chunks.insert(coord, chunk);

        let priority = match self.params.loading.timeout() {
            Some(timeout) => TaskPriority::Background { timeout },
            None => TaskPriority::Immediate,
        };
        self.task_manager.publish_task(Box::new(task), priority);
    }
}

impl BlockLookup for World {
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        World::get_block(self, x, y, z)
    }
}
