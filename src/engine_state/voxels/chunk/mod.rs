//! # Chunk Module
//!
//! A chunk is a `width × height × width` column of the world, independently
//! generated and meshed. Chunks are identified by their `(x, z)` chunk
//! coordinate; the height axis is never split, so every chunk spans the whole
//! world height starting at y = 0.
//!
//! ## Lifecycle
//!
//! ```text
//! absent -> generating -> loaded
//!    ^          |           |
//!    +----------+-----------+   (leaves the visible set)
//! ```
//!
//! A freshly created chunk is `generating` until [`Chunk::generate`] has run
//! terrain synthesis and meshing; only then does it answer block queries.

use std::fmt;

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::Instant;

use crate::config::{ChunkDimensions, WorldParams};
use crate::engine_state::rendering::meshing::{build_chunk_mesh, ChunkMesh};
use crate::engine_state::voxels::{
    block::{BlockTypeSize, Voxel},
    generation::terrain::generate_chunk_blocks,
};

use voxel_store::VoxelStore;

pub mod voxel_store;

/// Identity of a chunk: its position on the horizontal chunk grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Chunk containing the world-space point, using floor division.
    pub fn from_world_position(position: Point3<f32>, chunk_width: u32) -> Self {
        let width = chunk_width as f32;
        ChunkCoord {
            x: (position.x / width).floor() as i32,
            z: (position.z / width).floor() as i32,
        }
    }

    /// Chunk containing the integer world block coordinate.
    pub fn from_block(x: i32, z: i32, chunk_width: u32) -> Self {
        let width = chunk_width as i32;
        ChunkCoord {
            x: x.div_euclid(width),
            z: z.div_euclid(width),
        }
    }

    /// World-space position of the chunk's `(0, 0, 0)` voxel.
    pub fn origin(self, chunk_width: u32) -> Vector3<i32> {
        let width = chunk_width as i32;
        Vector3::new(self.x * width, 0, self.z * width)
    }

    /// Chebyshev distance between two chunk coordinates.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Where a chunk coordinate is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Not in the live set
    Absent,
    /// Created but not yet generated; block queries return nothing
    Generating,
    /// Generated and meshed
    Loaded,
}

/// One generated column of voxels together with its renderable mesh.
pub struct Chunk {
    /// Position on the chunk grid
    pub coord: ChunkCoord,
    /// World-space position of local voxel `(0, 0, 0)`
    pub origin: Vector3<i32>,
    store: VoxelStore,
    mesh: ChunkMesh,
    loaded: bool,
}

impl Chunk {
    /// Creates an empty, not yet generated chunk.
    ///
    /// # Arguments
    /// * `coord` - Position on the chunk grid
    /// * `dimensions` - Chunk width and height in blocks
    pub fn new(coord: ChunkCoord, dimensions: &ChunkDimensions) -> Self {
        let origin = coord.origin(dimensions.width);
        Chunk {
            coord,
            origin,
            store: VoxelStore::new(dimensions.width, dimensions.height),
            mesh: ChunkMesh::new(origin),
            loaded: false,
        }
    }

    /// Runs resource placement, terrain synthesis and meshing, then marks the chunk loaded.
    ///
    /// Generation always starts from a cleared store, so calling this again with
    /// the same parameters reproduces the same voxels and mesh.
    pub fn generate(&mut self, params: &WorldParams) {
        let start = Instant::now();

        generate_chunk_blocks(
            &mut self.store,
            self.origin,
            params.seed,
            &params.terrain,
            &params.resources,
        );
        self.remesh();
        self.loaded = true;

        debug!(
            "Loaded chunk {} in {:.2} ms ({} faces)",
            self.coord,
            start.elapsed().as_secs_f64() * 1000.0,
            self.mesh.face_count()
        );
    }

    /// Rebuilds the whole mesh from the current voxels.
    pub fn remesh(&mut self) {
        self.mesh = build_chunk_mesh(&mut self.store, self.origin);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self) -> ChunkState {
        if self.loaded {
            ChunkState::Loaded
        } else {
            ChunkState::Generating
        }
    }

    /// Voxel at chunk-local coordinates, `None` outside the chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.store.get(x, y, z)
    }

    /// Sets a voxel id and remeshes the chunk.
    ///
    /// # Returns
    /// `false` if the coordinates are outside the chunk.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockTypeSize) -> bool {
        if !self.store.in_bounds(x, y, z) {
            return false;
        }
        self.store.set_id(x, y, z, id);
        self.remesh();
        true
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Voxel ids in storage order.
    pub fn block_ids(&self) -> Vec<BlockTypeSize> {
        self.store.ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn small_params(seed: u32) -> WorldParams {
        WorldParams {
            seed,
            chunk: ChunkDimensions {
                width: 16,
                height: 16,
            },
            ..WorldParams::default()
        }
    }

    #[test]
    fn coordinates_floor_towards_negative_infinity() {
        assert_eq!(
            ChunkCoord::from_world_position(Point3::new(-0.5, 3.0, 63.9), 64),
            ChunkCoord::new(-1, 0)
        );
        assert_eq!(ChunkCoord::from_block(-64, -65, 64), ChunkCoord::new(-1, -2));
        assert_eq!(ChunkCoord::new(-1, 2).origin(16), Vector3::new(-16, 0, 32));
        assert_eq!(ChunkCoord::new(-1, 2).chebyshev_distance(ChunkCoord::new(1, 1)), 2);
    }

    #[test]
    fn new_chunk_is_generating_until_generated() {
        let params = small_params(5);
        let mut chunk = Chunk::new(ChunkCoord::new(2, -3), &params.chunk);
        assert_eq!(chunk.state(), ChunkState::Generating);
        assert_eq!(chunk.mesh().face_count(), 0);

        chunk.generate(&params);
        assert_eq!(chunk.state(), ChunkState::Loaded);
        assert!(chunk.mesh().face_count() > 0);
    }

    #[test]
    fn regeneration_is_deterministic() {
        let params = small_params(1234);
        let mut first = Chunk::new(ChunkCoord::new(-1, 4), &params.chunk);
        let mut second = Chunk::new(ChunkCoord::new(-1, 4), &params.chunk);
        first.generate(&params);
        second.generate(&params);
        assert_eq!(first.block_ids(), second.block_ids());
        assert_eq!(first.mesh(), second.mesh());

        let before = first.block_ids();
        first.generate(&params);
        assert_eq!(first.block_ids(), before);
        assert_eq!(first.mesh(), second.mesh());
    }

    #[test]
    fn different_seeds_give_different_terrain() {
        let mut a = Chunk::new(ChunkCoord::new(0, 0), &small_params(1).chunk);
        let mut b = Chunk::new(ChunkCoord::new(0, 0), &small_params(2).chunk);
        a.generate(&small_params(1));
        b.generate(&small_params(2));
        assert_ne!(a.block_ids(), b.block_ids());
    }

    #[test]
    fn set_block_remeshes() {
        let params = small_params(3);
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), &params.chunk);
        chunk.generate(&params);

        let top = 15;
        assert!(chunk.get_block(4, top, 4).unwrap().is_air());
        let faces = chunk.mesh().face_count();

        assert!(chunk.set_block(4, top, 4, BlockType::STONE.id()));
        assert_eq!(chunk.get_block(4, top, 4).unwrap().block_type(), Some(BlockType::STONE));
        assert!(chunk.get_block(4, top, 4).unwrap().instance.is_some());
        assert!(chunk.mesh().face_count() > faces);

        assert!(!chunk.set_block(16, 0, 0, BlockType::STONE.id()));
    }
}
