//! # Terrain and Resource Synthesis
//!
//! Fills a chunk's voxel store from noise, in two passes that must run in this order:
//!
//! 1. **Resources**: every valuable block samples its own 3D field over every
//!    cell and claims the cells where the sample exceeds its scarcity.
//! 2. **Terrain**: each column gets a surface height from a 2D field, then is
//!    filled bottom-up. Grass always lands on the surface; dirt and stone only
//!    fill cells still empty, so ore placed underground survives; everything
//!    above the surface is cleared, ore included.
//!
//! All sampling uses absolute world coordinates so neighboring chunks tile.

use cgmath::Vector3;

use crate::config::{ResourceParams, TerrainParams};
use crate::engine_state::voxels::{block::block_type::BlockType, chunk::voxel_store::VoxelStore};

use super::{noise_field::NoiseField, rng::SeededRng};

/// Places every resource into `store`, drawing one noise field per resource from `rng`.
pub fn generate_resources(
    store: &mut VoxelStore,
    origin: Vector3<i32>,
    resources: &[ResourceParams],
    rng: &mut SeededRng,
) {
    for resource in resources {
        let field = NoiseField::new(rng);
        for x in 0..store.width() {
            for y in 0..store.height() {
                for z in 0..store.width() {
                    let sample = field.sample_3d(
                        (origin.x + x) as f64 / resource.scale.x,
                        (origin.y + y) as f64 / resource.scale.y,
                        (origin.z + z) as f64 / resource.scale.z,
                    );
                    if sample > resource.scarcity {
                        store.set_id(x, y, z, resource.block.id());
                    }
                }
            }
        }
    }
}

/// Surface height of a column for a raw 2D noise sample, clamped into `[0, chunk_height - 1]`.
pub fn surface_height(noise: f64, terrain: &TerrainParams, chunk_height: i32) -> i32 {
    let scaled = terrain.offset + terrain.magnitude * noise;
    let height = (chunk_height as f64 * scaled).floor();
    height.clamp(0.0, (chunk_height - 1) as f64) as i32
}

/// Fills the grass, dirt and stone layers and clears everything above the surface.
pub fn generate_terrain(
    store: &mut VoxelStore,
    origin: Vector3<i32>,
    terrain: &TerrainParams,
    rng: &mut SeededRng,
) {
    let field = NoiseField::new(rng);
    let air = BlockType::AIR.id();

    for x in 0..store.width() {
        for z in 0..store.width() {
            let value = field.sample_2d(
                (origin.x + x) as f64 / terrain.scale,
                (origin.z + z) as f64 / terrain.scale,
            );
            let height = surface_height(value, terrain, store.height());
            let dirt_floor = height as f64 - terrain.dirt_layer;

            for y in 0..store.height() {
                let is_empty = store.get(x, y, z).is_some_and(|voxel| voxel.id == air);
                if y == height {
                    store.set_id(x, y, z, BlockType::GRASS.id());
                } else if y < height && y as f64 > dirt_floor && is_empty {
                    store.set_id(x, y, z, BlockType::DIRT.id());
                } else if y as f64 <= dirt_floor && is_empty {
                    store.set_id(x, y, z, BlockType::STONE.id());
                } else if y > height {
                    store.set_id(x, y, z, air);
                }
            }
        }
    }
}

/// Runs both passes on a freshly cleared store with a generator seeded from `seed`.
pub fn generate_chunk_blocks(
    store: &mut VoxelStore,
    origin: Vector3<i32>,
    seed: u32,
    terrain: &TerrainParams,
    resources: &[ResourceParams],
) {
    let mut rng = SeededRng::new(seed);
    store.clear();
    generate_resources(store, origin, resources, &mut rng);
    generate_terrain(store, origin, terrain, &mut rng);
}
