//! Face-culling mesher.
//!
//! Emits one placement per block face whose neighbor cell is empty. Neighbors
//! are only looked up in the store being meshed: a face on the chunk boundary is
//! always emitted, whatever the adjacent chunk holds. This keeps meshing free of
//! cross-chunk dependencies.

use cgmath::Vector3;
use log::warn;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType, InstanceRef},
    chunk::voxel_store::VoxelStore,
};

use super::{face::FacePlacement, mesh::ChunkMesh};

/// Builds the complete mesh of `store` and rewrites every voxel's instance reference.
///
/// A voxel's reference points at its first emitted face in [`BlockSide::all`] order;
/// voxels with no exposed face end up with no reference.
pub fn build_chunk_mesh(store: &mut VoxelStore, origin: Vector3<i32>) -> ChunkMesh {
    let mut mesh = ChunkMesh::new(origin);
    store.clear_instance_refs();

    for x in 0..store.width() {
        for y in 0..store.height() {
            for z in 0..store.width() {
                let Some(voxel) = store.get(x, y, z) else {
                    continue;
                };
                if voxel.is_air() {
                    continue;
                }
                let Some(block_type) = BlockType::from_id(voxel.id) else {
                    warn!("Unknown block id {} at ({}, {}, {}), skipping", voxel.id, x, y, z);
                    continue;
                };

                let mut first_face = None;
                for side in BlockSide::all() {
                    let offset = side.normal();
                    if store.is_solid(x + offset.x, y + offset.y, z + offset.z) {
                        continue;
                    }

                    let key = (block_type, side);
                    match mesh.push(key, FacePlacement::new(x, y, z, side)) {
                        Some(index) => {
                            first_face.get_or_insert(InstanceRef { side, index });
                        }
                        None => {
                            warn!(
                                "No mesh group found for key: {}",
                                ChunkMesh::group_name(block_type, side)
                            );
                        }
                    }
                }
                store.set_instance_ref(x, y, z, first_face);
            }
        }
    }

    mesh
}
