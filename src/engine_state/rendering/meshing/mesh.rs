//! Per-chunk face placement groups.

use std::collections::BTreeMap;

use cgmath::Vector3;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType, BLOCK_REGISTRY};

use super::face::{FaceInstanceRaw, FacePlacement};

/// Key of a placement group: one draw call per block type and face.
pub type FaceGroupKey = (BlockType, BlockSide);

/// The renderable surface of one chunk.
///
/// Groups exist for every drawable block type and every side, even when empty,
/// so a renderer can keep one instanced draw per group for the chunk's lifetime.
/// The whole mesh is replaced on every remesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// World-space origin of the owning chunk
    pub origin: Vector3<i32>,
    groups: BTreeMap<FaceGroupKey, Vec<FacePlacement>>,
}

impl ChunkMesh {
    /// Creates a mesh with an empty group for every block type and side.
    pub fn new(origin: Vector3<i32>) -> Self {
        let mut groups = BTreeMap::new();
        for descriptor in BLOCK_REGISTRY.iter().filter(|d| d.block_type.is_solid()) {
            for side in BlockSide::all() {
                groups.insert((descriptor.block_type, side), Vec::new());
            }
        }
        ChunkMesh { origin, groups }
    }

    /// Appends a placement to its group and returns its index there.
    ///
    /// Returns `None` when no group exists for `key`.
    pub fn push(&mut self, key: FaceGroupKey, placement: FacePlacement) -> Option<u32> {
        let group = self.groups.get_mut(&key)?;
        group.push(placement);
        Some((group.len() - 1) as u32)
    }

    /// Placements of one group, empty if the group does not exist.
    pub fn group(&self, block_type: BlockType, side: BlockSide) -> &[FacePlacement] {
        self.groups
            .get(&(block_type, side))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All groups in `(block type, side)` order.
    pub fn groups(&self) -> impl Iterator<Item = (&FaceGroupKey, &Vec<FacePlacement>)> {
        self.groups.iter()
    }

    /// Renderer-facing name of a group, e.g. `grass_top`.
    pub fn group_name(block_type: BlockType, side: BlockSide) -> String {
        format!("{}_{}", block_type.name(), side.name())
    }

    pub fn face_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Instance buffer contents for one group.
    pub fn instances(&self, block_type: BlockType, side: BlockSide) -> Vec<FaceInstanceRaw> {
        self.group(block_type, side)
            .iter()
            .map(|placement| FaceInstanceRaw::new(placement, self.origin))
            .collect()
    }
}
