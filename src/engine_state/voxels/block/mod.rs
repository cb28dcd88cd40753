//! # Block Module
//!
//! This module provides the block registry and the per-cell voxel entry.
//!
//! The registry is a fixed table indexed by block id, defined once and never
//! mutated. Tunable generation values (ore scarcity and scale) start from the
//! registry defaults but live in [`WorldParams`](crate::config::WorldParams).

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Default 3D noise settings for a valuable block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResourceGeneration {
    /// Noise sampling scale per axis. Larger values give larger veins.
    pub scale: [f64; 3],
    /// Noise threshold in `[0, 1)`; a cell becomes ore when the sample exceeds it.
    pub scarcity: f64,
}

/// Immutable description of a block type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockDescriptor {
    pub block_type: BlockType,
    pub name: &'static str,
    /// Valuable blocks are the resources placed by the ore pass.
    pub valuable: bool,
    /// Texture name per face, in [`BlockSide`] order. `None` for blocks that are never drawn.
    pub material: Option<[&'static str; 6]>,
    pub generation: Option<ResourceGeneration>,
}

impl BlockDescriptor {
    /// Texture name for one face of this block.
    pub fn texture(&self, side: BlockSide) -> Option<&'static str> {
        self.material.map(|material| material[side as usize])
    }
}

/// The block registry, indexed by block id.
pub static BLOCK_REGISTRY: [BlockDescriptor; 6] = [
    BlockDescriptor {
        block_type: BlockType::AIR,
        name: "air",
        valuable: false,
        material: None,
        generation: None,
    },
    BlockDescriptor {
        block_type: BlockType::GRASS,
        name: "grass",
        valuable: false,
        // RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK
        material: Some(["grass_side", "grass_side", "grass", "dirt", "grass_side", "grass_side"]),
        generation: None,
    },
    BlockDescriptor {
        block_type: BlockType::DIRT,
        name: "dirt",
        valuable: false,
        material: Some(["dirt"; 6]),
        generation: None,
    },
    BlockDescriptor {
        block_type: BlockType::STONE,
        name: "stone",
        valuable: false,
        material: Some(["stone"; 6]),
        generation: None,
    },
    BlockDescriptor {
        block_type: BlockType::COAL_ORE,
        name: "coal_ore",
        valuable: true,
        material: Some(["coal_ore"; 6]),
        generation: Some(ResourceGeneration {
            scale: [20.0, 20.0, 20.0],
            scarcity: 0.8,
        }),
    },
    BlockDescriptor {
        block_type: BlockType::IRON_ORE,
        name: "iron_ore",
        valuable: true,
        material: Some(["iron_ore"; 6]),
        generation: Some(ResourceGeneration {
            scale: [40.0, 40.0, 40.0],
            scarcity: 0.9,
        }),
    },
];

/// Looks up the registry entry of a block type.
pub fn descriptor(block_type: BlockType) -> &'static BlockDescriptor {
    &BLOCK_REGISTRY[block_type as usize]
}

/// The resource subset of the registry: every valuable block, in id order.
pub fn resources() -> impl Iterator<Item = &'static BlockDescriptor> {
    BLOCK_REGISTRY.iter().filter(|descriptor| descriptor.valuable)
}

/// Non-owning link from a voxel to one of its face placements in the chunk mesh.
///
/// Only valid for the mesh generation that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InstanceRef {
    pub side: BlockSide,
    /// Index into the `(block type, side)` placement group.
    pub index: u32,
}

/// One grid cell of a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Voxel {
    /// Block id, see [`BlockType`].
    pub id: BlockTypeSize,
    /// Back-reference into the current mesh, recomputed on every remesh.
    pub instance: Option<InstanceRef>,
}

impl Voxel {
    pub const AIR: Voxel = Voxel {
        id: 0,
        instance: None,
    };

    pub fn is_air(&self) -> bool {
        self.id == BlockType::AIR.id()
    }

    /// The block type of this voxel, or `None` if its id is not registered.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_id(self.id)
    }
}
