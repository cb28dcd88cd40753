//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world and the
//! conversions between a block type, its compact integer id and its registry name.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminant is the block id stored in every voxel. Id 0 is always air.
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BlockType {
    /// Empty space. Never rendered, never collided with.
    AIR = 0,

    /// Surface block. Grass on top, dirt underneath, grass-on-dirt on the sides.
    GRASS = 1,

    /// The layer directly below grass.
    DIRT = 2,

    /// Everything below the dirt layer.
    STONE = 3,

    /// Common ore, placed by 3D noise before terrain filling.
    COAL_ORE = 4,

    /// Rarer ore with larger, sparser veins.
    IRON_ORE = 5,
}

/// Lookup from registry name to block type, used when reading configuration.
static BLOCK_NAMES: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "air" => BlockType::AIR,
    "grass" => BlockType::GRASS,
    "dirt" => BlockType::DIRT,
    "stone" => BlockType::STONE,
    "coal_ore" => BlockType::COAL_ORE,
    "iron_ore" => BlockType::IRON_ORE,
};

impl BlockType {
    /// Resolves a voxel id into a block type.
    ///
    /// Returns `None` for ids that no registry entry claims.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// Resolves a registry name (e.g. `"coal_ore"`) into a block type.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_NAMES.get(name).copied()
    }

    /// The compact id stored in voxels.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// The registry name of this block type.
    pub fn name(self) -> &'static str {
        super::descriptor(self).name
    }

    /// Whether voxels of this type are solid, i.e. anything but air.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for BlockType {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        BlockType::from_name(&name).ok_or(name)
    }
}

impl From<BlockType> for &'static str {
    fn from(block_type: BlockType) -> Self {
        block_type.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_names_resolve_both_ways() {
        for (name, block_type) in BLOCK_NAMES.entries() {
            assert_eq!(BlockType::from_name(name), Some(*block_type));
            assert_eq!(block_type.name(), *name);
            assert_eq!(BlockType::from_id(block_type.id()), Some(*block_type));
        }
        assert_eq!(BlockType::from_id(200), None);
        assert_eq!(BlockType::from_name("bedrock"), None);
    }

    #[test]
    fn serializes_as_registry_name() {
        let json = serde_json::to_string(&BlockType::IRON_ORE).unwrap();
        assert_eq!(json, "\"iron_ore\"");
        let parsed: BlockType = serde_json::from_str("\"coal_ore\"").unwrap();
        assert_eq!(parsed, BlockType::COAL_ORE);
        assert!(serde_json::from_str::<BlockType>("\"lava\"").is_err());
    }
}
