//! # Voxel Store
//!
//! Dense storage of one chunk's voxels, addressed by chunk-local coordinates.
//!
//! Alongside the voxel array the store keeps a solidity bit vector, one bit per
//! cell, so the mesher's neighbor tests never touch the voxel entries.
//! Any coordinate outside `[0, width) × [0, height) × [0, width)` reads as
//! "no block" and writes to it are ignored.

use bitvec::vec::BitVec;

use crate::engine_state::voxels::block::{BlockTypeSize, InstanceRef, Voxel};

/// Voxels of a single chunk, `width × height × width`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelStore {
    width: i32,
    height: i32,
    /// Cells in x-major order: `(x * height + y) * width + z`.
    voxels: Vec<Voxel>,
    /// One bit per cell, set when the cell is not air.
    solid: BitVec,
}

impl VoxelStore {
    /// Creates a store filled with air.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * width * height) as usize;
        VoxelStore {
            width: width as i32,
            height: height as i32,
            voxels: vec![Voxel::AIR; len],
            solid: BitVec::repeat(false, len),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y) && (0..self.width).contains(&z)
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        self.in_bounds(x, y, z)
            .then(|| ((x * self.height + y) * self.width + z) as usize)
    }

    /// The voxel at `(x, y, z)`, or `None` outside the store.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.index(x, y, z).map(|index| self.voxels[index])
    }

    /// Whether `(x, y, z)` holds a non-air block. Out of bounds counts as empty.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.index(x, y, z).is_some_and(|index| self.solid[index])
    }

    pub fn set_id(&mut self, x: i32, y: i32, z: i32, id: BlockTypeSize) {
        if let Some(index) = self.index(x, y, z) {
            self.voxels[index].id = id;
            self.solid.set(index, id != Voxel::AIR.id);
        }
    }

    pub fn set_instance_ref(&mut self, x: i32, y: i32, z: i32, instance: Option<InstanceRef>) {
        if let Some(index) = self.index(x, y, z) {
            self.voxels[index].instance = instance;
        }
    }

    /// Drops every mesh back-reference, ahead of a remesh.
    pub fn clear_instance_refs(&mut self) {
        for voxel in &mut self.voxels {
            voxel.instance = None;
        }
    }

    /// Resets every cell to air.
    pub fn clear(&mut self) {
        self.voxels.fill(Voxel::AIR);
        self.solid.fill(false);
    }

    /// Snapshot of all block ids in storage order.
    pub fn ids(&self) -> Vec<BlockTypeSize> {
        self.voxels.iter().map(|voxel| voxel.id).collect()
    }

    pub fn solid_count(&self) -> usize {
        self.solid.count_ones()
    }
}
