use cgmath::{Matrix4, Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;

/// One exposed face of a block, ready to be drawn as a unit quad.
///
/// A placement has no identity beyond its index in the group that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePlacement {
    /// Chunk-local coordinates of the block the face belongs to
    pub position: Point3<i32>,
    /// Which side of the block this face covers
    pub side: BlockSide,
}

impl FacePlacement {
    pub fn new(x: i32, y: i32, z: i32, side: BlockSide) -> Self {
        FacePlacement {
            position: Point3::new(x, y, z),
            side,
        }
    }

    /// World-space model matrix of the face quad for a chunk at `origin`.
    pub fn model_matrix(&self, origin: Vector3<i32>) -> Matrix4<f32> {
        let translation = (origin + Vector3::new(self.position.x, self.position.y, self.position.z))
            .cast::<f32>()
            .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0));
        Matrix4::from_translation(translation) * self.side.face_transform()
    }
}

/// Per-instance data uploaded to the renderer, one per face placement.
///
/// # Memory Layout
/// - Model matrix: 4x4 f32, column major (64 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FaceInstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl FaceInstanceRaw {
    pub fn new(placement: &FacePlacement, origin: Vector3<i32>) -> Self {
        FaceInstanceRaw {
            model: placement.model_matrix(origin).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matrix_offsets_by_chunk_origin_and_face() {
        let placement = FacePlacement::new(1, 2, 3, BlockSide::TOP);
        let raw = FaceInstanceRaw::new(&placement, Vector3::new(-16, 0, 32));
        // Translation column: block position + origin + half a block up.
        assert_eq!(raw.model[3], [-15.0, 2.5, 35.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&raw).len(), 64);
    }
}
