//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, the neighbor offset each
//! face is culled against, and the fixed transform that places a unit quad on
//! that face.

use cgmath::{Deg, Matrix4, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The discriminant is the face index used for per-face materials, so the order
/// here is also the order of [`BlockDescriptor::material`](super::BlockDescriptor).
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in face-index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Offset to the neighboring cell this face looks into.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// Lowercase face name, used in mesh group names.
    pub fn name(self) -> &'static str {
        match self {
            BlockSide::RIGHT => "right",
            BlockSide::LEFT => "left",
            BlockSide::TOP => "top",
            BlockSide::BOTTOM => "bottom",
            BlockSide::FRONT => "front",
            BlockSide::BACK => "back",
        }
    }

    /// Transform from a unit quad in the XY plane (facing +Z, centered on the
    /// origin) onto this face of a unit cube centered on the origin.
    pub fn face_transform(self) -> Matrix4<f32> {
        let (rotation, offset) = match self {
            BlockSide::RIGHT => (Matrix4::from_angle_y(Deg(90.0)), Vector3::new(0.5, 0.0, 0.0)),
            BlockSide::LEFT => (Matrix4::from_angle_y(Deg(-90.0)), Vector3::new(-0.5, 0.0, 0.0)),
            BlockSide::TOP => (Matrix4::from_angle_x(Deg(-90.0)), Vector3::new(0.0, 0.5, 0.0)),
            BlockSide::BOTTOM => (Matrix4::from_angle_x(Deg(90.0)), Vector3::new(0.0, -0.5, 0.0)),
            BlockSide::FRONT => (Matrix4::from_scale(1.0), Vector3::new(0.0, 0.0, 0.5)),
            BlockSide::BACK => (Matrix4::from_angle_y(Deg(180.0)), Vector3::new(0.0, 0.0, -0.5)),
        };
        Matrix4::from_translation(offset) * rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector4};

    #[test]
    fn face_transform_points_quad_along_normal() {
        for side in BlockSide::all() {
            let transform = side.face_transform();
            let facing = transform * Vector4::new(0.0, 0.0, 1.0, 0.0);
            let normal = side.normal().cast::<f32>().unwrap();
            assert!((facing.truncate() - normal).magnitude() < 1e-5, "{:?}", side);

            let center = transform * Vector4::new(0.0, 0.0, 0.0, 1.0);
            assert!((center.truncate() - normal * 0.5).magnitude() < 1e-5, "{:?}", side);
        }
    }

    #[test]
    fn opposite_sides_cancel() {
        let sum = BlockSide::all()
            .into_iter()
            .fold(Vector3::new(0, 0, 0), |acc, side| acc + side.normal());
        assert_eq!(sum, Vector3::new(0, 0, 0));
    }
}
