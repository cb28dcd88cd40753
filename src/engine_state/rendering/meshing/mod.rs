//! # Chunk Meshing
//!
//! Turns a chunk's voxel store into groups of face placements, one group per
//! block type and side. Each group maps to one instanced draw of a unit quad
//! textured with that block's material for that side, so the mesher never
//! builds vertex data itself.
//!
//! ## Components
//! - [`ChunkMesh`]: the placement groups of one chunk
//! - [`FacePlacement`]: one exposed face
//! - [`FaceInstanceRaw`]: the per-instance model matrix handed to a renderer
//! - [`build_chunk_mesh`]: the face-culling pass that fills a [`ChunkMesh`]

pub mod culled;
pub mod face;
pub mod mesh;

pub use culled::build_chunk_mesh;
pub use face::{FaceInstanceRaw, FacePlacement};
pub use mesh::{ChunkMesh, FaceGroupKey};
