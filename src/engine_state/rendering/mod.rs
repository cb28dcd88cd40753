//! Renderer-facing output of the voxel world.
//!
//! The engine does not draw anything itself. It produces per-chunk placement
//! groups and instance data that any instanced renderer can upload as-is.

pub mod meshing;

pub use meshing::{ChunkMesh, FaceInstanceRaw, FacePlacement};
