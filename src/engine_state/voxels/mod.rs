//! # Voxel World
//!
//! Everything that represents the voxel space itself.
//!
//! ## Architecture
//!
//! * **Block**: the fixed block-type registry, face directions and voxel entries
//! * **Generation**: seeded noise and terrain/resource synthesis
//! * **Chunk**: voxel storage and the per-chunk lifecycle
//! * **World**: the set of live chunks around the player and world-space queries
//! * **Tasks**: deferred chunk generation
//!
//! ## Data Flow
//!
//! 1. `World::update` diffs the visible chunk set against the live set
//! 2. New chunks are generated on the spot or through a background task
//! 3. Generation fills the voxel store, then the face-culling mesher rebuilds the mesh
//! 4. Physics and renderers read blocks through `World::get_block` only

pub mod block;
pub mod chunk;
pub mod generation;
pub mod tasks;
pub mod world;
