//! # Chunk Generation Task
//!
//! Deferred generation of one chunk. The task is published when a chunk enters
//! the visible set and the world is configured for background loading.

use std::rc::Rc;

use log::debug;

use crate::{
    config::WorldParams,
    core::WeakResource,
    engine_state::{task_management::task::Task, voxels::chunk::Chunk},
};

/// Generates a chunk that is still waiting in the `generating` state.
///
/// The task only holds a weak handle: if the chunk leaves the visible set
/// before the task runs, the task does nothing.
pub struct ChunkGenerationTask {
    /// The chunk to fill
    chunk: WeakResource<Chunk>,
    /// Generation parameters in effect when the chunk was created
    params: Rc<WorldParams>,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `chunk` - Weak handle to the chunk owned by the world
    /// * `params` - Generation parameters shared with the world
    pub fn new(chunk: WeakResource<Chunk>, params: Rc<WorldParams>) -> Self {
        ChunkGenerationTask { chunk, params }
    }
}

impl Task for ChunkGenerationTask {
    fn process(self: Box<Self>) {
        match self.chunk.upgrade() {
            Some(handle) => {
                let mut chunk = handle.get_mut();
                if !chunk.is_loaded() {
                    chunk.generate(&self.params);
                }
            }
            None => debug!("Skipping generation of a chunk that was unloaded"),
        }
    }

    fn describe(&self) -> String {
        match self.chunk.upgrade() {
            Some(chunk) => format!("chunk generation {}", chunk.get().coord),
            None => String::from("chunk generation (unloaded)"),
        }
    }
}
