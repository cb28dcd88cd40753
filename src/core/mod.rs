//! # Core Module
//!
//! Resource handles shared between the world and the systems that work on its
//! chunks. Everything in this crate runs on one logical thread, so the handles
//! are `Rc` based rather than `Arc` based.
//!
//! ## Key Components
//! - `StResource`: reference-counted resource with interior mutability
//! - `WeakResource`: non-owning counterpart, used by queued tasks

pub mod st_resource;

pub use st_resource::{StResource, WeakResource};
