//! # World Generation
//!
//! Deterministic procedural generation: a seeded multiply-with-carry generator
//! feeds simplex noise fields, which the terrain pass turns into block ids.
//!
//! Regenerating a chunk with the same seed and parameters reproduces it exactly,
//! because every noise field is drawn from a fresh generator in a fixed order
//! (resources in configuration order, then terrain).

pub mod noise_field;
pub mod rng;
pub mod terrain;

pub use noise_field::NoiseField;
pub use rng::SeededRng;
