//! # Voxel World Entry Point
//!
//! Runs the engine headless through the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json] [frames]
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        eprintln!("voxel-world: {}", err);
        std::process::exit(1);
    }
}
