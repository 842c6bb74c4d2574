//! # filmsim
//!
//! GPU-accelerated film stock simulation for photos: a catalog of classic
//! looks, an intensity interpolator, a wgpu render pipeline with a CPU
//! reference implementation, and full-resolution JPEG export.


pub mod cpu;
pub mod errors;
pub mod export;
pub mod logging;
pub mod params;
pub mod presets;
pub mod renderer;

// Re-export the main types for convenience
pub use errors::*;
pub use export::*;
pub use params::*;
pub use presets::*;
pub use renderer::Renderer;
