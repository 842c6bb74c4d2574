pub mod types;
pub mod init;
pub mod texture;
pub mod render;

// Re-export main types and structs for convenience
pub use types::*;
pub use init::*;
pub use texture::*;
pub use render::*;
