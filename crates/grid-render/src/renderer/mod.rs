pub mod compositor;
pub mod geometry;
pub mod traits;
#[cfg(test)]
pub(crate) mod testing;

// Re-export key types for convenient access
pub use compositor::Compositor;
pub use geometry::{cover_fit, sprite_rect, DrawRect};
pub use traits::{Canvas2D, ImageOf, SpriteImage, Surface};
