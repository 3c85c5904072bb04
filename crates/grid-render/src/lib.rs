pub mod api;
pub mod components;
pub mod renderer;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{LoadPolicy, RenderConfig};
pub use api::types::{decode_records, EntityKind, EntityRecord, EntitySnapshot, GridEntity};
pub use assets::manifest::{AssetManifest, ImageId};
pub use assets::store::{AssetSet, AssetStatus, AssetStore, ImageLoader, ResourceStatus};
pub use components::sprite::{
    describe, resolve, resolve_image, resolve_offset, resolve_ratio,
    HealthBucket, SpriteDescriptor, SpriteGeometry, SpriteKey,
};
pub use error::{LoadError, RenderError};
pub use renderer::compositor::Compositor;
pub use renderer::geometry::{cover_fit, sprite_rect, DrawRect};
pub use renderer::traits::{Canvas2D, ImageOf, SpriteImage, Surface};
