//! Drawing-surface traits.
//!
//! The compositor is written against these rather than a concrete canvas so the
//! same drawing code runs on the browser (`grid-render-web`) and in tests.
//! The method set mirrors the subset of `CanvasRenderingContext2D` the renderer uses.

use glam::DVec2;

/// A decoded image that can be drawn.
pub trait SpriteImage {
    /// Natural (intrinsic) size in pixels.
    fn natural_size(&self) -> DVec2;
}

/// Immediate-mode 2D drawing context. Coordinates are logical pixels once the
/// device pixel ratio scale has been applied.
pub trait Canvas2D {
    type Image: SpriteImage;

    fn scale(&mut self, x: f64, y: f64);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn set_global_alpha(&mut self, alpha: f64);

    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64);

    /// Set the fill color from a CSS color string.
    fn set_fill_color(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// A surface that can be sized and produce a 2D context.
pub trait Surface {
    type Context: Canvas2D;

    /// Physical pixels per logical pixel of the display hosting the surface.
    fn device_pixel_ratio(&self) -> f64;

    /// Size of the backing store in physical pixels.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Laid-out size in logical pixels.
    fn set_layout_size(&mut self, width: f64, height: f64);

    /// Acquire the 2D context. None if the surface cannot provide one.
    fn context_2d(&mut self) -> Option<Self::Context>;
}

/// Image type drawn by a surface's context.
pub type ImageOf<S> = <<S as Surface>::Context as Canvas2D>::Image;
