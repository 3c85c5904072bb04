//! WASM bridge: draws a `grid-render` board onto an HTML canvas.
//!
//! ```ignore
//! import init, { GridRenderer } from "./grid_render_web.js";
//!
//! await init();
//! const renderer = new GridRenderer(rows, cols, canvas, 32);
//! function frame() {
//!     renderer.render(new Float32Array(records)); // [kind, health, x, y] per entity
//!     requestAnimationFrame(frame);
//! }
//! requestAnimationFrame(frame);
//! ```

pub mod canvas;
pub mod loader;
pub mod runner;

pub use canvas::{WebCanvas, WebContext, WebImage};
pub use loader::WebImageLoader;
pub use runner::GridRenderer;

/// Route `log` output to the browser console and panics to `console.error`.
/// Safe to call more than once.
fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
