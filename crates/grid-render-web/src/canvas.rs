use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use grid_render::{Canvas2D, SpriteImage, Surface};

/// Decoded `<img>` element.
#[derive(Debug, Clone)]
pub struct WebImage(pub HtmlImageElement);

impl SpriteImage for WebImage {
    fn natural_size(&self) -> DVec2 {
        DVec2::new(self.0.natural_width() as f64, self.0.natural_height() as f64)
    }
}

/// `CanvasRenderingContext2D` behind the renderer's drawing trait.
/// Calls that can throw are logged and skipped so one bad call never aborts a frame.
pub struct WebContext(CanvasRenderingContext2d);

impl Canvas2D for WebContext {
    type Image = WebImage;

    fn scale(&mut self, x: f64, y: f64) {
        if let Err(err) = self.0.scale(x, y) {
            log::warn!("canvas scale failed: {:?}", err);
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.0.clear_rect(x, y, width, height);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.0.set_global_alpha(alpha);
    }

    fn draw_image(&mut self, image: &WebImage, x: f64, y: f64, width: f64, height: f64) {
        if let Err(err) = self
            .0
            .draw_image_with_html_image_element_and_dw_and_dh(&image.0, x, y, width, height)
        {
            log::warn!("drawImage failed for {}: {:?}", image.0.src(), err);
        }
    }

    fn set_fill_color(&mut self, color: &str) {
        self.0.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.0.fill_rect(x, y, width, height);
    }
}

/// An HTML canvas element as a drawing surface.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for WebCanvas {
    type Context = WebContext;

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_layout_size(&mut self, width: f64, height: f64) {
        let style = self.canvas.style();
        for (property, value) in [("width", width), ("height", height)] {
            if let Err(err) = style.set_property(property, &format!("{}px", value)) {
                log::warn!("failed to set canvas {}: {:?}", property, err);
            }
        }
    }

    fn context_2d(&mut self) -> Option<WebContext> {
        let ctx = self.canvas.get_context("2d").ok().flatten()?;
        ctx.dyn_into::<CanvasRenderingContext2d>().ok().map(WebContext)
    }
}
