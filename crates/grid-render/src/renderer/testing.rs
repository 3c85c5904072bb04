//! In-memory surface that records draw calls, for compositor tests.

use std::cell::RefCell;
use std::rc::Rc;
use glam::DVec2;
use crate::assets::manifest::ImageId;
use crate::assets::store::ImageLoader;
use crate::error::LoadError;
use crate::renderer::geometry::DrawRect;
use crate::renderer::traits::{Canvas2D, SpriteImage, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct TestImage {
    pub id: ImageId,
    pub size: DVec2,
}

impl SpriteImage for TestImage {
    fn natural_size(&self) -> DVec2 {
        self.size
    }
}

/// Background is 1600x900, sprites are 64x64.
pub struct TestLoader;

impl ImageLoader for TestLoader {
    type Image = TestImage;

    async fn fetch(&self, id: ImageId, _path: &str) -> Result<TestImage, LoadError> {
        let size = match id {
            ImageId::Background => DVec2::new(1600.0, 900.0),
            _ => DVec2::splat(64.0),
        };
        Ok(TestImage { id, size })
    }
}

/// Always fails.
pub struct BrokenLoader;

impl ImageLoader for BrokenLoader {
    type Image = TestImage;

    async fn fetch(&self, _id: ImageId, path: &str) -> Result<TestImage, LoadError> {
        Err(LoadError::new(path, "404"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Scale(f64, f64),
    Clear(DrawRect),
    Alpha(f64),
    Image { id: ImageId, rect: DrawRect, alpha: f64 },
    FillColor(String),
    Fill { rect: DrawRect, alpha: f64 },
}

pub type CallLog = Rc<RefCell<Vec<DrawCall>>>;

pub struct RecordingContext {
    log: CallLog,
    alpha: f64,
}

impl Canvas2D for RecordingContext {
    type Image = TestImage;

    fn scale(&mut self, x: f64, y: f64) {
        self.log.borrow_mut().push(DrawCall::Scale(x, y));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log.borrow_mut().push(DrawCall::Clear(DrawRect { x, y, width, height }));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.log.borrow_mut().push(DrawCall::Alpha(alpha));
    }

    fn draw_image(&mut self, image: &TestImage, x: f64, y: f64, width: f64, height: f64) {
        self.log.borrow_mut().push(DrawCall::Image {
            id: image.id,
            rect: DrawRect { x, y, width, height },
            alpha: self.alpha,
        });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.log.borrow_mut().push(DrawCall::FillColor(color.to_string()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.log.borrow_mut().push(DrawCall::Fill {
            rect: DrawRect { x, y, width, height },
            alpha: self.alpha,
        });
    }
}

pub struct RecordingSurface {
    pub dpr: f64,
    pub has_context: bool,
    pub backing: Option<(u32, u32)>,
    pub layout: Option<(f64, f64)>,
    pub log: CallLog,
}

impl RecordingSurface {
    pub fn new(dpr: f64) -> Self {
        Self {
            dpr,
            has_context: true,
            backing: None,
            layout: None,
            log: CallLog::default(),
        }
    }

    pub fn without_context() -> Self {
        Self {
            has_context: false,
            ..Self::new(1.0)
        }
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = Some((width, height));
    }

    fn set_layout_size(&mut self, width: f64, height: f64) {
        self.layout = Some((width, height));
    }

    fn context_2d(&mut self) -> Option<RecordingContext> {
        self.has_context.then(|| RecordingContext {
            log: self.log.clone(),
            alpha: 1.0,
        })
    }
}
