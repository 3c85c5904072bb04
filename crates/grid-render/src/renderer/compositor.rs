use std::rc::Rc;
use glam::DVec2;
use crate::api::config::RenderConfig;
use crate::api::types::{EntityKind, GridEntity};
use crate::assets::manifest::ImageId;
use crate::assets::store::{AssetSet, AssetStatus, AssetStore};
use crate::components::sprite::{describe, SpriteGeometry, SpriteKey};
use crate::error::RenderError;
use crate::renderer::geometry::{cover_fit, sprite_rect, DrawRect};
use crate::renderer::traits::{Canvas2D, ImageOf, SpriteImage, Surface};

/// Owns the drawing surface and redraws the whole board each frame.
///
/// Drawing calls are in logical pixels; the context carries a
/// device-pixel-ratio scale set up once at construction.
pub struct Compositor<S: Surface> {
    surface: S,
    ctx: S::Context,
    assets: Rc<AssetStore<ImageOf<S>>>,
    config: RenderConfig,
    cell_size: f64,
    /// Logical size in pixels.
    size: DVec2,
    reported_failure: bool,
}

impl<S: Surface> Compositor<S> {
    /// Size `surface` for a `rows` x `cols` board and acquire its 2D context.
    ///
    /// Does not start loading `assets`; the host drives that (see `AssetStore::load`).
    pub fn new(
        rows: u32,
        cols: u32,
        mut surface: S,
        cell_size: f64,
        assets: Rc<AssetStore<ImageOf<S>>>,
        config: RenderConfig,
    ) -> Result<Self, RenderError> {
        let size = DVec2::new(cols as f64, rows as f64) * cell_size;
        let mut ctx = surface.context_2d().ok_or(RenderError::NoContext)?;

        let dpr = surface.device_pixel_ratio();
        let backing = size * dpr;
        surface.set_backing_size(backing.x as u32, backing.y as u32);
        surface.set_layout_size(size.x, size.y);
        // Resizing the backing store resets the transform, so scale afterwards.
        ctx.scale(dpr, dpr);

        log::debug!(
            "compositor: {}x{} cells of {}px, logical {}x{}, backing {}x{} (dpr {})",
            cols, rows, cell_size, size.x, size.y, backing.x as u32, backing.y as u32, dpr
        );

        Ok(Self {
            surface,
            ctx,
            assets,
            config,
            cell_size,
            size,
            reported_failure: false,
        })
    }

    /// Redraw the surface: clear, background, then `entities` back-to-front in the given order.
    ///
    /// Anything whose image has not loaded yet is omitted from this frame.
    pub fn render<E: GridEntity>(&mut self, entities: &[E]) {
        self.ctx.clear_rect(0.0, 0.0, self.size.x, self.size.y);

        if let Some(set) = self.assets.assets() {
            self.draw_background(set.get(ImageId::Background));
            for entity in entities {
                self.draw_entity(&set, entity);
            }
        } else if self.assets.status() == AssetStatus::Failed {
            if !self.reported_failure {
                log::warn!("sprites unavailable, drawing placeholders");
                self.reported_failure = true;
            }
            for entity in entities {
                self.draw_placeholder(entity);
            }
        }
    }

    fn draw_background(&mut self, image: &ImageOf<S>) {
        let rect = cover_fit(self.size, image.natural_size());
        self.ctx.set_global_alpha(self.config.background_alpha);
        self.ctx.draw_image(image, rect.x, rect.y, rect.width, rect.height);
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_entity<E: GridEntity>(&mut self, set: &AssetSet<ImageOf<S>>, entity: &E) {
        let (kind, health) = (entity.kind(), entity.health());
        let sprite = describe(set, kind, health);
        let geometry = SpriteGeometry {
            offset: sprite.offset,
            ratio: sprite.ratio,
        };
        let rect = sprite_rect(entity.position(), self.cell_size, geometry);
        let alpha = self.entity_alpha(kind, health);

        self.ctx.set_global_alpha(alpha);
        self.ctx.draw_image(sprite.image, rect.x, rect.y, rect.width, rect.height);
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_placeholder<E: GridEntity>(&mut self, entity: &E) {
        let (kind, health) = (entity.kind(), entity.health());
        let geometry = SpriteKey::resolve(kind, health).geometry();
        let DrawRect { x, y, width, height } = sprite_rect(entity.position(), self.cell_size, geometry);
        let alpha = self.entity_alpha(kind, health);

        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_color(&self.config.fallback_color);
        self.ctx.fill_rect(x, y, width, height);
        self.ctx.set_global_alpha(1.0);
    }

    fn entity_alpha(&self, kind: EntityKind, health: i32) -> f64 {
        match SpriteKey::resolve(kind, health) {
            SpriteKey::ZombieHit => self.config.hit_alpha,
            _ => 1.0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn assets(&self) -> &Rc<AssetStore<ImageOf<S>>> {
        &self.assets
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Logical (laid-out) size in pixels.
    pub fn size(&self) -> DVec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntitySnapshot;
    use crate::renderer::testing::{BrokenLoader, DrawCall, RecordingSurface, TestImage, TestLoader};
    use futures::executor::block_on;

    fn loaded_assets() -> Rc<AssetStore<TestImage>> {
        let store = Rc::new(AssetStore::new());
        block_on(store.load(&TestLoader, &Default::default(), Default::default()));
        store
    }

    fn compositor(rows: u32, cols: u32, cell: f64, assets: Rc<AssetStore<TestImage>>) -> Compositor<RecordingSurface> {
        Compositor::new(rows, cols, RecordingSurface::new(1.0), cell, assets, RenderConfig::default()).unwrap()
    }

    /// Calls recorded after construction.
    fn frame_calls(c: &Compositor<RecordingSurface>) -> Vec<DrawCall> {
        c.surface()
            .log
            .borrow()
            .iter()
            .filter(|call| !matches!(call, DrawCall::Scale(..)))
            .cloned()
            .collect()
    }

    fn image_draws(c: &Compositor<RecordingSurface>) -> Vec<(ImageId, DrawRect, f64)> {
        frame_calls(c)
            .into_iter()
            .filter_map(|call| match call {
                DrawCall::Image { id, rect, alpha } => Some((id, rect, alpha)),
                _ => None,
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn backing_store_scaled_by_dpr() {
        let c = Compositor::new(
            10,
            20,
            RecordingSurface::new(2.0),
            32.0,
            Rc::new(AssetStore::new()),
            RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(c.size(), DVec2::new(640.0, 320.0));
        assert_eq!(c.surface().backing, Some((1280, 640)));
        assert_eq!(c.surface().layout, Some((640.0, 320.0)));
        assert_eq!(c.surface().log.borrow().first(), Some(&DrawCall::Scale(2.0, 2.0)));
    }

    #[test]
    fn fractional_dpr() {
        let c = Compositor::new(
            4,
            4,
            RecordingSurface::new(1.5),
            50.0,
            Rc::new(AssetStore::new()),
            RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(c.surface().backing, Some((300, 300)));
        assert_eq!(c.surface().layout, Some((200.0, 200.0)));
    }

    #[test]
    fn missing_context_is_fatal() {
        let result = Compositor::new(
            4,
            4,
            RecordingSurface::without_context(),
            32.0,
            Rc::new(AssetStore::<TestImage>::new()),
            RenderConfig::default(),
        );
        assert!(matches!(result, Err(RenderError::NoContext)));
    }

    #[test]
    fn render_before_load_only_clears() {
        let mut c = compositor(3, 4, 32.0, Rc::new(AssetStore::new()));
        c.render(&[EntitySnapshot::new(EntityKind::Player, 3, 1.0, 1.0)]);
        assert_eq!(
            frame_calls(&c),
            vec![DrawCall::Clear(DrawRect { x: 0.0, y: 0.0, width: 128.0, height: 96.0 })]
        );
    }

    #[test]
    fn empty_frame_draws_background_only() {
        let mut c = compositor(3, 4, 200.0, loaded_assets());
        c.render::<EntitySnapshot>(&[]);

        let calls = frame_calls(&c);
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], DrawCall::Clear(DrawRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 }));
        assert_eq!(calls[1], DrawCall::Alpha(0.5));
        assert_eq!(calls[3], DrawCall::Alpha(1.0));

        let draws = image_draws(&c);
        assert_eq!(draws.len(), 1);
        let (id, rect, alpha) = draws[0];
        assert_eq!(id, ImageId::Background);
        assert_eq!(alpha, 0.5);
        assert!(close(rect.height, 600.0));
        assert!((rect.width - 1066.67).abs() < 0.01);
        assert!((rect.x - -133.33).abs() < 0.01);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn hit_zombie_is_narrow_and_translucent() {
        let mut c = compositor(10, 10, 32.0, loaded_assets());
        c.render(&[EntitySnapshot::new(EntityKind::Zombie, 1, 2.0, 3.0)]);

        let draws = image_draws(&c);
        let (id, rect, alpha) = draws[1];
        assert_eq!(id, ImageId::ZombieHit);
        assert!(close(rect.x, 68.24));
        assert!(close(rect.y, 96.0));
        assert!(close(rect.width, 19.52));
        assert!(close(rect.height, 32.0));
        assert_eq!(alpha, 0.5);
        assert_eq!(frame_calls(&c).last(), Some(&DrawCall::Alpha(1.0)));
    }

    #[test]
    fn healthy_zombie_is_opaque() {
        let mut c = compositor(10, 10, 32.0, loaded_assets());
        c.render(&[EntitySnapshot::new(EntityKind::Zombie, 3, 2.0, 3.0)]);

        let (id, rect, alpha) = image_draws(&c)[1];
        assert_eq!(id, ImageId::ZombieAlive);
        assert!(close(rect.x, 78.0));
        assert!(close(rect.width, 32.0));
        assert_eq!(alpha, 1.0);
    }

    #[test]
    fn entities_drawn_in_input_order() {
        let mut c = compositor(5, 5, 32.0, loaded_assets());
        let entities = [
            EntitySnapshot::new(EntityKind::Rock, 0, 0.0, 0.0),
            EntitySnapshot::new(EntityKind::Player, 3, 0.0, 0.0),
            EntitySnapshot::new(EntityKind::Box, 1, 1.0, 0.0),
        ];
        c.render(&entities);

        let ids: Vec<ImageId> = image_draws(&c).into_iter().map(|(id, _, _)| id).collect();
        assert_eq!(ids, vec![ImageId::Background, ImageId::Rock, ImageId::Player, ImageId::Box]);
    }

    #[test]
    fn alpha_restored_after_every_entity() {
        let mut c = compositor(5, 5, 32.0, loaded_assets());
        c.render(&[
            EntitySnapshot::new(EntityKind::Zombie, 1, 0.0, 0.0),
            EntitySnapshot::new(EntityKind::Player, 3, 1.0, 0.0),
        ]);

        let alphas: Vec<f64> = frame_calls(&c)
            .into_iter()
            .filter_map(|call| match call {
                DrawCall::Alpha(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.5, 1.0, 0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn repeated_frames_redraw_fully() {
        let mut c = compositor(5, 5, 32.0, loaded_assets());
        let entities = [EntitySnapshot::new(EntityKind::Box, 3, 1.0, 1.0)];
        c.render(&entities);
        c.render(&entities);
        let clears = frame_calls(&c)
            .iter()
            .filter(|call| matches!(call, DrawCall::Clear(_)))
            .count();
        assert_eq!(clears, 2);
        assert_eq!(image_draws(&c).len(), 4);
    }

    #[test]
    fn failed_assets_draw_placeholders() {
        let store = Rc::new(AssetStore::new());
        block_on(store.load(&BrokenLoader, &Default::default(), Default::default()));
        let mut c = compositor(5, 5, 32.0, store);
        c.render(&[EntitySnapshot::new(EntityKind::Zombie, 1, 2.0, 3.0)]);

        assert!(image_draws(&c).is_empty());
        let calls = frame_calls(&c);
        assert!(calls.contains(&DrawCall::FillColor("#ff00ff".into())));
        let fill = calls.iter().find_map(|call| match call {
            DrawCall::Fill { rect, alpha } => Some((*rect, *alpha)),
            _ => None,
        });
        let (rect, alpha) = fill.expect("placeholder drawn");
        assert!(close(rect.x, 68.24));
        assert!(close(rect.width, 19.52));
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn custom_alphas_from_config() {
        let config = RenderConfig {
            background_alpha: 0.25,
            hit_alpha: 0.75,
            ..RenderConfig::default()
        };
        let mut c = Compositor::new(5, 5, RecordingSurface::new(1.0), 32.0, loaded_assets(), config).unwrap();
        c.render(&[EntitySnapshot::new(EntityKind::Zombie, 1, 0.0, 0.0)]);

        let draws = image_draws(&c);
        assert_eq!(draws[0].2, 0.25);
        assert_eq!(draws[1].2, 0.75);
    }
}
