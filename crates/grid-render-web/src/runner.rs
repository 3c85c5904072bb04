use std::rc::Rc;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::HtmlCanvasElement;
use grid_render::{decode_records, AssetStore, Compositor, RenderConfig};
use crate::canvas::WebCanvas;
use crate::loader::WebImageLoader;

/// Board renderer exported to JavaScript.
///
/// Construction sizes the canvas and kicks off the image load on the browser's
/// task queue without waiting for it; frames rendered before the load completes
/// simply leave the sprites out.
#[wasm_bindgen]
pub struct GridRenderer {
    compositor: Compositor<WebCanvas>,
}

#[wasm_bindgen]
impl GridRenderer {
    /// `height`/`width` are in grid cells. `config_json` is an optional `RenderConfig` JSON document.
    /// Throws if the canvas has no 2D context or the config does not parse.
    #[wasm_bindgen(constructor)]
    pub fn new(
        height: u32,
        width: u32,
        canvas: HtmlCanvasElement,
        cell_size: f64,
        config_json: Option<String>,
    ) -> Result<GridRenderer, JsError> {
        crate::init_logging();

        let config = match config_json {
            Some(json) => RenderConfig::from_json(&json)?,
            None => RenderConfig::default(),
        };
        let assets = Rc::new(AssetStore::new());
        let compositor = Compositor::new(
            height,
            width,
            WebCanvas::new(canvas),
            cell_size,
            assets.clone(),
            config.clone(),
        )?;

        spawn_local(async move {
            let status = assets.load(&WebImageLoader, &config.manifest, config.load).await;
            log::info!("grid-render: assets {}", status.as_str());
        });

        log::info!("grid-render: initialized {}x{} board", width, height);
        Ok(Self { compositor })
    }

    /// Redraw the board from a flat buffer of `[kind, health, x, y]` records,
    /// in back-to-front order. Kind codes: 0 box, 1 player, 2 rock, 3 zombie.
    pub fn render(&mut self, records: &[f32]) {
        let entities = decode_records(records);
        self.compositor.render(&entities);
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.compositor.assets().is_loaded()
    }

    /// One of `idle`, `loading`, `ready`, `failed`.
    pub fn status(&self) -> String {
        self.compositor.assets().status().as_str().to_string()
    }

    /// Promise resolving to the settled asset status (`ready` or `failed`).
    pub fn ready(&self) -> Promise {
        let assets = self.compositor.assets().clone();
        future_to_promise(async move {
            let status = assets.ready().await;
            Ok(JsValue::from_str(status.as_str()))
        })
    }
}
