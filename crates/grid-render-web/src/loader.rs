use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;
use grid_render::{ImageId, ImageLoader, LoadError};
use crate::canvas::WebImage;

/// Loads images through `<img>` elements, resolving once the browser has decoded them.
pub struct WebImageLoader;

impl ImageLoader for WebImageLoader {
    type Image = WebImage;

    async fn fetch(&self, id: ImageId, path: &str) -> Result<WebImage, LoadError> {
        let image = HtmlImageElement::new()
            .map_err(|err| LoadError::new(path, format!("cannot create image element: {:?}", err)))?;
        image.set_src(path);
        JsFuture::from(image.decode())
            .await
            .map_err(|err| LoadError::new(path, format!("decode failed: {:?}", err)))?;
        log::debug!("{:?} decoded from {} ({}x{})", id, path, image.natural_width(), image.natural_height());
        Ok(WebImage(image))
    }
}
