use glam::DVec2;
use crate::components::sprite::SpriteGeometry;

/// Axis-aligned destination rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale an image to cover `area` while keeping its aspect ratio, centered.
/// The overflowing dimension gets a negative offset and is cropped by the surface.
pub fn cover_fit(area: DVec2, image: DVec2) -> DrawRect {
    let area_ratio = area.x / area.y;
    let image_ratio = image.x / image.y;

    if image_ratio > area_ratio {
        let width = area.y * image_ratio;
        DrawRect {
            x: (area.x - width) / 2.0,
            y: 0.0,
            width,
            height: area.y,
        }
    } else {
        let height = area.x / image_ratio;
        DrawRect {
            x: 0.0,
            y: (area.y - height) / 2.0,
            width: area.x,
            height,
        }
    }
}

/// Destination of a sprite at grid position `cell`: centered in its cell, sized by
/// the geometry ratio, then nudged by the geometry offset.
pub fn sprite_rect(cell: DVec2, cell_size: f64, geometry: SpriteGeometry) -> DrawRect {
    let size = geometry.ratio * cell_size;
    let origin = cell * cell_size + (DVec2::ONE - geometry.ratio) / 2.0 * cell_size + geometry.offset;
    DrawRect {
        x: origin.x,
        y: origin.y,
        width: size.x,
        height: size.y,
    }
}
