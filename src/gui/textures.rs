//! GPU textures for the original and enhanced images.
use eframe::egui::{ColorImage, Context, Rect, TextureHandle, TextureId, TextureOptions, Vec2};
use tracing::{debug, warn};

use crate::core::datauri::DataUri;
use crate::error::Result;

pub struct ImageTexture {
    pub handle: TextureHandle,
    pub size: Vec2,
}

impl ImageTexture {
    pub fn from_data_uri(ctx: &Context, name: &str, uri: &DataUri) -> Result<Self> {
        let bytes = uri.decode()?;
        let rgba = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let color = ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            rgba.as_raw(),
        );
        let handle = ctx.load_texture(name, color, TextureOptions::LINEAR);
        debug!("Uploaded {} texture ({}x{})", name, width, height);
        Ok(Self {
            handle,
            size: Vec2::new(width as f32, height as f32),
        })
    }

    pub fn id(&self) -> TextureId {
        self.handle.id()
    }
}

#[derive(Default)]
pub enum TextureSlot {
    #[default]
    Empty,
    Ready(ImageTexture),
    Failed(String),
}

impl TextureSlot {
    pub fn load(ctx: &Context, name: &str, uri: &DataUri) -> Self {
        match ImageTexture::from_data_uri(ctx, name, uri) {
            Ok(texture) => TextureSlot::Ready(texture),
            Err(e) => {
                warn!("Could not display {} image: {}", name, e);
                TextureSlot::Failed(e.to_string())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TextureSlot::Empty)
    }

    pub fn ready(&self) -> Option<&ImageTexture> {
        match self {
            TextureSlot::Ready(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            TextureSlot::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct TextureCache {
    pub original: TextureSlot,
    pub enhanced: TextureSlot,
}

impl TextureCache {
    pub fn clear(&mut self) {
        self.original = TextureSlot::Empty;
        self.enhanced = TextureSlot::Empty;
    }
}

/// Largest rect with the image's aspect ratio that fits inside `container`,
/// centered ("object-fit: contain").
pub fn fit_contain(container: Rect, image: Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return container;
    }
    let scale = (container.width() / image.x).min(container.height() / image.y);
    Rect::from_center_size(container.center(), image * scale)
}

/// Size for a preview capped at `max_height`, never upscaled.
pub fn preview_size(image: Vec2, max_width: f32, max_height: f32) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (max_width / image.x).min(max_height / image.y).min(1.0);
    image * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn wide_image_fills_width() {
        let container = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 90.0));
        let fitted = fit_contain(container, vec2(400.0, 100.0));
        assert_eq!(fitted.width(), 160.0);
        assert_eq!(fitted.height(), 40.0);
        assert_eq!(fitted.center(), container.center());
    }

    #[test]
    fn tall_image_fills_height() {
        let container = Rect::from_min_size(pos2(10.0, 10.0), vec2(160.0, 90.0));
        let fitted = fit_contain(container, vec2(100.0, 360.0));
        assert_eq!(fitted.height(), 90.0);
        assert_eq!(fitted.width(), 25.0);
    }

    #[test]
    fn degenerate_image_uses_container() {
        let container = Rect::from_min_size(pos2(0.0, 0.0), vec2(160.0, 90.0));
        assert_eq!(fit_contain(container, Vec2::ZERO), container);
    }

    #[test]
    fn preview_never_upscales() {
        assert_eq!(preview_size(vec2(100.0, 50.0), 600.0, 256.0), vec2(100.0, 50.0));
        assert_eq!(preview_size(vec2(1024.0, 512.0), 600.0, 256.0), vec2(512.0, 256.0));
    }
}
