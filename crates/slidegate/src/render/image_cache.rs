use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use eframe::egui;

/// Lazily decoded textures keyed by the path as written in the deck.
/// Failures are remembered so a missing file is only reported once.
pub struct ImageCache {
    base_path: PathBuf,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: RefCell::new(HashMap::new()),
        }
    }

    pub fn get_or_load(&self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        if let Some(entry) = self.textures.borrow().get(path) {
            return entry.clone();
        }

        let texture = self.load(ctx, path);
        self.textures
            .borrow_mut()
            .insert(path.to_string(), texture.clone());
        texture
    }

    fn load(&self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        let full = self.base_path.join(path);
        match image::open(&full) {
            Ok(img) => {
                let rgba = img.into_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                tracing::debug!(path, width = size[0], height = size[1], "image loaded");
                Some(ctx.load_texture(path, color, egui::TextureOptions::LINEAR))
            }
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "failed to load image");
                None
            }
        }
    }

    /// Forget everything, e.g. after the deck was edited.
    pub fn clear(&self) {
        self.textures.borrow_mut().clear();
    }
}
