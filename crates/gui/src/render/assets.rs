//! Images bundled into the binary and shown in restaurant popups.

use std::collections::HashMap;

use egui::{ColorImage, TextureHandle, TextureOptions};
use tracing::warn;

const BUNDLED: &[(&str, &[u8])] = &[
    ("veg1.png", include_bytes!("../../assets/img/veg1.png")),
    ("veg2.png", include_bytes!("../../assets/img/veg2.png")),
    ("non-veg1.png", include_bytes!("../../assets/img/non-veg1.png")),
    ("non-veg2.png", include_bytes!("../../assets/img/non-veg2.png")),
];

fn decode(bytes: &[u8]) -> Result<ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// GPU textures for the bundled popup images, keyed by asset name.
pub struct PopupImages {
    textures: HashMap<&'static str, TextureHandle>,
}

impl PopupImages {
    /// Decode and upload every bundled image. Undecodable assets are skipped.
    pub fn load(ctx: &egui::Context) -> Self {
        let mut textures = HashMap::new();
        for &(name, bytes) in BUNDLED {
            match decode(bytes) {
                Ok(image) => {
                    textures.insert(name, ctx.load_texture(name, image, TextureOptions::LINEAR));
                }
                Err(e) => warn!("cannot decode bundled image {}: {}", name, e),
            }
        }
        Self { textures }
    }

    pub fn get(&self, name: &str) -> Option<&TextureHandle> {
        self.textures.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_images_decode() {
        for &(name, bytes) in BUNDLED {
            let image = decode(bytes).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert!(image.size[0] > 0 && image.size[1] > 0, "{}", name);
        }
    }

    #[test]
    fn builtin_catalog_images_are_bundled() {
        for record in foodmap_core::Catalog::builtin().records() {
            let name = record.image.as_deref().unwrap_or_default();
            assert!(
                BUNDLED.iter().any(|(n, _)| *n == name),
                "missing asset for {}",
                record.title
            );
        }
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(decode(b"not a png").is_err());
    }
}
