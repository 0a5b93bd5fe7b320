use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

use gl_wrapper::texture::TextureFormats;

/// Decoded 8-bit pixels, bottom row first to match GL texture coordinates.
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormats,
    pub data: Vec<u8>,
}

pub fn load_image<P: AsRef<Path>>(path: P) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();

    let image = image::open(path).map_err(|e| AssetError::Decode(path.to_path_buf(), e))?;

    Ok(into_texture_image(image.flipv()))
}

fn into_texture_image(image: DynamicImage) -> TextureImage {
    let (width, height) = (image.width(), image.height());

    let (format, data) = match image {
        DynamicImage::ImageLuma8(buf) => (TextureFormats::Red, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (TextureFormats::Rgb, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (TextureFormats::Rgba, buf.into_raw()),
        other => (TextureFormats::Rgba, other.to_rgba8().into_raw()),
    };

    TextureImage {
        width,
        height,
        format,
        data,
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load texture image {0:?}: {1}")]
    Decode(PathBuf, #[source] image::ImageError),
}
