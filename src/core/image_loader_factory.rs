use egui::{Color32, ColorImage};
use std::path::Path;
use std::sync::Arc;

use crate::core::image_format::ImageFormat;

const MAX_DECODED_WIDTH: u32 = 1920;
const MAX_DECODED_HEIGHT: u32 = 1080;
const PLACEHOLDER_CELL: usize = 16;

pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path, format: ImageFormat) -> Result<ColorImage, LoadError>;
    fn supports_format(&self, format: ImageFormat) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("format error: {0}")]
    Format(String),
    #[error("unsupported format")]
    UnsupportedFormat,
}

pub struct RasterImageLoader;

impl ImageLoader for RasterImageLoader {
    fn load(&self, path: &Path, format: ImageFormat) -> Result<ColorImage, LoadError> {
        use image::ImageReader;

        let mut reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| LoadError::Format(e.to_string()))?;
        if reader.format().is_none() {
            reader.set_format(format.to_image_rs());
        }

        let img = reader
            .decode()
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let img = if img.width() > MAX_DECODED_WIDTH || img.height() > MAX_DECODED_HEIGHT {
            img.resize(
                MAX_DECODED_WIDTH,
                MAX_DECODED_HEIGHT,
                image::imageops::FilterType::Triangle,
            )
        } else {
            img
        };

        let rgba_img = img.to_rgba8();
        let size = [rgba_img.width() as usize, rgba_img.height() as usize];
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba_img.as_raw()))
    }

    /// Only formats whose decoder is compiled into the `image` crate.
    fn supports_format(&self, format: ImageFormat) -> bool {
        format.to_image_rs().reading_enabled()
    }
}

/// Checkerboard shown in place of artwork that cannot be loaded.
pub fn placeholder_image(size: usize) -> ColorImage {
    let size = size.max(1);
    let dark = Color32::from_gray(160);
    let mut image = ColorImage::new([size, size], Color32::from_gray(200));
    for (i, pixel) in image.pixels.iter_mut().enumerate() {
        let (x, y) = (i % size, i / size);
        if (x / PLACEHOLDER_CELL + y / PLACEHOLDER_CELL) % 2 == 1 {
            *pixel = dark;
        }
    }
    image
}

#[derive(Clone)]
pub struct ImageLoaderFactory {
    loaders: Arc<Vec<Box<dyn ImageLoader>>>,
}

impl ImageLoaderFactory {
    pub fn new() -> Self {
        Self {
            loaders: Arc::new(vec![Box::new(RasterImageLoader)]),
        }
    }

    pub fn load_image(&self, path: &Path) -> Result<ColorImage, LoadError> {
        let format = ImageFormat::from_path(path).ok_or(LoadError::UnsupportedFormat)?;
        let loader = self
            .loaders
            .iter()
            .find(|loader| loader.supports_format(format))
            .ok_or(LoadError::UnsupportedFormat)?;
        loader.load(path, format)
    }
}

impl Default for ImageLoaderFactory {
    fn default() -> Self {
        Self::new()
    }
}
