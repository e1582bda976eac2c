use std::path::{Path, PathBuf};

use crate::core::art_piece::ArtImage;
use crate::core::image_format::ImageFormat;

/// Maps artwork keys to image files under one directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    assets_dir: PathBuf,
}

impl AssetResolver {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// First `<assets_dir>/<key>.<ext>` that exists, trying extensions in
    /// `ImageFormat::supported_extensions` order.
    pub fn resolve(&self, image: ArtImage) -> Option<PathBuf> {
        ImageFormat::supported_extensions()
            .iter()
            .map(|ext| self.assets_dir.join(format!("{}.{}", image.key(), ext)))
            .find(|candidate| candidate.is_file())
    }
}
