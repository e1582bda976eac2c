use std::fmt;

/// Opaque reference to an artwork image, resolved by the asset pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtImage(&'static str);

impl ArtImage {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ArtImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtPiece {
    pub title: &'static str,
    pub artist: &'static str,
    /// Free-form, shown as written.
    pub year: &'static str,
    pub image: ArtImage,
}

impl ArtPiece {
    pub const fn new(
        title: &'static str,
        artist: &'static str,
        year: &'static str,
        image: ArtImage,
    ) -> Self {
        Self {
            title,
            artist,
            year,
            image,
        }
    }
}
