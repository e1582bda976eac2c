//! Error types for Art Space.

use std::io;

/// Errors produced outside of navigation.
#[derive(Debug, thiserror::Error)]
pub enum ArtSpaceError {
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("a gallery needs at least one art piece")]
    EmptyGallery,

    #[error("UI error: {0}")]
    Ui(String),
}

impl From<eframe::Error> for ArtSpaceError {
    fn from(err: eframe::Error) -> Self {
        ArtSpaceError::Ui(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ArtSpaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_gallery_display() {
        let e = ArtSpaceError::EmptyGallery;
        assert_eq!(format!("{e}"), "a gallery needs at least one art piece");
    }

    #[test]
    fn ui_error_display() {
        let e = ArtSpaceError::Ui("no display".into());
        assert_eq!(format!("{e}"), "UI error: no display");
    }

    #[test]
    fn io_error_converts() {
        let e: ArtSpaceError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(e, ArtSpaceError::Io(_)));
        assert_eq!(format!("{e}"), "I/O error: gone");
    }
}
