use std::ops::Index;

use crate::core::art_piece::{ArtImage, ArtPiece};
use crate::error::{ArtSpaceError, Result};

pub const ART_SPACE_PIECES: [ArtPiece; 4] = [
    ArtPiece::new(
        "Starry Night",
        "Vincent van Gogh",
        "1889",
        ArtImage::new("starry_night"),
    ),
    ArtPiece::new(
        "The Persistence of Memory",
        "Salvador Dalí",
        "1931",
        ArtImage::new("persistence_of_memory"),
    ),
    ArtPiece::new(
        "The Scream",
        "Edvard Munch",
        "1893",
        ArtImage::new("the_scream"),
    ),
    ArtPiece::new(
        "Girl with a Pearl Earring",
        "Johannes Vermeer",
        "1665",
        ArtImage::new("girl_with_pearl_earring"),
    ),
];

/// Fixed, non-empty sequence of art pieces in display order.
#[derive(Debug, Clone)]
pub struct Gallery {
    pieces: Vec<ArtPiece>,
}

impl Gallery {
    pub fn new(pieces: Vec<ArtPiece>) -> Result<Self> {
        if pieces.is_empty() {
            return Err(ArtSpaceError::EmptyGallery);
        }
        Ok(Self { pieces })
    }

    /// The four works shown by the app.
    pub fn art_space() -> Result<Self> {
        Self::new(ART_SPACE_PIECES.to_vec())
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn pieces(&self) -> &[ArtPiece] {
        &self.pieces
    }
}

impl Index<usize> for Gallery {
    type Output = ArtPiece;

    fn index(&self, index: usize) -> &ArtPiece {
        &self.pieces[index]
    }
}
