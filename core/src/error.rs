use thiserror::Error;

use crate::ExportError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SketchError {
    #[error("Grid needs at least one cell per side")]
    NoCells,
    #[error("Grid of {0} cells per side has no column letters past Z")]
    TooManyCells(u8),
    #[error("Grid size must be positive and finite, got {0}")]
    InvalidGridSize(f32),
    #[error("Reveal cadence must be at least one tick")]
    InvalidCadence,
    #[error("Invalid notation for this grid")]
    InvalidNotation,
    #[error("{shown} boxes shown out of a batch of {len}")]
    InvalidProgress { shown: usize, len: usize },
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SketchError {
    /// Whether the error comes from a rejected configuration rather than from a collaborator.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoCells | Self::TooManyCells(_) | Self::InvalidGridSize(_) | Self::InvalidCadence
        )
    }
}

pub type Result<T> = core::result::Result<T, SketchError>;
