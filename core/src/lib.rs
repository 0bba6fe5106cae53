#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use error::*;
pub use export::*;
pub use frontend::*;
pub use grid::*;
pub use notation::*;
pub use placement::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod error;
mod export;
mod frontend;
mod grid;
mod notation;
mod placement;
mod reveal;
mod session;
mod types;

/// Everything a run needs to know up front. Immutable while a session runs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Cells per side of the square grid.
    pub cells: Coord,
    /// Total span of the grid along X and Z.
    pub grid_size: f32,
    /// Boxes per generation cycle.
    pub total_boxes: BoxCount,
    /// External ticks between two reveals.
    pub reveal_cadence: u32,
}

impl SketchConfig {
    pub const DEFAULT_CELLS: Coord = 8;
    pub const DEFAULT_GRID_SIZE: f32 = 480.0;
    pub const DEFAULT_TOTAL_BOXES: BoxCount = 22;
    pub const DEFAULT_REVEAL_CADENCE: u32 = 30;

    pub const fn new(cells: Coord, grid_size: f32, total_boxes: BoxCount) -> Self {
        Self {
            cells,
            grid_size,
            total_boxes,
            reveal_cadence: Self::DEFAULT_REVEAL_CADENCE,
        }
    }

    pub const fn with_reveal_cadence(mut self, reveal_cadence: u32) -> Self {
        self.reveal_cadence = reveal_cadence;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_grid(self.cells, self.grid_size)?;
        if self.reveal_cadence == 0 {
            return Err(SketchError::InvalidCadence);
        }
        Ok(())
    }

    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::new(self.cells, self.grid_size)
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_CELLS,
            Self::DEFAULT_GRID_SIZE,
            Self::DEFAULT_TOTAL_BOXES,
        )
    }
}

pub(crate) fn validate_grid(cells: Coord, grid_size: f32) -> Result<()> {
    if cells == 0 {
        return Err(SketchError::NoCells);
    }
    if cells > MAX_CELLS {
        return Err(SketchError::TooManyCells(cells));
    }
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return Err(SketchError::InvalidGridSize(grid_size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_board() {
        let config = SketchConfig::default();
        assert_eq!(config.cells, 8);
        assert_eq!(config.grid_size, 480.0);
        assert_eq!(config.total_boxes, 22);
        assert_eq!(config.reveal_cadence, 30);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_grids() {
        assert_eq!(SketchConfig::new(0, 480.0, 1).validate(), Err(SketchError::NoCells));
        assert_eq!(
            SketchConfig::new(27, 480.0, 1).validate(),
            Err(SketchError::TooManyCells(27))
        );
        assert_eq!(
            SketchConfig::new(8, 0.0, 1).validate(),
            Err(SketchError::InvalidGridSize(0.0))
        );
        assert!(SketchConfig::new(8, f32::NAN, 1).validate().is_err());
        assert!(SketchConfig::new(8, -1.0, 1).validate().is_err());
        assert_eq!(
            SketchConfig::default().with_reveal_cadence(0).validate(),
            Err(SketchError::InvalidCadence)
        );
    }

    #[test]
    fn config_errors_are_classified() {
        assert!(SketchError::TooManyCells(30).is_configuration());
        assert!(SketchError::InvalidCadence.is_configuration());
        assert!(!SketchError::InvalidNotation.is_configuration());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SketchConfig = serde_json::from_str(r#"{ "total_boxes": 5 }"#).unwrap();
        assert_eq!(config.total_boxes, 5);
        assert_eq!(config.cells, 8);
        assert_eq!(config.reveal_cadence, 30);
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        assert!(serde_json::from_str::<SketchConfig>(r#"{ "cels": 12 }"#).is_err());
    }

    #[test]
    fn negative_counts_do_not_deserialize() {
        assert!(serde_json::from_str::<SketchConfig>(r#"{ "total_boxes": -1 }"#).is_err());
    }
}
