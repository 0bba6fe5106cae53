use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize};

use crate::*;

/// Distance between the board edge and its row/column labels.
pub const LABEL_MARGIN: f32 = 20.0;

/// Geometry of the square board on the `y = 0` plane, centered on the origin.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec")]
pub struct GridLayout {
    cells: Coord,
    grid_size: f32,
}

#[derive(Deserialize)]
struct GridSpec {
    cells: Coord,
    grid_size: f32,
}

impl TryFrom<GridSpec> for GridLayout {
    type Error = SketchError;

    fn try_from(spec: GridSpec) -> Result<Self> {
        Self::new(spec.cells, spec.grid_size)
    }
}

/// Straight board line between two points on the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point2,
    pub to: Point2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LabelAxis {
    /// Column letter along the near edge.
    Column,
    /// Row number along the left edge.
    Row,
}

/// Text lying flat on the board plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub axis: LabelAxis,
    pub text: String,
    pub position: Point2,
}

impl GridLayout {
    pub fn new(cells: Coord, grid_size: f32) -> Result<Self> {
        validate_grid(cells, grid_size)?;
        Ok(Self { cells, grid_size })
    }

    pub const fn cells(&self) -> Coord {
        self.cells
    }

    pub fn spacing(&self) -> f32 {
        self.grid_size / f32::from(self.cells)
    }

    fn half(&self) -> f32 {
        self.grid_size / 2.0
    }

    /// Offset of the `n`-th cell center along either axis.
    fn center_offset(&self, n: Coord) -> f32 {
        let spacing = self.spacing();
        -self.half() + f32::from(n) * spacing + spacing / 2.0
    }

    pub fn cell_center(&self, (i, j): Coord2) -> Point2 {
        (self.center_offset(i), self.center_offset(j))
    }

    pub fn contains(&self, (i, j): Coord2) -> bool {
        i < self.cells && j < self.cells
    }

    /// Cell boundaries: `cells + 1` lines parallel to X followed by `cells + 1` parallel to Z.
    pub fn grid_lines(&self) -> impl Iterator<Item = Segment> + use<> {
        let half = self.half();
        let spacing = self.spacing();
        let bounds = 0..=self.cells;
        let along_x = bounds.clone().map(move |n| {
            let z = -half + f32::from(n) * spacing;
            Segment {
                from: (-half, z),
                to: (half, z),
            }
        });
        let along_z = bounds.map(move |n| {
            let x = -half + f32::from(n) * spacing;
            Segment {
                from: (x, -half),
                to: (x, half),
            }
        });
        along_x.chain(along_z)
    }

    /// Column letters `A..` just outside the near edge, then row numbers `1..=cells` just
    /// outside the left edge, the highest number ending up on the far row.
    pub fn labels(&self) -> impl Iterator<Item = Label> + use<> {
        let layout = *self;
        let columns = (0..self.cells).filter_map(move |i| {
            Some(Label {
                axis: LabelAxis::Column,
                text: column_letter(i)?.to_string(),
                position: (layout.center_offset(i), layout.half() + LABEL_MARGIN),
            })
        });
        let rows = (1..=self.cells).map(move |number| Label {
            axis: LabelAxis::Row,
            text: number.to_string(),
            position: (
                -layout.half() - LABEL_MARGIN,
                layout.center_offset(layout.cells - number),
            ),
        });
        columns.chain(rows)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn board() -> GridLayout {
        GridLayout::new(8, 480.0).unwrap()
    }

    #[test]
    fn spacing_splits_the_span() {
        assert_eq!(board().spacing(), 60.0);
    }

    #[test]
    fn cell_centers_sit_mid_cell() {
        let layout = board();
        assert_eq!(layout.cell_center((0, 0)), (-210.0, -210.0));
        assert_eq!(layout.cell_center((7, 7)), (210.0, 210.0));
        assert_eq!(layout.cell_center((3, 4)), (-30.0, 30.0));
    }

    #[test]
    fn grid_lines_frame_every_cell() {
        let lines: Vec<_> = board().grid_lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(
            lines[0],
            Segment {
                from: (-240.0, -240.0),
                to: (240.0, -240.0)
            }
        );
        assert_eq!(
            lines[17],
            Segment {
                from: (240.0, -240.0),
                to: (240.0, 240.0)
            }
        );
    }

    #[test]
    fn row_labels_count_down_from_the_far_edge() {
        let layout = board();
        let rows: Vec<_> = layout
            .labels()
            .filter(|label| label.axis == LabelAxis::Row)
            .collect();
        assert_eq!(rows.len(), 8);
        let far = rows.iter().find(|label| label.text == "8").unwrap();
        let near = rows.iter().find(|label| label.text == "1").unwrap();
        assert_eq!(far.position, (-260.0, -210.0));
        assert_eq!(near.position, (-260.0, 210.0));
    }

    #[test]
    fn column_labels_run_along_the_near_edge() {
        let columns: Vec<_> = board()
            .labels()
            .filter(|label| label.axis == LabelAxis::Column)
            .map(|label| (label.text, label.position))
            .collect();
        assert_eq!(columns.len(), 8);
        assert_eq!(columns[0], ("A".to_string(), (-210.0, 260.0)));
        assert_eq!(columns[7], ("H".to_string(), (210.0, 260.0)));
    }

    #[test]
    fn deserialized_layout_is_validated() {
        let layout: GridLayout = serde_json::from_str(r#"{"cells":8,"grid_size":480.0}"#).unwrap();
        assert_eq!(layout, board());
        assert!(serde_json::from_str::<GridLayout>(r#"{"cells":27,"grid_size":480.0}"#).is_err());
        assert!(serde_json::from_str::<GridLayout>(r#"{"cells":8,"grid_size":-1.0}"#).is_err());
    }

    #[test]
    fn layout_rejects_invalid_grids() {
        assert_eq!(GridLayout::new(0, 10.0), Err(SketchError::NoCells));
        assert_eq!(GridLayout::new(27, 10.0), Err(SketchError::TooManyCells(27)));
    }
}
