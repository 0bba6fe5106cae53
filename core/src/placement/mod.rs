use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub const COLOR_MIN: u8 = 60;
pub const COLOR_MAX: u8 = 255;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Edge length as a fraction of the cell spacing.
    pub const fn scale(self) -> f32 {
        match self {
            Self::Small => 0.4,
            Self::Medium => 0.6,
            Self::Large => 0.8,
        }
    }

    pub fn edge_length(self, spacing: f32) -> f32 {
        spacing * self.scale()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// One cube resting on a grid cell. Built once by the generator and never changed.
///
/// Only the grid, cell, size and color are read back when deserializing; everything else is
/// recomputed from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxRecord")]
pub struct PlacedBox {
    layout: GridLayout,
    cell: Coord2,
    position: Point2,
    size_class: SizeClass,
    edge_length: f32,
    color: Rgb,
    notation: String,
}

impl PlacedBox {
    pub fn new(layout: &GridLayout, cell: Coord2, size_class: SizeClass, color: Rgb) -> Result<Self> {
        if !layout.contains(cell) {
            return Err(SketchError::InvalidNotation);
        }
        Ok(Self {
            layout: *layout,
            cell,
            position: layout.cell_center(cell),
            size_class,
            edge_length: size_class.edge_length(layout.spacing()),
            color,
            notation: encode_notation(cell, layout.cells())?,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cell(&self) -> Coord2 {
        self.cell
    }

    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Center of the cube, lifted by half its edge so it sits on the board.
    pub fn center(&self) -> Point3 {
        let (x, z) = self.position;
        (x, self.edge_length / 2.0, z)
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn edge_length(&self) -> f32 {
        self.edge_length
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn placement_line(&self) -> String {
        alloc::format!("{} box at {}", self.size_class, self.notation)
    }
}

#[derive(Deserialize)]
struct BoxRecord {
    layout: GridLayout,
    cell: Coord2,
    size_class: SizeClass,
    color: Rgb,
}

impl TryFrom<BoxRecord> for PlacedBox {
    type Error = SketchError;

    fn try_from(record: BoxRecord) -> Result<Self> {
        Self::new(&record.layout, record.cell, record.size_class, record.color)
    }
}

/// All boxes of one generation cycle, in generation order (which is also reveal order).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    boxes: Vec<PlacedBox>,
}

impl Batch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[PlacedBox] {
        &self.boxes
    }

    pub fn placement_lines(&self) -> Vec<String> {
        self.boxes.iter().map(PlacedBox::placement_line).collect()
    }
}

impl Deref for Batch {
    type Target = [PlacedBox];

    fn deref(&self) -> &Self::Target {
        &self.boxes
    }
}

impl FromIterator<PlacedBox> for Batch {
    fn from_iter<I: IntoIterator<Item = PlacedBox>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

/// Where the random choices of a batch come from.
pub trait PlacementSource {
    /// Column and row, drawn independently from `0..cells`.
    fn pick_cell(&mut self, cells: Coord) -> Coord2;
    fn pick_size(&mut self) -> SizeClass;
    /// Each channel drawn independently from `COLOR_MIN..=COLOR_MAX`.
    fn pick_color(&mut self) -> Rgb;
}

impl<R: RngCore + ?Sized> PlacementSource for R {
    fn pick_cell(&mut self, cells: Coord) -> Coord2 {
        let i = self.random_range(0..cells);
        let j = self.random_range(0..cells);
        (i, j)
    }

    fn pick_size(&mut self) -> SizeClass {
        SizeClass::ALL[self.random_range(0..SizeClass::ALL.len())]
    }

    fn pick_color(&mut self) -> Rgb {
        let r = self.random_range(COLOR_MIN..=COLOR_MAX);
        let g = self.random_range(COLOR_MIN..=COLOR_MAX);
        let b = self.random_range(COLOR_MIN..=COLOR_MAX);
        Rgb(r, g, b)
    }
}

pub trait PlacementGenerator {
    fn generate(&mut self, config: &SketchConfig) -> Result<Batch>;
}

/// Scatters `total_boxes` boxes over a `cells` x `cells` grid spanning `grid_size`.
///
/// Cells are drawn with replacement, so several boxes may share one cell. The grid is
/// validated before anything is drawn: on error no randomness is consumed.
pub fn generate_batch<S: PlacementSource + ?Sized>(
    cells: Coord,
    grid_size: f32,
    total_boxes: BoxCount,
    source: &mut S,
) -> Result<Batch> {
    let layout = GridLayout::new(cells, grid_size)?;

    let batch = (0..total_boxes)
        .map(|_| {
            let cell = source.pick_cell(cells);
            let size_class = source.pick_size();
            let color = source.pick_color();
            PlacedBox::new(&layout, cell, size_class, color)
        })
        .collect::<Result<Batch>>()?;

    log::debug!(
        "Generated {} boxes on a {}x{} grid",
        batch.len(),
        cells,
        cells
    );
    Ok(batch)
}
