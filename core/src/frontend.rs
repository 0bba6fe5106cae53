use crate::*;

/// Draws the board. One frame is `begin_frame`, the grid, then every visible box in order.
pub trait BoardRenderer {
    fn begin_frame(&mut self) {}

    /// Cell boundaries plus row and column labels, see [`GridLayout::grid_lines`] and
    /// [`GridLayout::labels`].
    fn draw_grid(&mut self, layout: &GridLayout);

    /// A cube of `edge_length` centered on [`PlacedBox::center`], in its own color.
    fn draw_box(&mut self, placed: &PlacedBox);
}

/// On-screen status. Nothing in the core depends on it succeeding.
pub trait StatusDisplay {
    fn show_text(&mut self, text: &str);
}

/// A host that can play every collaborator role at once.
pub trait Frontend: BoardRenderer + Exporter + StatusDisplay {}

impl<T: BoardRenderer + Exporter + StatusDisplay + ?Sized> Frontend for T {}
