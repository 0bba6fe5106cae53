use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use gridbox_core::{
    BoardRenderer, ExportError, Exporter, GridLayout, PlacedBox, StatusDisplay,
};

use crate::export::ExportFiles;
use crate::svg::SvgCanvas;

/// Terminal and filesystem stand-in for the drawing surface, the file exporter and the
/// status panel.
#[derive(Debug)]
pub struct HeadlessHost {
    canvas: SvgCanvas,
    files: ExportFiles,
    echo: bool,
    status: String,
    written: Vec<PathBuf>,
}

impl HeadlessHost {
    pub fn new(files: ExportFiles, echo: bool) -> anyhow::Result<Self> {
        fs::create_dir_all(files.dir()).with_context(|| {
            format!("Could not create output directory {}", files.dir().display())
        })?;
        Ok(Self {
            canvas: SvgCanvas::new(),
            files,
            echo,
            status: String::new(),
            written: Vec::new(),
        })
    }

    /// Names this round's files; `None` keeps the plain names.
    pub fn begin_round(&mut self, round: Option<u32>) {
        self.files.set_round(round);
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn dir(&self) -> &Path {
        self.files.dir()
    }

    /// Every file exported so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl BoardRenderer for HeadlessHost {
    fn begin_frame(&mut self) {
        self.canvas.begin_frame();
    }

    fn draw_grid(&mut self, layout: &GridLayout) {
        self.canvas.draw_grid(layout);
    }

    fn draw_box(&mut self, placed: &PlacedBox) {
        self.canvas.draw_box(placed);
    }
}

impl Exporter for HeadlessHost {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), ExportError> {
        let path = self.files.write_lines(lines)?;
        self.written.push(path);
        Ok(())
    }

    fn capture_snapshot(&mut self, name: &str) -> Result<(), ExportError> {
        log::debug!("Capturing {} boxes as {name}", self.canvas.box_count());
        let path = self.files.write_snapshot(name, &self.canvas.to_svg())?;
        self.written.push(path);
        Ok(())
    }

    fn write_records(&mut self, boxes: &[PlacedBox]) -> Result<(), ExportError> {
        if let Some(path) = self.files.write_records(boxes)? {
            self.written.push(path);
        }
        Ok(())
    }
}

impl StatusDisplay for HeadlessHost {
    fn show_text(&mut self, text: &str) {
        self.status = text.replace("<br/>", "\n");
        if self.echo {
            println!("{}", self.status);
        }
    }
}
