use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gridbox_core::{ExportError, ExportStage, PlacedBox};

pub const PLACEMENTS_STEM: &str = "placements";

/// Where one round's files go. With several rounds every file gets a `-<round>` suffix so
/// later rounds do not overwrite earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportFiles {
    dir: PathBuf,
    round: Option<u32>,
    json: bool,
}

impl ExportFiles {
    pub fn new(dir: impl Into<PathBuf>, json: bool) -> Self {
        Self {
            dir: dir.into(),
            round: None,
            json,
        }
    }

    pub fn set_round(&mut self, round: Option<u32>) {
        self.round = round;
    }

    pub fn path(&self, stem: &str, extension: &str) -> PathBuf {
        let name = match self.round {
            Some(round) => format!("{stem}-{round}.{extension}"),
            None => format!("{stem}.{extension}"),
        };
        self.dir.join(name)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_lines(&self, lines: &[String]) -> Result<PathBuf, ExportError> {
        let path = self.path(PLACEMENTS_STEM, "txt");
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        fs::write(&path, text).map_err(|err| failed(ExportStage::Lines, &path, err))?;
        log::info!("Wrote {} placements to {}", lines.len(), path.display());
        Ok(path)
    }

    pub fn write_records(&self, boxes: &[PlacedBox]) -> Result<Option<PathBuf>, ExportError> {
        if !self.json {
            return Ok(None);
        }
        let path = self.path(PLACEMENTS_STEM, "json");
        let file = fs::File::create(&path).map_err(|err| failed(ExportStage::Records, &path, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, boxes)
            .map_err(|err| failed(ExportStage::Records, &path, err))?;
        writer
            .flush()
            .map_err(|err| failed(ExportStage::Records, &path, err))?;
        log::debug!("Wrote placement records to {}", path.display());
        Ok(Some(path))
    }

    pub fn write_snapshot(&self, name: &str, svg: &str) -> Result<PathBuf, ExportError> {
        let path = self.path(name, "svg");
        fs::write(&path, svg).map_err(|err| failed(ExportStage::Snapshot, &path, err))?;
        log::info!("Saved snapshot to {}", path.display());
        Ok(path)
    }
}

fn failed(stage: ExportStage, path: &Path, err: impl std::fmt::Display) -> ExportError {
    ExportError::new(stage, format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use gridbox_core::{GridLayout, Rgb, SizeClass};

    use super::*;

    #[test]
    fn round_suffix_lands_before_extension() {
        let mut files = ExportFiles::new("out", true);
        assert_eq!(files.path("placements", "txt"), Path::new("out/placements.txt"));
        files.set_round(Some(3));
        assert_eq!(files.path("board_snapshot", "svg"), Path::new("out/board_snapshot-3.svg"));
    }

    #[test]
    fn lines_are_newline_terminated() {
        let dir = tempfile::tempdir().unwrap();
        let files = ExportFiles::new(dir.path(), true);
        let lines = ["small box at A1".to_string(), "large box at H8".to_string()];

        let path = files.write_lines(&lines).unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "small box at A1\nlarge box at H8\n"
        );
    }

    #[test]
    fn records_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let files = ExportFiles::new(dir.path(), true);
        let layout = GridLayout::new(8, 480.0).unwrap();
        let boxes = vec![PlacedBox::new(&layout, (3, 3), SizeClass::Medium, Rgb(61, 62, 63)).unwrap()];

        let path = files.write_records(&boxes).unwrap().unwrap();
        let text = fs::read_to_string(path).unwrap();
        let back: Vec<PlacedBox> = serde_json::from_str(&text).unwrap();

        assert_eq!(back, boxes);
        assert!(text.contains(r#""notation": "D5""#));
        assert!(text.contains(r#""size_class": "medium""#));
    }

    #[test]
    fn records_are_skipped_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let files = ExportFiles::new(dir.path(), false);
        assert_eq!(files.write_records(&[]).unwrap(), None);
        assert!(!dir.path().join("placements.json").exists());
    }

    #[test]
    fn write_failure_names_stage_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let files = ExportFiles::new(dir.path().join("missing"), true);

        let err = files.write_lines(&[]).unwrap_err();

        assert_eq!(err.stage, ExportStage::Lines);
        assert!(err.message.contains("missing"));
    }
}
