use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Name handed to the exporter for the board picture.
pub const SNAPSHOT_NAME: &str = "board_snapshot";

/// What a completed batch asks the outside world to save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// `"<size> box at <notation>"`, one per box, in batch order.
    pub lines: Vec<String>,
    pub boxes: Vec<PlacedBox>,
    pub snapshot_requested: bool,
}

impl ExportRequest {
    pub fn for_batch(batch: &Batch) -> Self {
        Self {
            lines: batch.placement_lines(),
            boxes: batch.to_vec(),
            snapshot_requested: true,
        }
    }

    /// Lines joined the way the status display expects them.
    pub fn status_text(&self) -> String {
        self.lines.join("<br/>")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExportStage {
    Lines,
    Records,
    Snapshot,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lines => "write placements",
            Self::Records => "write placement records",
            Self::Snapshot => "capture snapshot",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not {stage}: {message}")]
pub struct ExportError {
    pub stage: ExportStage,
    pub message: String,
}

impl ExportError {
    pub fn new(stage: ExportStage, cause: impl fmt::Display) -> Self {
        Self {
            stage,
            message: cause.to_string(),
        }
    }
}

/// Persists a completed batch. Called at most once per generation cycle.
pub trait Exporter {
    fn write_lines(&mut self, lines: &[String]) -> core::result::Result<(), ExportError>;

    fn capture_snapshot(&mut self, name: &str) -> core::result::Result<(), ExportError>;

    fn write_records(&mut self, _boxes: &[PlacedBox]) -> core::result::Result<(), ExportError> {
        Ok(())
    }
}
