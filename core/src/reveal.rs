use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Idle,
    Revealing,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// The batch just became fully visible. Carries the one export of this cycle.
    Completed(ExportRequest),
}

impl RevealOutcome {
    pub fn into_export(self) -> Option<ExportRequest> {
        match self {
            Self::Completed(request) => Some(request),
            Self::NoChange | Self::Revealed => None,
        }
    }
}

/// Reveals one batch box by box and hands out its export exactly once.
///
/// The controller only counts calls to [`tick`](Self::tick); how often those happen is up
/// to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RevealProgress")]
pub struct RevealController {
    batch: Batch,
    shown: usize,
    exported: bool,
}

/// Unchecked wire form of a [`RevealController`].
#[derive(Deserialize)]
struct RevealProgress {
    batch: Batch,
    shown: usize,
    exported: bool,
}

impl TryFrom<RevealProgress> for RevealController {
    type Error = SketchError;

    fn try_from(progress: RevealProgress) -> Result<Self> {
        let len = progress.batch.len();
        let complete = progress.shown == len;
        if progress.shown > len || (progress.exported && !complete) {
            return Err(SketchError::InvalidProgress {
                shown: progress.shown,
                len,
            });
        }
        Ok(Self {
            batch: progress.batch,
            shown: progress.shown,
            exported: progress.exported,
        })
    }
}

impl RevealController {
    pub fn new(batch: Batch) -> Self {
        Self {
            batch,
            shown: 0,
            exported: false,
        }
    }

    pub fn start<G: PlacementGenerator + ?Sized>(
        generator: &mut G,
        config: &SketchConfig,
    ) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    /// Replaces the batch with a fresh one and forgets all progress, whatever the current
    /// state. When generation fails the current batch and progress are left untouched.
    pub fn start_cycle<G: PlacementGenerator + ?Sized>(
        &mut self,
        generator: &mut G,
        config: &SketchConfig,
    ) -> Result<()> {
        let batch = generator.generate(config)?;
        log::debug!("New cycle with {} boxes", batch.len());
        *self = Self::new(batch);
        Ok(())
    }

    pub fn tick(&mut self) -> RevealOutcome {
        let revealed = self.shown < self.batch.len();
        if revealed {
            self.shown += 1;
            log::trace!("Revealed box {}/{}", self.shown, self.batch.len());
        }

        if self.is_complete() && !self.exported {
            self.exported = true;
            log::debug!("All {} boxes visible, exporting", self.batch.len());
            return RevealOutcome::Completed(ExportRequest::for_batch(&self.batch));
        }

        if revealed {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        }
    }

    /// Boxes revealed so far, in generation order.
    pub fn visible_boxes(&self) -> &[PlacedBox] {
        &self.batch[..self.shown]
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    /// An empty batch counts as complete from the start.
    pub fn is_complete(&self) -> bool {
        self.shown == self.batch.len()
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn state(&self) -> RevealState {
        if self.is_complete() {
            RevealState::Complete
        } else if self.shown == 0 {
            RevealState::Idle
        } else {
            RevealState::Revealing
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::placement::testing::ScriptedSource;

    const THREE: [(Coord2, SizeClass); 3] = [
        ((0, 7), SizeClass::Small),
        ((7, 0), SizeClass::Large),
        ((3, 3), SizeClass::Medium),
    ];

    fn config(total_boxes: BoxCount) -> SketchConfig {
        SketchConfig::new(8, 480.0, total_boxes)
    }

    fn three_box_controller() -> RevealController {
        RevealController::start(&mut ScriptedSource::new(&THREE), &config(3)).unwrap()
    }

    #[test]
    fn reveals_in_generation_order_then_exports() {
        let mut controller = three_box_controller();
        assert_eq!(controller.state(), RevealState::Idle);
        assert!(controller.visible_boxes().is_empty());

        assert_eq!(controller.tick(), RevealOutcome::Revealed);
        assert_eq!(controller.state(), RevealState::Revealing);
        assert_eq!(controller.visible_boxes()[0].notation(), "A1");

        assert_eq!(controller.tick(), RevealOutcome::Revealed);
        let request = controller.tick().into_export().expect("third tick should export");

        let notations: Vec<_> = controller
            .visible_boxes()
            .iter()
            .map(PlacedBox::notation)
            .collect();
        assert_eq!(notations, ["A1", "H8", "D5"]);
        assert_eq!(
            request.lines,
            ["small box at A1", "large box at H8", "medium box at D5"]
        );
        assert!(request.snapshot_requested);
        assert!(controller.is_complete());
        assert!(controller.is_exported());
    }

    #[test]
    fn extra_ticks_saturate_and_never_export_again() {
        let mut controller = three_box_controller();
        let exports = (0..10)
            .map(|_| controller.tick())
            .filter(|outcome| matches!(outcome, RevealOutcome::Completed(_)))
            .count();

        assert_eq!(exports, 1);
        assert_eq!(controller.shown(), 3);
        assert_eq!(controller.tick(), RevealOutcome::NoChange);
        assert_eq!(controller.state(), RevealState::Complete);
    }

    #[test]
    fn empty_batch_is_complete_and_exports_on_first_tick() {
        let mut controller =
            RevealController::start(&mut ScriptedSource::default(), &config(0)).unwrap();
        assert!(controller.is_complete());
        assert!(!controller.is_exported());

        let request = controller.tick().into_export().expect("empty batch should export");
        assert!(request.lines.is_empty());
        assert_eq!(controller.tick(), RevealOutcome::NoChange);
    }

    #[test]
    fn start_cycle_mid_reveal_resets_progress() {
        let mut controller = three_box_controller();
        controller.tick();
        controller.tick();

        let mut source = ScriptedSource::new(&[((1, 1), SizeClass::Small)]);
        controller.start_cycle(&mut source, &config(1)).unwrap();

        assert_eq!(controller.shown(), 0);
        assert_eq!(controller.state(), RevealState::Idle);
        assert_eq!(controller.batch().len(), 1);
    }

    #[test]
    fn start_cycle_after_completion_allows_another_export() {
        let mut controller = three_box_controller();
        for _ in 0..3 {
            controller.tick();
        }
        assert!(controller.is_exported());

        controller
            .start_cycle(&mut ScriptedSource::new(&THREE), &config(3))
            .unwrap();
        assert!(!controller.is_complete());
        assert!(!controller.is_exported());

        let exports = (0..5)
            .filter_map(|_| controller.tick().into_export())
            .count();
        assert_eq!(exports, 1);
    }

    #[test]
    fn restored_progress_must_fit_the_batch() {
        let past_end = r#"{"batch":{"boxes":[]},"shown":3,"exported":false}"#;
        assert!(serde_json::from_str::<RevealController>(past_end).is_err());

        let early_export = r#"{"batch":{"boxes":[]},"shown":0,"exported":true}"#;
        assert!(serde_json::from_str::<RevealController>(early_export).is_ok());

        let mut controller = three_box_controller();
        controller.tick();
        let text = serde_json::to_string(&controller).unwrap();
        let restored: RevealController = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, controller);
        assert_eq!(restored.visible_boxes().len(), 1);

        let exported_midway = text.replace(r#""exported":false"#, r#""exported":true"#);
        assert!(serde_json::from_str::<RevealController>(&exported_midway).is_err());
    }

    #[test]
    fn failed_cycle_keeps_previous_batch() {
        let mut controller = three_box_controller();
        controller.tick();

        let err = controller
            .start_cycle(&mut ScriptedSource::default(), &SketchConfig::new(27, 480.0, 3))
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(controller.shown(), 1);
        assert_eq!(controller.batch().len(), 3);
    }
}
