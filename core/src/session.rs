use serde::{Deserialize, Serialize};

use crate::*;

/// Status shown before the first batch has been exported.
pub const INITIAL_STATUS: &str = "Instructions will appear. . .";

/// Counts external ticks and fires on every `every`-th one, starting with the `every`-th.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CadenceCounter")]
pub struct Cadence {
    every: u32,
    count: u32,
}

#[derive(Deserialize)]
struct CadenceCounter {
    every: u32,
    count: u32,
}

impl TryFrom<CadenceCounter> for Cadence {
    type Error = SketchError;

    fn try_from(CadenceCounter { every, count }: CadenceCounter) -> Result<Self> {
        if every == 0 || count >= every {
            return Err(SketchError::InvalidCadence);
        }
        Ok(Self { every, count })
    }
}

impl Cadence {
    pub fn new(every: u32) -> Self {
        Self {
            every: every.max(1),
            count: 0,
        }
    }

    pub fn advance(&mut self) -> bool {
        self.count = (self.count + 1) % self.every;
        self.count == 0
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    Revealed,
    Exported,
}

/// One running sketch: a generator, the reveal of its current batch, and the frame
/// bookkeeping that decides when to reveal the next box.
#[derive(Clone, Debug)]
pub struct Session<G> {
    config: SketchConfig,
    layout: GridLayout,
    generator: G,
    controller: RevealController,
    cadence: Cadence,
    frames: u64,
    cycles_exported: u32,
}

impl<G: PlacementGenerator> Session<G> {
    pub fn new(config: SketchConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let layout = config.layout()?;
        let controller = RevealController::start(&mut generator, &config)?;
        Ok(Self {
            config,
            layout,
            generator,
            controller,
            cadence: Cadence::new(config.reveal_cadence),
            frames: 0,
            cycles_exported: 0,
        })
    }

    /// Abandons the current reveal and starts over with a fresh batch.
    pub fn restart(&mut self) -> Result<()> {
        self.controller
            .start_cycle(&mut self.generator, &self.config)?;
        self.cadence.reset();
        Ok(())
    }

    pub fn greet<D: StatusDisplay + ?Sized>(&self, display: &mut D) {
        display.show_text(INITIAL_STATUS);
    }

    /// Handles one external tick: maybe reveal a box, draw the board, and export once the
    /// whole batch is visible.
    ///
    /// An export failure is returned but leaves the batch complete; it is not retried.
    pub fn frame<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<FrameOutcome> {
        self.frames += 1;
        let outcome = if self.cadence.advance() {
            self.controller.tick()
        } else {
            RevealOutcome::NoChange
        };

        self.render(frontend);

        match outcome {
            RevealOutcome::NoChange => Ok(FrameOutcome::Idle),
            RevealOutcome::Revealed => Ok(FrameOutcome::Revealed),
            RevealOutcome::Completed(request) => {
                self.cycles_exported += 1;
                let exported = Self::export(frontend, &request);
                frontend.show_text(&request.status_text());
                if let Err(err) = &exported {
                    log::warn!("Export of cycle {} failed: {}", self.cycles_exported, err);
                }
                exported?;
                Ok(FrameOutcome::Exported)
            }
        }
    }

    fn render<R: BoardRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.begin_frame();
        renderer.draw_grid(&self.layout);
        for placed in self.controller.visible_boxes() {
            renderer.draw_box(placed);
        }
    }

    fn export<E: Exporter + ?Sized>(
        exporter: &mut E,
        request: &ExportRequest,
    ) -> core::result::Result<(), ExportError> {
        exporter.write_lines(&request.lines)?;
        exporter.write_records(&request.boxes)?;
        if request.snapshot_requested {
            exporter.capture_snapshot(SNAPSHOT_NAME)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn controller(&self) -> &RevealController {
        &self.controller
    }

    pub fn is_complete(&self) -> bool {
        self.controller.is_complete()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cycles_exported(&self) -> u32 {
        self.cycles_exported
    }
}
