use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement from a seeded generator. Every call to `generate` continues the
/// same random stream, so consecutive cycles differ but a whole run replays from the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPlacementGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomPlacementGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PlacementGenerator for RandomPlacementGenerator {
    fn generate(&mut self, config: &SketchConfig) -> Result<Batch> {
        generate_batch(
            config.cells,
            config.grid_size,
            config.total_boxes,
            &mut self.rng,
        )
    }
}
