use rand::rngs::StdRng;
use rand::SeedableRng;
use shapegrid::{random_move, Grid, Mark};
use tracing::debug;

use crate::Bot;

/// Places its mark on a uniformly random empty cell.
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Bot for RandomBot {
    fn play_turn(&mut self, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        let mv = random_move(grid, &mut self.rng);
        debug!(%mark, ?mv, "Random move");
        mv
    }
}
