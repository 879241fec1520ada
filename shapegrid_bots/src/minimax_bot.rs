use std::time::{Duration, Instant};

use shapegrid::{search, Grid, Mark};
use tracing::{debug, warn};

use crate::Bot;

/// Plays the move found by an exhaustive minimax search.
///
/// Without a think time, the search runs to completion, which is only
/// feasible on small or nearly full grids.
pub struct MinimaxBot {
    think_time: Option<Duration>,
}

impl MinimaxBot {
    pub fn new(think_time: Option<Duration>) -> Self {
        Self { think_time }
    }
}

impl Bot for MinimaxBot {
    fn play_turn(&mut self, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        // The search temporarily writes into the grid, so it gets its own copy.
        let mut scratch = grid.clone();
        let deadline = self.think_time.map(|t| Instant::now() + t);
        let report = search(&mut scratch, mark, mark.opponent(), deadline);
        if report.timed_out {
            warn!(
                %mark,
                nodes = report.nodes,
                "Search ran out of time, playing {:?}",
                report.best_move
            );
        } else {
            debug!(
                %mark,
                best_move = ?report.best_move,
                score = ?report.score,
                nodes = report.nodes,
                "Search finished"
            );
        }
        report.best_move
    }
}
