//! Choosing moves for a computer player.
//!
//! [`best_move()`] walks the complete game tree below the current grid,
//! placing and undoing hypothetical marks on the grid it borrows. A game
//! ends as soon as either side completes a shape, or the grid is full.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{detect_shape, Grid, Mark};

/// The value of completing a shape right at the root of the search.
///
/// Each ply of delay costs one point, so that the searching side prefers
/// earlier wins and later losses.
pub const WIN_SCORE: i32 = 10;

/// The result of a [`search()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` if and only if the grid has no empty cell.
    pub best_move: Option<(usize, usize)>,
    /// The minimax value of `best_move`, if it was fully evaluated.
    pub score: Option<i32>,
    /// The number of positions that were evaluated.
    pub nodes: u64,
    /// Whether the deadline cut the search short.
    pub timed_out: bool,
}

/// Picks the empty cell with the best worst-case outcome for `ai`.
///
/// Returns `None` if the grid is full. Among equally good moves, the first
/// one in row-major order is chosen. The grid is unchanged when this returns.
///
/// The search is exhaustive, so its running time grows exponentially with
/// the number of empty cells.
pub fn best_move(grid: &mut Grid, ai: Mark, opponent: Mark) -> Option<(usize, usize)> {
    search(grid, ai, opponent, None).best_move
}

/// Like [`best_move()`], but gives up once `deadline` has passed.
///
/// A timed-out search still takes a cell that completes a shape right away,
/// or else blocks one the opponent could complete on its next move. Failing
/// both, it reports the best of the root moves that were evaluated
/// completely, or the first empty cell if there were none.
pub fn search(
    grid: &mut Grid,
    ai: Mark,
    opponent: Mark,
    deadline: Option<Instant>,
) -> SearchReport {
    let mut searcher = Searcher {
        ai,
        opponent,
        deadline,
        nodes: 0,
    };
    let candidates = grid.empty_cells();

    let mut best: Option<((usize, usize), i32)> = None;
    let mut timed_out = false;
    for &(row, col) in &candidates {
        let score = {
            let mut placed = grid.scoped(ai, row, col);
            searcher.value(&mut placed, 0, false)
        };
        let Some(score) = score else {
            timed_out = true;
            break;
        };
        // Strictly greater, so that ties go to the earlier move
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some(((row, col), score));
        }
    }

    let (best_move, score) = if timed_out {
        fallback(grid, &candidates, ai, opponent, best)
    } else {
        (best.map(|(mv, _)| mv), best.map(|(_, score)| score))
    };
    SearchReport {
        best_move,
        score,
        nodes: searcher.nodes,
        timed_out,
    }
}

/// Picks a move when the deadline cut the search short, from a one-ply look
/// at the root moves and the root moves that were `evaluated` completely.
///
/// Preferred, in order: completing a shape for `ai`, an evaluated forced
/// win, taking a cell that would complete a shape for `opponent`, the best
/// evaluated move, and finally the first empty cell.
fn fallback(
    grid: &mut Grid,
    candidates: &[(usize, usize)],
    ai: Mark,
    opponent: Mark,
    evaluated: Option<((usize, usize), i32)>,
) -> (Option<(usize, usize)>, Option<i32>) {
    let mut completing_move = |mark: Mark| {
        candidates.iter().copied().find(|&(row, col)| {
            let placed = grid.scoped(mark, row, col);
            detect_shape(&placed, mark).is_some()
        })
    };

    if let Some(mv) = completing_move(ai) {
        return (Some(mv), Some(WIN_SCORE));
    }
    if let Some((mv, score)) = evaluated.filter(|&(_, score)| score > 0) {
        return (Some(mv), Some(score));
    }
    if let Some(mv) = completing_move(opponent) {
        let score = evaluated
            .filter(|&(evaluated_mv, _)| evaluated_mv == mv)
            .map(|(_, score)| score);
        return (Some(mv), score);
    }
    match evaluated {
        Some((mv, score)) => (Some(mv), Some(score)),
        None => (candidates.first().copied(), None),
    }
}

/// Picks a uniformly random empty cell, or `None` if the grid is full.
pub fn random_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<(usize, usize)> {
    grid.empty_cells().choose(rng).copied()
}

struct Searcher {
    ai: Mark,
    opponent: Mark,
    deadline: Option<Instant>,
    nodes: u64,
}

impl Searcher {
    /// The minimax value of the grid from the AI's point of view, where
    /// `depth` plies have been played since the root move.
    ///
    /// Returns `None` when the deadline has passed.
    fn value(&mut self, grid: &mut Grid, depth: i32, maximizing: bool) -> Option<i32> {
        self.nodes += 1;
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return None;
        }

        if detect_shape(grid, self.ai).is_some() {
            return Some(WIN_SCORE - depth);
        }
        if detect_shape(grid, self.opponent).is_some() {
            return Some(depth - WIN_SCORE);
        }
        if grid.is_full() {
            return Some(0);
        }

        let (mark, mut best) = if maximizing {
            (self.ai, i32::MIN)
        } else {
            (self.opponent, i32::MAX)
        };
        for (row, col) in grid.empty_cells() {
            let mut placed = grid.scoped(mark, row, col);
            let score = self.value(&mut placed, depth + 1, !maximizing)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        Some(best)
    }
}
