mod minimax_bot;
mod random_bot;
pub use minimax_bot::*;
pub use random_bot::*;

use shapegrid::{Grid, Mark};

/// A trait to simplify writing computer players.
pub trait Bot {
    /// Called before every round, with the mark that the bot plays in it.
    fn new_round(&mut self, _mark: Mark) {}

    /// Picks an empty cell to place `mark` on.
    ///
    /// Must return `None` only if the grid is full.
    fn play_turn(&mut self, grid: &Grid, mark: Mark) -> Option<(usize, usize)>;
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn new_round(&mut self, mark: Mark) {
        (**self).new_round(mark)
    }

    fn play_turn(&mut self, grid: &Grid, mark: Mark) -> Option<(usize, usize)> {
        (**self).play_turn(grid, mark)
    }
}
