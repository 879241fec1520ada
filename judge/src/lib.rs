mod error;
mod game;
mod human;
mod player;
#[cfg(test)]
mod test_utils;
pub use error::*;
pub use game::*;
pub use human::*;
pub use player::*;
