use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use shapegrid::{detect_shape, Grid, Mark, Shape};
use tracing::{debug, info};

use crate::error::IllegalMove;
use crate::player::Player;

/// Player 1 plays X, player 2 plays O.
pub const MARKS: [Mark; 2] = [Mark::X, Mark::O];

#[derive(Clone, Copy, Debug)]
pub struct GameSettings {
    pub grid_size: usize,
    pub rounds: usize,
    /// Print the grid and round results, for games with people in them.
    pub show_grid: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: shapegrid::DEFAULT_GRID_SIZE,
            rounds: 3,
            show_grid: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum RoundOutcome {
    Won { mark: Mark, shape: Shape, points: u32 },
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// The mark of the player who moved first.
    pub starter: Mark,
    pub moves: usize,
    #[serde(flatten)]
    pub outcome: RoundOutcome,
}

#[derive(Debug)]
pub struct GameSummary {
    pub result: GameResult,
    /// Indexed like the players.
    pub points: [u32; 2],
    /// The rounds that were completed.
    pub rounds: Vec<RoundRecord>,
}

/// Plays all rounds of one game.
///
/// Returns an error only when a player fails to respond at all, e.g. because
/// its input ended. Illegal moves are reported in the [`GameSummary`].
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player; 2],
    settings: &GameSettings,
) -> anyhow::Result<GameSummary> {
    // Randomly pick a starting player
    let starter = if rng.gen::<bool>() { 1 } else { 0 };
    info!(starter = %players[starter].name, "Starting game");
    play_rounds(players, settings, starter)
}

enum RoundEnd {
    Finished {
        record: RoundRecord,
        last_player_idx: usize,
    },
    IllegalMove {
        player_idx: usize,
        err: IllegalMove,
    },
}

pub(crate) fn play_rounds(
    players: &mut [Player; 2],
    settings: &GameSettings,
    mut starter: usize,
) -> anyhow::Result<GameSummary> {
    let mut points = [0u32; 2];
    let mut rounds = Vec::with_capacity(settings.rounds);

    for round_idx in 0..settings.rounds {
        announce_all(
            players,
            settings,
            &format!("Starting round {}!", round_idx + 1),
        )?;
        match play_round(players, settings, starter)? {
            RoundEnd::Finished {
                record,
                last_player_idx,
            } => {
                if let RoundOutcome::Won { points: p, .. } = record.outcome {
                    points[last_player_idx] += p;
                }
                info!(round = round_idx + 1, ?record, "Round finished");
                rounds.push(record);
                // Whoever ended the round opens the next one
                starter = last_player_idx;
            }
            RoundEnd::IllegalMove { player_idx, err } => {
                info!(player = %players[player_idx].name, %err, "Illegal move");
                return Ok(GameSummary {
                    result: GameResult::IllegalMoveByPlayer { player_idx, err },
                    points,
                    rounds,
                });
            }
        }
    }

    info!(?points, "Game finished");

    // Report who won
    let result = match points[0].cmp(&points[1]) {
        Ordering::Less => GameResult::WonByPlayer { player_idx: 1 },
        Ordering::Equal => GameResult::Tie,
        Ordering::Greater => GameResult::WonByPlayer { player_idx: 0 },
    };
    announce_all(
        players,
        settings,
        &format!(
            "Final score: {}: {} points, {}: {} points.",
            players[0].name, points[0], players[1].name, points[1]
        ),
    )?;
    let verdict = match result {
        GameResult::WonByPlayer { player_idx } => {
            format!("{} wins the game!", players[player_idx].name)
        }
        _ => String::from("It's a draw!"),
    };
    announce_all(players, settings, &verdict)?;

    Ok(GameSummary {
        result,
        points,
        rounds,
    })
}

fn play_round(
    players: &mut [Player; 2],
    settings: &GameSettings,
    starter: usize,
) -> anyhow::Result<RoundEnd> {
    let mut grid = Grid::new(settings.grid_size);
    for (player, mark) in players.iter_mut().zip(MARKS) {
        player.new_round(mark);
    }

    let mut current_player_idx = starter;
    let mut moves = 0;
    loop {
        let mark = MARKS[current_player_idx];
        let player = &mut players[current_player_idx];
        if settings.show_grid {
            player.announce(&grid.to_string())?;
        }

        let (row, col) = match player.choose_move(&grid, mark)? {
            Some(mv) => mv,
            None => {
                return Ok(RoundEnd::IllegalMove {
                    player_idx: current_player_idx,
                    err: IllegalMove::NoMove,
                })
            }
        };
        if let Err(err) = place_checked(&mut grid, mark, row, col) {
            return Ok(RoundEnd::IllegalMove {
                player_idx: current_player_idx,
                err,
            });
        }
        moves += 1;
        debug!(player = %player.name, %mark, row, col, "Placed mark");
        if !player.is_human() {
            let message = format!("{} placed {} at ({}, {}).", player.name, mark, row, col);
            announce_all(players, settings, &message)?;
        }

        let outcome = if let Some(shape) = detect_shape(&grid, mark) {
            let points = shape.points();
            announce_all(
                players,
                settings,
                &format!(
                    "{} wins the round with a {} and earns {} points!",
                    mark, shape, points
                ),
            )?;
            RoundOutcome::Won {
                mark,
                shape,
                points,
            }
        } else if grid.is_full() {
            announce_all(
                players,
                settings,
                "The board is full! The round ends in a draw.",
            )?;
            RoundOutcome::Draw
        } else {
            current_player_idx = 1 - current_player_idx;
            continue;
        };

        if settings.show_grid {
            announce_all(players, settings, &grid.to_string())?;
        }
        return Ok(RoundEnd::Finished {
            record: RoundRecord {
                starter: MARKS[starter],
                moves,
                outcome,
            },
            last_player_idx: current_player_idx,
        });
    }
}

/// Only empty cells may be played.
fn place_checked(grid: &mut Grid, mark: Mark, row: usize, col: usize) -> Result<(), IllegalMove> {
    if !grid.is_empty(row, col)? {
        return Err(IllegalMove::CellOccupied { row, col });
    }
    grid.place(mark, row, col)?;
    Ok(())
}

fn announce_all(
    players: &mut [Player; 2],
    settings: &GameSettings,
    message: &str,
) -> anyhow::Result<()> {
    if !settings.show_grid {
        return Ok(());
    }
    // When two people share a terminal, say it only once
    if players[0].is_human() {
        players[0].announce(message)
    } else {
        players[1].announce(message)
    }
}
