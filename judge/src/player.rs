use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shapegrid::{Grid, Mark};
use shapegrid_bots::{Bot, MinimaxBot, RandomBot};

use crate::human::HumanInput;

/// How a player is set up, as stored in a player config JSON file.
///
/// ```json
/// { "nick": "deep thought", "kind": { "minimax": { "think_time_ms": 500 } } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    pub kind: PlayerKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Random,
    Minimax {
        /// Without a limit, the search can take practically forever on a big grid.
        #[serde(default)]
        think_time_ms: Option<u64>,
    },
}

/// The largest grid on which a search without a think time finishes in
/// reasonable time.
pub const MAX_UNTIMED_SEARCH_GRID_SIZE: usize = 3;

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Whether this player searches the whole game tree on a grid where that
    /// practically never ends.
    pub fn search_may_not_finish(&self, grid_size: usize) -> bool {
        matches!(self.kind, PlayerKind::Minimax { think_time_ms: None })
            && grid_size > MAX_UNTIMED_SEARCH_GRID_SIZE
    }
}

enum Controller {
    Human(HumanInput),
    Bot(Box<dyn Bot>),
}

pub struct Player {
    pub name: String,
    controller: Controller,
}

impl Player {
    /// Sets up the player described by `config`.
    ///
    /// Random bots get their own RNG, seeded from `rng`.
    pub fn from_config(config: &PlayerConfig, rng: &mut StdRng) -> Self {
        match config.kind {
            PlayerKind::Human => Self::human(&config.nick, HumanInput::stdio()),
            PlayerKind::Random => {
                Self::bot(&config.nick, Box::new(RandomBot::from_seed(rng.gen())))
            }
            PlayerKind::Minimax { think_time_ms } => Self::bot(
                &config.nick,
                Box::new(MinimaxBot::new(think_time_ms.map(Duration::from_millis))),
            ),
        }
    }

    pub fn human(name: &str, input: HumanInput) -> Self {
        Self {
            name: String::from(name),
            controller: Controller::Human(input),
        }
    }

    pub fn bot(name: &str, bot: Box<dyn Bot>) -> Self {
        Self {
            name: String::from(name),
            controller: Controller::Bot(bot),
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human(_))
    }

    pub(crate) fn new_round(&mut self, mark: Mark) {
        if let Controller::Bot(bot) = &mut self.controller {
            bot.new_round(mark);
        }
    }

    /// Returns `None` only if the player passes, which bots do on a full grid.
    pub(crate) fn choose_move(
        &mut self,
        grid: &Grid,
        mark: Mark,
    ) -> anyhow::Result<Option<(usize, usize)>> {
        match &mut self.controller {
            Controller::Human(input) => Ok(Some(input.ask_move(grid, mark)?)),
            Controller::Bot(bot) => Ok(bot.play_turn(grid, mark)),
        }
    }

    /// Shows a message to the player, if it is a person.
    pub(crate) fn announce(&mut self, message: &str) -> anyhow::Result<()> {
        match &mut self.controller {
            Controller::Human(input) => input.announce(message),
            Controller::Bot(_) => Ok(()),
        }
    }
}
