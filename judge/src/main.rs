use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use judge::{play_game, GameResult, GameSettings, Player, PlayerConfig, PlayerKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shapegrid::DEFAULT_GRID_SIZE;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Two people at the same terminal
    Pvp,
    /// A person (X) against the computer (O)
    Pva,
    /// The computer against itself
    Ava,
}

const MAX_GRID_SIZE: u64 = 100;

#[derive(Debug, Parser)]
struct Args {
    /// Who is playing
    #[arg(short, long, value_enum, default_value_t = Mode::Pvp)]
    mode: Mode,

    /// Paths to the config JSON files of the two players, instead of --mode
    #[arg(long, num_args(2), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// Side length of the grid
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_GRID_SIZE),
    )]
    grid_size: usize,

    /// How many rounds make up a game
    #[arg(short, long, default_value_t = 3)]
    rounds: usize,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// Let computer players search the game tree instead of playing randomly
    #[arg(long, default_value_t = false)]
    minimax: bool,

    /// Time limit for each minimax move, in milliseconds
    #[arg(long)]
    think_time_ms: Option<u64>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the rounds of every game as JSON lines on stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    ties: usize,
}

fn player_configs(args: &Args) -> anyhow::Result<[PlayerConfig; 2]> {
    if !args.player_configs.is_empty() {
        let [a, b] = &args.player_configs[..] else {
            anyhow::bail!("Expected exactly two player configs");
        };
        return Ok([PlayerConfig::load(a)?, PlayerConfig::load(b)?]);
    }

    let computer = |nick: &str| PlayerConfig {
        nick: String::from(nick),
        kind: if args.minimax {
            PlayerKind::Minimax {
                think_time_ms: args.think_time_ms,
            }
        } else {
            PlayerKind::Random
        },
    };
    let human = |nick: &str| PlayerConfig {
        nick: String::from(nick),
        kind: PlayerKind::Human,
    };
    Ok(match args.mode {
        Mode::Pvp => [human("Player 1"), human("Player 2")],
        Mode::Pva => [human("Player 1"), computer("Computer")],
        Mode::Ava => [computer("Computer 1"), computer("Computer 2")],
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let configs = player_configs(&args)?;
    for config in &configs {
        if config.search_may_not_finish(args.grid_size) {
            warn!(
                player = %config.nick,
                grid_size = args.grid_size,
                "Minimax without a think time searches every possible game, \
                 which will not finish on a grid this big"
            );
        }
    }
    let mut players = [
        Player::from_config(&configs[0], &mut rng),
        Player::from_config(&configs[1], &mut rng),
    ];
    let settings = GameSettings {
        grid_size: args.grid_size,
        rounds: args.rounds,
        show_grid: players.iter().any(Player::is_human),
    };

    let mut match_score = MatchScore::default();
    for game_idx in 0..args.num_games {
        let summary = play_game(&mut rng, &mut players, &settings)?;
        if args.json {
            println!("{}", serde_json::to_string(&summary.rounds)?);
        }
        match summary.result {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = %players[player_idx].name, game_idx, points = ?summary.points);
                match_score.wins[player_idx] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = %players[player_idx].name,
                    game_idx, "Illegal move by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                match_score.wins[1 - player_idx] += 1;
                match_score.illegal_moves[player_idx] += 1;
            }
        }
    }

    if args.num_games > 1 || !settings.show_grid {
        print_match_score(&players, &match_score);
    }

    Ok(())
}

fn print_match_score(players: &[Player; 2], match_score: &MatchScore) {
    let paren = |idx: usize| {
        let other = 1 - idx;
        if match_score.illegal_moves[other] > 0 {
            format!(
                " ({} through illegal moves by {})",
                match_score.illegal_moves[other], players[other].name
            )
        } else {
            String::new()
        }
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} ties",
        match_score.wins[0],
        players[0].name,
        paren(0),
        match_score.wins[1],
        players[1].name,
        paren(1),
        match_score.ties
    );
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
