use std::path::PathBuf;

use serde::Serialize;
use shape_sorter_engine::{GameSeed, GameState, GameStats};
use tracing::{debug, info};

use crate::{bot::GreedyBot, logging, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed of the game; with several games, `-<index>` is appended per game
    #[clap(long)]
    seed: Option<GameSeed>,
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Stop a game after this many turns even if it is not over
    #[clap(long, default_value_t = 1000)]
    turn_limit: usize,
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
    /// Print debug logs to stderr
    #[clap(short, long)]
    verbose: bool,
}

/// Result of one headless game, printed as one JSON line.
#[derive(Debug, Clone, Serialize)]
struct GameSummary {
    seed: GameSeed,
    game_over: bool,
    final_stats: GameStats,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        games,
        turn_limit,
        output,
        verbose,
    } = arg;

    logging::init_stderr(*verbose);

    let mut output = Output::from_output_path(output.as_deref())?;
    for index in 0..*games {
        let seed = seed_for_game(seed.as_ref(), index, *games)?;
        let summary = play_game(seed, *turn_limit)?;
        info!(
            seed = %summary.seed,
            score = summary.final_stats.score(),
            turns = summary.final_stats.turn(),
            "game finished"
        );
        output.write_json_line(&summary)?;
    }
    output.finish()
}

fn seed_for_game(base: Option<&GameSeed>, index: usize, games: usize) -> anyhow::Result<GameSeed> {
    let seed = match base {
        Some(base) if games == 1 => base.clone(),
        Some(base) => format!("{base}-{index}").parse()?,
        None => GameSeed::generate(),
    };
    Ok(seed)
}

fn play_game(seed: GameSeed, turn_limit: usize) -> anyhow::Result<GameSummary> {
    let bot = GreedyBot;
    let mut state = GameState::with_seed(seed);
    while !state.is_game_over() && state.stats().turn() < turn_limit {
        let Some((x, y)) = bot.choose_anchor(state.board(), state.current_shape()) else {
            break;
        };
        let outcome = state.play_turn(x, y)?;
        if !outcome.cleared.is_empty() {
            debug!(
                turn = state.stats().turn(),
                lines = outcome.cleared.len(),
                points = outcome.points,
                "bot cleared lines"
            );
        }
    }
    Ok(GameSummary {
        seed: state.seed().clone(),
        game_over: state.is_game_over(),
        final_stats: state.stats().clone(),
    })
}
