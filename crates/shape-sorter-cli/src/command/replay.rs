use std::path::PathBuf;

use anyhow::{Context, bail};
use shape_sorter_engine::GameState;
use tracing::debug;

use crate::{logging, schema::record::RecordedSession, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_file: PathBuf,
    /// Print every replayed move
    #[clap(short, long)]
    verbose: bool,
}

/// What a replay found out about a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReplayReport {
    moves: usize,
    replayed_score: usize,
    recorded_score: usize,
    game_over: bool,
}

impl ReplayReport {
    pub(crate) fn score_matches(&self) -> bool {
        self.replayed_score == self.recorded_score
    }
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        recording_file,
        verbose,
    } = arg;

    logging::init_stderr(*verbose);

    eprintln!("Loading recording from {}", recording_file.display());
    let session: RecordedSession = util::read_json_file("recording", recording_file)?;
    eprintln!(
        "Loaded {} moves for seed {} (recorded at {})",
        session.moves.len(),
        session.seed,
        session.recorded_at
    );

    let report = replay(&session, *verbose)?;
    println!(
        "Replayed {} moves: score {} (recorded {}){}",
        report.moves,
        report.replayed_score,
        report.recorded_score,
        if report.game_over { ", game over" } else { "" }
    );
    if !report.score_matches() {
        bail!(
            "replayed score {} does not match recorded score {}",
            report.replayed_score,
            report.recorded_score
        );
    }
    Ok(())
}

/// Replays every recorded move on a fresh game from the recording's seed.
///
/// Fails when a recorded shape differs from the one the seed produces at that
/// turn, or when a recorded drop is rejected.
pub(crate) fn replay(session: &RecordedSession, verbose: bool) -> anyhow::Result<ReplayReport> {
    let mut state = GameState::with_seed(session.seed.clone());

    for (index, record) in session.moves.iter().enumerate() {
        let turn = state.stats().turn();
        if record.turn != turn {
            bail!(
                "move #{index} was recorded on turn {}, but the replay is on turn {turn}",
                record.turn
            );
        }
        if record.shape != *state.current_shape() {
            bail!(
                "move #{index} recorded shape {:?}, but seed {} offers {:?} on turn {turn}",
                record.shape,
                session.seed,
                state.current_shape()
            );
        }

        let (x, y) = record.anchor;
        let outcome = state
            .play_turn(x, y)
            .with_context(|| format!("move #{index} at ({x}, {y}) was rejected"))?;
        debug!(turn, x, y, points = outcome.points, "replayed move");
        if verbose {
            println!(
                "turn {turn:>4}: {} shape at ({x}, {y}), +{} points, score {}",
                record.shape.color(),
                outcome.points,
                state.score()
            );
        }
    }

    Ok(ReplayReport {
        moves: session.moves.len(),
        replayed_score: state.score(),
        recorded_score: session.final_stats.score(),
        game_over: state.is_game_over(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shape_sorter_engine::{GameSeed, Shape, ShapeColor, ShapeMask};

    use super::*;
    use crate::record::RecordingGame;

    fn recorded(game: RecordingGame) -> RecordedSession {
        let final_stats = game.stats().clone();
        RecordedSession {
            recorded_at: Utc::now(),
            seed: game.seed().clone(),
            final_stats,
            moves: game.moves().to_vec(),
        }
    }

    fn play_abc() -> RecordingGame {
        let seed: GameSeed = "abc".parse().unwrap();
        let mut game = RecordingGame::new(seed);
        for (x, y) in [(0, 0), (0, 3), (0, 4)] {
            assert!(game.place_shape(x, y));
            let lines = game.find_lines_to_clear();
            game.clear_lines(&lines);
            game.next_turn();
        }
        game
    }

    #[test]
    fn test_replay_matches_recording() {
        let session = recorded(play_abc());
        let report = replay(&session, false).unwrap();
        assert_eq!(
            report,
            ReplayReport {
                moves: 3,
                replayed_score: 0,
                recorded_score: 0,
                game_over: false,
            }
        );
        assert!(report.score_matches());
    }

    #[test]
    fn test_replay_detects_score_mismatch() {
        let mut session = recorded(play_abc());
        let mut json = serde_json::to_value(&session.final_stats).unwrap();
        json["score"] = 500.into();
        session.final_stats = serde_json::from_value(json).unwrap();

        let report = replay(&session, false).unwrap();
        assert!(!report.score_matches());
    }

    #[test]
    fn test_replay_rejects_wrong_shape() {
        let mut session = recorded(play_abc());
        session.moves[1].shape = Shape::new(ShapeMask::from_rows(&["#"]), ShapeColor::Red);
        let err = replay(&session, false).unwrap_err();
        assert!(err.to_string().contains("move #1"), "{err}");
    }

    #[test]
    fn test_replay_rejects_invalid_anchor() {
        let mut session = recorded(play_abc());
        session.moves[1].anchor = (0, 0);
        let err = replay(&session, false).unwrap_err();
        assert!(err.to_string().contains("rejected"), "{err}");
    }
}
