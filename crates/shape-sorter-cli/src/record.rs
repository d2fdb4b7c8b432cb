use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use shape_sorter_engine::{GameSeed, GameState, GameStats, LineDescriptor};

use crate::schema::record::{MoveRecord, RecordedSession};

/// A wrapper around [`GameState`] that records every committed drop.
///
/// Only the drop itself is recorded; clears and turn advances follow from the
/// board and the seed, so replaying the drops reproduces the whole game.
#[derive(Debug)]
pub struct RecordingGame {
    state: GameState,
    moves: Vec<MoveRecord>,
}

/// Provides read-only access to the underlying `GameState`.
///
/// `DerefMut` is deliberately absent: drops must go through
/// [`RecordingGame::place_shape`] to be recorded.
impl Deref for RecordingGame {
    type Target = GameState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl RecordingGame {
    pub fn new(seed: GameSeed) -> Self {
        Self {
            state: GameState::with_seed(seed),
            moves: vec![],
        }
    }

    pub fn place_shape(&mut self, x: i32, y: i32) -> bool {
        let shape = *self.state.current_shape();
        let turn = self.state.stats().turn();
        if !self.state.place_shape(x, y) {
            return false;
        }
        self.moves.push(MoveRecord {
            turn,
            anchor: (x, y),
            shape,
        });
        true
    }

    pub fn clear_lines(&mut self, lines: &[LineDescriptor]) -> usize {
        self.state.clear_lines(lines)
    }

    pub fn next_turn(&mut self) {
        self.state.next_turn();
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Consumes the game and returns its history with the final statistics.
    pub fn into_history(self) -> GameHistory {
        GameHistory {
            seed: self.state.seed().clone(),
            final_stats: self.state.stats().clone(),
            moves: self.moves,
        }
    }
}

/// Recorded history of one finished or abandoned game.
#[derive(Debug, Clone)]
pub struct GameHistory {
    seed: GameSeed,
    final_stats: GameStats,
    moves: Vec<MoveRecord>,
}

impl GameHistory {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn to_session(&self, recorded_at: DateTime<Utc>) -> RecordedSession {
        RecordedSession {
            recorded_at,
            seed: self.seed.clone(),
            final_stats: self.final_stats.clone(),
            moves: self.moves.clone(),
        }
    }

    /// Saves the recorded game to a JSON file and returns its path.
    ///
    /// The filename is generated from the seed and the current timestamp:
    /// `game_{seed}_{YYYYMMDD_HHMMSS}.json`, where characters of the seed
    /// outside `[A-Za-z0-9_-]` are replaced by `_`.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let timestamp = Utc::now();
        let filename = format!(
            "game_{}_{}.json",
            file_safe(self.seed.as_str()),
            timestamp.format("%Y%m%d_%H%M%S")
        );
        let filepath = record_dir.join(filename);

        let data = self.to_session(timestamp);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        Ok(filepath)
    }
}

fn file_safe(seed: &str) -> String {
    seed.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util;

    fn abc() -> GameSeed {
        "abc".parse().unwrap()
    }

    #[test]
    fn test_only_successful_drops_are_recorded() {
        let mut game = RecordingGame::new(abc());
        let first = *game.current_shape();

        assert!(!game.place_shape(-1, 0));
        assert!(game.place_shape(0, 0));
        assert!(!game.place_shape(0, 0));
        game.next_turn();
        let second = *game.current_shape();
        assert!(game.place_shape(0, 3));

        assert_eq!(
            game.moves(),
            &[
                MoveRecord {
                    turn: 0,
                    anchor: (0, 0),
                    shape: first,
                },
                MoveRecord {
                    turn: 1,
                    anchor: (0, 3),
                    shape: second,
                },
            ]
        );
    }

    #[test]
    fn test_into_history_keeps_final_stats() {
        let mut game = RecordingGame::new(abc());
        assert!(game.place_shape(0, 0));
        game.next_turn();
        let history = game.into_history();

        assert!(!history.is_empty());
        assert_eq!(history.final_stats.turn(), 1);
        assert_eq!(history.final_stats.placed_shapes(), 1);
        assert_eq!(history.seed, abc());
    }

    #[test]
    fn test_save_writes_readable_recording() {
        let dir = std::env::temp_dir().join(format!("shape-sorter-record-{}", std::process::id()));
        let mut game = RecordingGame::new(abc());
        assert!(game.place_shape(2, 1));
        let history = game.into_history();

        let path = history.save(&dir).unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("game_abc_"), "{file_name}");
        assert!(file_name.ends_with(".json"), "{file_name}");

        let session: RecordedSession = util::read_json_file("recording", &path).unwrap();
        assert_eq!(session.seed, abc());
        assert_eq!(session.moves, history.moves);
        assert_eq!(session.final_stats, history.final_stats);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_escapes_seed_in_file_name() {
        assert_eq!(file_safe("my game/../x"), "my_game____x");

        let dir = std::env::temp_dir().join(format!("shape-sorter-escape-{}", std::process::id()));
        let seed: GameSeed = "a/b c".parse().unwrap();
        let history = RecordingGame::new(seed.clone()).into_history();

        let path = history.save(&dir).unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("game_a_b_c_"), "{file_name}");

        let session: RecordedSession = util::read_json_file("recording", &path).unwrap();
        assert_eq!(session.seed, seed);
        fs::remove_dir_all(&dir).unwrap();
    }
}
