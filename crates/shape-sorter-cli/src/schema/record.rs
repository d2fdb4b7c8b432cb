use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shape_sorter_engine::{GameSeed, GameStats, Shape};

/// Recorded game with the metadata needed to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed that fixes the shape sequence
    pub seed: GameSeed,
    /// Final game statistics at the time of recording
    pub final_stats: GameStats,
    /// Successful drops in the order they were made
    pub moves: Vec<MoveRecord>,
}

/// One committed drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number the drop was made on (0-indexed)
    pub turn: usize,
    /// Anchor `(x, y)` of the shape's top-left mask cell
    pub anchor: (i32, i32),
    /// The shape that was dropped
    pub shape: Shape,
}
