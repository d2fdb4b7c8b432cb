use serde::{Deserialize, Serialize};

/// Points awarded for every cleared line.
pub const LINE_POINTS: usize = 100;

/// Extra points for every line beyond the first in a single clear.
pub const MULTI_LINE_BONUS: usize = 50;

/// Points for clearing `lines` lines at once.
///
/// Each row and each column counts as its own line. The result is additive
/// per line plus a bonus that grows with the batch size:
///
/// | lines | points |
/// |-------|--------|
/// | 0     | 0      |
/// | 1     | 100    |
/// | 2     | 250    |
/// | 3     | 400    |
/// | n     | 100·n + 50·(n−1) |
#[must_use]
pub const fn line_clear_points(lines: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    LINE_POINTS * lines + MULTI_LINE_BONUS * (lines - 1)
}

/// Game statistics tracking score, turns, placements and cleared lines.
///
/// # Example
///
/// ```
/// use shape_sorter_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(4);
/// stats.complete_clear(2); // one row and one column
///
/// assert_eq!(stats.score(), 250);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.best_clear(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    turn: usize,
    placed_shapes: usize,
    placed_cells: usize,
    total_cleared_lines: usize,
    best_clear: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            turn: 0,
            placed_shapes: 0,
            placed_cells: 0,
            total_cleared_lines: 0,
            best_clear: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Number of completed `next_turn` advances (0 on the first turn).
    #[must_use]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub const fn placed_shapes(&self) -> usize {
        self.placed_shapes
    }

    #[must_use]
    pub const fn placed_cells(&self) -> usize {
        self.placed_cells
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Largest number of lines cleared by a single clear.
    #[must_use]
    pub const fn best_clear(&self) -> usize {
        self.best_clear
    }

    pub const fn complete_placement(&mut self, cells: usize) {
        self.placed_shapes += 1;
        self.placed_cells += cells;
    }

    /// Records a clear of `lines` lines and returns the points it earned.
    pub const fn complete_clear(&mut self, lines: usize) -> usize {
        let points = line_clear_points(lines);
        self.score += points;
        self.total_cleared_lines += lines;
        if lines > self.best_clear {
            self.best_clear = lines;
        }
        points
    }

    pub const fn complete_turn(&mut self) {
        self.turn += 1;
    }
}
