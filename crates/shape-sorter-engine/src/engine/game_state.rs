use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    PlacementError,
    core::{
        BOARD_SIZE,
        board::{ANCHOR_LIMIT, Board, FullLines, LineDescriptor},
        shape::Shape,
    },
};

use super::{
    catalog::ShapeCatalog,
    game_stats::GameStats,
    rng::{GameSeed, SeededRng},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Cells a drop at one anchor would cover, for hover highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPreview {
    /// In-bounds `(x, y)` cells of the shape; out-of-bounds parts are omitted.
    pub cells: ArrayVec<(usize, usize), { BOARD_SIZE * BOARD_SIZE }>,
    pub valid: bool,
}

/// Result of running all four turn steps at once with [`GameState::play_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub cleared: FullLines,
    pub points: usize,
    pub game_over: bool,
}

/// The turn controller of one game.
///
/// Holds the board, the shape on offer and the one after it, and the
/// generator state that produces every later shape. A game is never reset in
/// place: a new game is a new `GameState`.
#[derive(Debug, Clone)]
pub struct GameState {
    seed: GameSeed,
    rng: SeededRng,
    catalog: &'static ShapeCatalog,
    board: Board,
    current_shape: Shape,
    next_shape: Shape,
    phase: GamePhase,
    last_shape: Option<Shape>,
    stats: GameStats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starts a game with a freshly generated seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(GameSeed::generate())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self::with_catalog(seed, &ShapeCatalog::STANDARD)
    }

    /// Starts a game that draws its shapes from `catalog`.
    ///
    /// The current and next shapes are the first two draws for the seed.
    #[must_use]
    pub fn with_catalog(seed: GameSeed, catalog: &'static ShapeCatalog) -> Self {
        let rng = seed.rng();
        let (current_shape, rng) = catalog.draw(rng);
        let (next_shape, rng) = catalog.draw(rng);
        debug!(%seed, "new game");
        Self {
            seed,
            rng,
            catalog,
            board: Board::EMPTY,
            current_shape,
            next_shape,
            phase: GamePhase::Playing,
            last_shape: None,
            stats: GameStats::new(),
        }
    }

    #[must_use]
    pub fn seed(&self) -> &GameSeed {
        &self.seed
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_shape(&self) -> &Shape {
        &self.current_shape
    }

    #[must_use]
    pub fn next_shape(&self) -> &Shape {
        &self.next_shape
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// The shape that could not be placed, set only once the game is over.
    #[must_use]
    pub fn last_shape(&self) -> Option<&Shape> {
        self.last_shape.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Every anchor in `[0, 6)²` that admits the current shape, row by row.
    pub fn valid_anchors(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..ANCHOR_LIMIT)
            .flat_map(|y| (0..ANCHOR_LIMIT).map(move |x| (x, y)))
            .filter(|&(x, y)| self.board.can_place(&self.current_shape, x, y))
    }

    #[must_use]
    pub fn preview(&self, x: i32, y: i32) -> PlacementPreview {
        PlacementPreview {
            cells: Board::mapped_positions(&self.current_shape, x, y)
                .flatten()
                .collect(),
            valid: !self.is_game_over() && self.board.can_place(&self.current_shape, x, y),
        }
    }

    /// Commits the current shape with its top-left mask cell at `(x, y)`.
    ///
    /// Only the drop is committed; lines are not cleared and the turn does not
    /// advance. On error nothing changes.
    pub fn try_place_shape(&mut self, x: i32, y: i32) -> Result<(), PlacementError> {
        if self.is_game_over() {
            return Err(PlacementError::GameOver);
        }
        self.board.commit(&self.current_shape, x, y)?;
        let cells = self.current_shape.cell_count();
        self.stats.complete_placement(cells);
        debug!(x, y, cells, "shape placed");
        Ok(())
    }

    /// Boolean form of [`GameState::try_place_shape`].
    pub fn place_shape(&mut self, x: i32, y: i32) -> bool {
        self.try_place_shape(x, y).is_ok()
    }

    #[must_use]
    pub fn find_lines_to_clear(&self) -> FullLines {
        self.board.find_full_lines()
    }

    /// Empties the given lines and returns the points awarded for them.
    ///
    /// Every distinct row and column counts as one line. Lines that are not
    /// completely filled are ignored. Does nothing once the game is over.
    pub fn clear_lines(&mut self, lines: &[LineDescriptor]) -> usize {
        if self.is_game_over() {
            return 0;
        }
        let mut distinct = FullLines::new();
        for line in lines.iter().filter(|line| self.board.is_line_full(**line)) {
            if !distinct.contains(line) {
                distinct.push(*line);
            }
        }
        if distinct.is_empty() {
            return 0;
        }
        self.board.clear(&distinct);
        let points = self.stats.complete_clear(distinct.len());
        debug!(lines = distinct.len(), points, "lines cleared");
        points
    }

    /// Promotes the next shape, draws a new one and checks for game over.
    ///
    /// Exactly one catalog draw happens per call regardless of the board, so
    /// the shape sequence depends on the seed alone. Does nothing once the game
    /// is over.
    pub fn next_turn(&mut self) {
        if self.is_game_over() {
            return;
        }
        let (drawn, rng) = self.catalog.draw(self.rng.clone());
        self.rng = rng;
        self.current_shape = std::mem::replace(&mut self.next_shape, drawn);
        self.stats.complete_turn();
        debug!(turn = self.stats.turn(), "turn advanced");

        if self.valid_anchors().next().is_none() {
            self.phase = GamePhase::GameOver;
            self.last_shape = Some(self.current_shape);
            info!(
                seed = %self.seed,
                score = self.stats.score(),
                turn = self.stats.turn(),
                "game over"
            );
        }
    }

    /// Runs place, find, clear and advance back to back.
    pub fn play_turn(&mut self, x: i32, y: i32) -> Result<TurnOutcome, PlacementError> {
        self.try_place_shape(x, y)?;
        let cleared = self.find_lines_to_clear();
        let points = self.clear_lines(&cleared);
        self.next_turn();
        Ok(TurnOutcome {
            cleared,
            points,
            game_over: self.is_game_over(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{board::Cell, shape::ShapeColor},
        engine::catalog::ShapeTemplate,
    };

    const MONOMINO_TEMPLATES: [ShapeTemplate; 1] =
        [ShapeTemplate::new("monomino", &["#"], 1, &[ShapeColor::Yellow])];
    const MONOMINOES: ShapeCatalog = ShapeCatalog::new(&MONOMINO_TEMPLATES);

    const SQUARE_TEMPLATES: [ShapeTemplate; 1] = [ShapeTemplate::new(
        "square-3",
        &["###", "###", "###"],
        1,
        &[ShapeColor::Purple],
    )];
    const SQUARES: ShapeCatalog = ShapeCatalog::new(&SQUARE_TEMPLATES);

    fn seed(s: &str) -> GameSeed {
        s.parse().unwrap()
    }

    fn shape(rows: &[&str], color: ShapeColor) -> Shape {
        Shape::new(crate::ShapeMask::try_from_rows(rows).unwrap(), color)
    }

    #[test]
    fn test_seed_abc_fixture() {
        let state = GameState::with_seed(seed("abc"));
        assert_eq!(
            *state.current_shape(),
            shape(&[".#", "##", ".#"], ShapeColor::Pink)
        );
        assert_eq!(*state.next_shape(), shape(&["####"], ShapeColor::Blue));
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.last_shape(), None);
        assert_eq!(state.score(), 0);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_seed_abc_scenario_without_line_clears() {
        let mut state = GameState::with_seed(seed("abc"));

        assert_eq!(state.valid_anchors().next(), Some((0, 0)));
        assert!(state.place_shape(0, 0));
        assert!(state.find_lines_to_clear().is_empty());
        state.next_turn();
        assert_eq!(*state.current_shape(), shape(&["####"], ShapeColor::Blue));

        assert!(state.place_shape(0, 3));
        assert!(state.find_lines_to_clear().is_empty());
        state.next_turn();
        assert_eq!(
            *state.current_shape(),
            shape(&["###", "#.."], ShapeColor::Orange)
        );

        assert!(state.place_shape(0, 4));
        assert!(state.find_lines_to_clear().is_empty());
        state.next_turn();
        assert_eq!(
            *state.current_shape(),
            shape(&["###", "###", "###"], ShapeColor::Purple)
        );

        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.stats().turn(), 3);
        assert_eq!(state.stats().placed_shapes(), 3);
        assert_eq!(state.stats().placed_cells(), 12);
        assert_eq!(state.board().filled_count(), 12);
    }

    #[test]
    fn test_shape_sequence_independent_of_moves() {
        let mut idle = GameState::with_seed(seed("determinism"));
        let mut idle_pairs = vec![(*idle.current_shape(), *idle.next_shape())];
        for _ in 0..30 {
            idle.next_turn();
            idle_pairs.push((*idle.current_shape(), *idle.next_shape()));
        }
        assert!(!idle.is_game_over());

        let mut active = GameState::with_seed(seed("determinism"));
        let mut active_pairs = vec![(*active.current_shape(), *active.next_shape())];
        while !active.is_game_over() && active_pairs.len() < idle_pairs.len() {
            let (x, y) = active.valid_anchors().next().unwrap();
            active.play_turn(x, y).unwrap();
            active_pairs.push((*active.current_shape(), *active.next_shape()));
        }

        assert!(active_pairs.len() > 1);
        assert_eq!(active_pairs[..], idle_pairs[..active_pairs.len()]);
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut state = GameState::with_seed(seed("abc"));
        assert!(state.place_shape(0, 0));
        let board = state.board().clone();
        let stats = state.stats().clone();

        // t-left at (0, 0) again overlaps; negative and far anchors leave the board.
        for (x, y) in [(0, 0), (-1, 0), (0, -1), (5, 0), (0, 4), (i32::MIN, i32::MAX)] {
            assert!(!state.place_shape(x, y), "({x}, {y})");
            assert_eq!(*state.board(), board);
        }
        assert_eq!(
            state.try_place_shape(0, 0),
            Err(PlacementError::Overlap)
        );
        assert_eq!(
            state.try_place_shape(5, 0),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(*state.stats(), stats);
        assert_eq!(
            *state.current_shape(),
            shape(&[".#", "##", ".#"], ShapeColor::Pink)
        );
    }

    #[test]
    fn test_placement_fills_exactly_shape_cells() {
        let mut state = GameState::with_seed(seed("abc"));
        assert!(state.place_shape(3, 2));

        let expected = [(4, 2), (3, 3), (4, 3), (4, 4)];
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let cell = state.board().get(x, y).unwrap();
                if expected.contains(&(x, y)) {
                    assert_eq!(cell, Cell::Filled(ShapeColor::Pink), "({x}, {y})");
                } else {
                    assert_eq!(cell, Cell::Empty, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_clear_single_row_scores_line_points() {
        let mut state = GameState::with_catalog(seed("rows"), &MONOMINOES);
        for x in 1..BOARD_SIZE {
            state.board.fill_cell(x, 2, ShapeColor::Red);
        }
        assert!(state.place_shape(0, 2));

        let lines = state.find_lines_to_clear();
        assert_eq!(lines.as_slice(), &[LineDescriptor::row(2)]);
        assert_eq!(state.clear_lines(&lines), 100);

        assert_eq!(state.score(), 100);
        assert!(state.board().is_empty());
        assert_eq!(state.stats().total_cleared_lines(), 1);
    }

    #[test]
    fn test_clear_crossing_lines_counts_both() {
        let mut state = GameState::with_catalog(seed("cross"), &MONOMINOES);
        for i in 1..BOARD_SIZE {
            state.board.fill_cell(i, 0, ShapeColor::Red);
            state.board.fill_cell(0, i, ShapeColor::Blue);
        }
        let outcome = state.play_turn(0, 0).unwrap();

        assert_eq!(
            outcome.cleared.as_slice(),
            &[LineDescriptor::row(0), LineDescriptor::column(0)]
        );
        assert_eq!(outcome.points, 250);
        assert!(!outcome.game_over);
        assert_eq!(state.score(), 250);
        assert!(state.board().is_empty());
        assert_eq!(state.stats().best_clear(), 2);
    }

    #[test]
    fn test_clear_lines_counts_duplicates_once() {
        let mut state = GameState::with_catalog(seed("dup"), &MONOMINOES);
        for x in 0..BOARD_SIZE {
            state.board.fill_cell(x, 5, ShapeColor::Red);
        }
        let row = LineDescriptor::row(5);
        assert_eq!(state.clear_lines(&[row, row]), 100);
        assert_eq!(state.clear_lines(&[]), 0);
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_clear_lines_ignores_partial_lines() {
        let mut state = GameState::with_seed(seed("abc"));
        assert!(state.place_shape(0, 0));
        let board = state.board().clone();

        let partial = [LineDescriptor::row(0), LineDescriptor::column(1)];
        assert_eq!(state.clear_lines(&partial), 0);
        assert_eq!(state.clear_lines(&[LineDescriptor::row(BOARD_SIZE)]), 0);

        assert_eq!(*state.board(), board);
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.score(), 0);
        assert_eq!(state.stats().total_cleared_lines(), 0);
    }

    #[test]
    fn test_find_lines_to_clear_is_idempotent() {
        let mut state = GameState::with_catalog(seed("idem"), &MONOMINOES);
        for y in 0..BOARD_SIZE {
            state.board.fill_cell(4, y, ShapeColor::Green);
        }
        let board = state.board().clone();
        let first = state.find_lines_to_clear();
        let second = state.find_lines_to_clear();
        assert_eq!(first, second);
        assert_eq!(first.as_slice(), &[LineDescriptor::column(4)]);
        assert_eq!(*state.board(), board);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_terminal_check_scans_every_anchor() {
        let mut state = GameState::with_catalog(seed("squares"), &SQUARES);
        for i in 0..BOARD_SIZE {
            state.board.fill_cell(2, i, ShapeColor::Red);
            state.board.fill_cell(i, 2, ShapeColor::Red);
        }

        // Only the bottom-right 3×3 block is still open.
        state.next_turn();
        assert!(!state.is_game_over());
        assert_eq!(state.valid_anchors().collect::<Vec<_>>(), vec![(3, 3)]);

        state.board.fill_cell(5, 5, ShapeColor::Red);
        state.next_turn();
        assert!(state.is_game_over());
        assert_eq!(state.last_shape(), Some(state.current_shape()));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = GameState::with_seed(seed("abc"));
        for y in 0..BOARD_SIZE {
            for x in (y % 2..BOARD_SIZE).step_by(2) {
                state.board.fill_cell(x, y, ShapeColor::Red);
            }
        }
        state.next_turn();

        let undroppable = shape(&["####"], ShapeColor::Blue);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.last_shape(), Some(&undroppable));

        let board = state.board().clone();
        let stats = state.stats().clone();
        let next = *state.next_shape();
        for y in -1..=ANCHOR_LIMIT {
            for x in -1..=ANCHOR_LIMIT {
                assert!(!state.place_shape(x, y));
            }
        }
        assert_eq!(
            state.try_place_shape(0, 0),
            Err(PlacementError::GameOver)
        );
        assert_eq!(state.play_turn(1, 0), Err(PlacementError::GameOver));
        assert_eq!(state.clear_lines(&[LineDescriptor::row(0)]), 0);
        state.next_turn();

        assert_eq!(*state.board(), board);
        assert_eq!(*state.stats(), stats);
        assert_eq!(*state.current_shape(), undroppable);
        assert_eq!(*state.next_shape(), next);
        assert!(!state.preview(1, 0).valid);
    }

    #[test]
    fn test_preview_reports_in_bounds_cells() {
        let state = GameState::with_seed(seed("abc"));

        let inside = state.preview(0, 0);
        assert!(inside.valid);
        assert_eq!(inside.cells.as_slice(), &[(1, 0), (0, 1), (1, 1), (1, 2)]);

        // t-left hanging off the right edge keeps only its left column.
        let edge = state.preview(5, 0);
        assert!(!edge.valid);
        assert_eq!(edge.cells.as_slice(), &[(5, 1)]);
    }

    #[test]
    fn test_new_game_uses_generated_seed() {
        let state = GameState::new();
        assert_eq!(state.seed().as_str().len(), GameSeed::GENERATED_LEN);

        let replay = GameState::with_seed(state.seed().clone());
        assert_eq!(replay.current_shape(), state.current_shape());
        assert_eq!(replay.next_shape(), state.next_shape());
    }
}
