use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::PlacementError;

use super::{
    BOARD_SIZE,
    shape::{Shape, ShapeColor},
};

/// Exclusive upper bound of anchor coordinates that can land on the board.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const ANCHOR_LIMIT: i32 = BOARD_SIZE as i32;

/// A single cell of the board.
///
/// A cell carries a color exactly when it is filled, so the
/// "filled iff occupied by a committed shape" invariant is held by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Filled(ShapeColor),
}

impl Cell {
    #[must_use]
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    #[must_use]
    pub fn color(self) -> Option<ShapeColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// Orientation of a cleared line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineAxis {
    Row,
    Column,
}

/// One fully filled row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LineDescriptor {
    pub axis: LineAxis,
    pub index: usize,
}

impl LineDescriptor {
    #[must_use]
    pub const fn row(index: usize) -> Self {
        Self {
            axis: LineAxis::Row,
            index,
        }
    }

    #[must_use]
    pub const fn column(index: usize) -> Self {
        Self {
            axis: LineAxis::Column,
            index,
        }
    }

    /// Returns the `(x, y)` positions of the cells on this line.
    pub fn positions(self) -> impl Iterator<Item = (usize, usize)> {
        (0..BOARD_SIZE).map(move |i| match self.axis {
            LineAxis::Row => (i, self.index),
            LineAxis::Column => (self.index, i),
        })
    }
}

/// Full lines found by a single scan: at most every row and every column.
pub type FullLines = ArrayVec<LineDescriptor, { 2 * BOARD_SIZE }>;

/// The 6×6 playing grid.
///
/// Rows are indexed by `y` (top to bottom) and columns by `x` (left to right).
/// Cells are only changed by [`Board::commit`] and [`Board::clear`].
///
/// # Example
///
/// ```
/// use shape_sorter_engine::{Board, Shape, ShapeColor, ShapeMask};
///
/// let domino = Shape::new(ShapeMask::from_rows(&["##"]), ShapeColor::Red);
/// let mut board = Board::EMPTY;
///
/// assert!(board.can_place(&domino, 4, 0));
/// assert!(!board.can_place(&domino, 5, 0));
/// board.commit(&domino, 4, 0).unwrap();
/// assert!(!board.can_place(&domino, 3, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Maps an anchor coordinate plus a mask offset to a board index, if in range.
fn board_index(anchor: i32, offset: usize) -> Option<usize> {
    let offset = i32::try_from(offset).ok()?;
    let pos = usize::try_from(anchor.checked_add(offset)?).ok()?;
    (pos < BOARD_SIZE).then_some(pos)
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;

    pub const EMPTY: Self = Self {
        cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Returns the cell at column `x`, row `y`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Returns the board cells a shape anchored at `(x, y)` would occupy.
    ///
    /// Offsets that fall outside the board are reported as `None`.
    pub fn mapped_positions(
        shape: &Shape,
        x: i32,
        y: i32,
    ) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        shape
            .occupied_positions()
            .map(move |(dx, dy)| Some((board_index(x, dx)?, board_index(y, dy)?)))
    }

    /// Checks whether `shape` can be dropped with its top-left mask cell at `(x, y)`.
    ///
    /// Anchors may be negative or past the edge; such drops fail with
    /// [`PlacementError::OutOfBounds`] instead of panicking.
    pub fn check_placement(&self, shape: &Shape, x: i32, y: i32) -> Result<(), PlacementError> {
        let mut overlap = false;
        for pos in Self::mapped_positions(shape, x, y) {
            let Some((cx, cy)) = pos else {
                return Err(PlacementError::OutOfBounds);
            };
            overlap |= self.cells[cy][cx].is_filled();
        }
        if overlap {
            return Err(PlacementError::Overlap);
        }
        Ok(())
    }

    #[must_use]
    pub fn can_place(&self, shape: &Shape, x: i32, y: i32) -> bool {
        self.check_placement(shape, x, y).is_ok()
    }

    /// Fills every cell covered by `shape` anchored at `(x, y)` with its color.
    ///
    /// The whole placement is validated first; on error the board is unchanged.
    pub fn commit(&mut self, shape: &Shape, x: i32, y: i32) -> Result<(), PlacementError> {
        self.check_placement(shape, x, y)?;
        for (cx, cy) in Self::mapped_positions(shape, x, y).flatten() {
            self.cells[cy][cx] = Cell::Filled(shape.color());
        }
        Ok(())
    }

    /// Whether every cell of `line` is filled; out-of-range lines never are.
    #[must_use]
    pub fn is_line_full(&self, line: LineDescriptor) -> bool {
        line.index < BOARD_SIZE && line.positions().all(|(x, y)| self.cells[y][x].is_filled())
    }

    /// Scans all rows, then all columns, and returns those that are completely filled.
    #[must_use]
    pub fn find_full_lines(&self) -> FullLines {
        let rows = (0..BOARD_SIZE).map(LineDescriptor::row);
        let columns = (0..BOARD_SIZE).map(LineDescriptor::column);
        rows.chain(columns)
            .filter(|line| self.is_line_full(*line))
            .collect()
    }

    /// Empties every cell on any of the given lines.
    ///
    /// Cells shared by a row and a column are simply emptied once; lines with
    /// an out-of-range index are ignored.
    pub fn clear(&mut self, lines: &[LineDescriptor]) {
        for line in lines.iter().filter(|line| line.index < BOARD_SIZE) {
            for (x, y) in line.positions() {
                self.cells[y][x] = Cell::Empty;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn fill_cell(&mut self, x: usize, y: usize, color: ShapeColor) {
        self.cells[y][x] = Cell::Filled(color);
    }
}
