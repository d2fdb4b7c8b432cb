use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use shape_sorter_engine::{BOARD_SIZE, Board, LineDescriptor, PlacementPreview};

use super::CellDisplay;

/// The 6×6 grid with an optional drop preview and lines about to clear.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    preview: Option<&'a PlacementPreview>,
    clearing: &'a [LineDescriptor],
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            preview: None,
            clearing: &[],
            block: None,
        }
    }

    pub fn preview(self, preview: &'a PlacementPreview) -> Self {
        Self {
            preview: Some(preview),
            ..self
        }
    }

    pub fn clearing(self, lines: &'a [LineDescriptor]) -> Self {
        Self {
            clearing: lines,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_SIZE as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_SIZE as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    fn cell_at(&self, x: usize, y: usize) -> CellDisplay {
        if self
            .clearing
            .iter()
            .any(|line| line.positions().any(|pos| pos == (x, y)))
        {
            return CellDisplay::CLEARING;
        }
        if let Some(preview) = self.preview
            && preview.cells.contains(&(x, y))
        {
            return CellDisplay::preview(preview.valid);
        }
        self.board
            .get(x, y)
            .map_or(CellDisplay::BLANK, CellDisplay::from_cell)
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal = Layout::horizontal([Constraint::Length(CellDisplay::WIDTH); BOARD_SIZE])
            .flex(Flex::Center);
        let vertical = Layout::vertical([Constraint::Length(CellDisplay::HEIGHT); BOARD_SIZE]);

        let grid = area
            .layout::<BOARD_SIZE>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_SIZE>(&horizontal));

        for (y, grid_row) in grid.enumerate() {
            for (x, grid_cell) in iter::zip(0.., grid_row) {
                self.cell_at(x, y).render(grid_cell, buf);
            }
        }
    }
}
