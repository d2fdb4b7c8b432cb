use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use shape_sorter_engine::{BOARD_SIZE, Shape};

use super::CellDisplay;

/// A single shape centered in a fixed-size panel.
#[derive(Debug)]
pub struct ShapeDisplay<'a> {
    shape: Option<&'a Shape>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> ShapeDisplay<'a> {
    pub fn new(shape: Option<&'a Shape>) -> Self {
        Self { shape, block: None }
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
}

impl Widget for ShapeDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(shape) = self.shape else {
            return;
        };
        let (width, height) = (shape.width() as u16, shape.height() as u16);
        let shape_area = area.centered(
            Constraint::Length(width * CellDisplay::WIDTH),
            Constraint::Length(height * CellDisplay::HEIGHT),
        );

        let horizontal =
            Layout::horizontal((0..width).map(|_| Constraint::Length(CellDisplay::WIDTH)))
                .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..height).map(|_| Constraint::Length(CellDisplay::HEIGHT)));

        let filled = CellDisplay::new(super::style::shape(shape.color()), "");
        for (dy, row) in shape_area.layout_vec(&vertical).into_iter().enumerate() {
            for (dx, cell) in row.layout_vec(&horizontal).into_iter().enumerate() {
                if shape.mask().is_occupied(dx, dy) {
                    filled.render(cell, buf);
                }
            }
        }
    }
}
