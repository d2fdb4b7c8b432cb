use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use shape_sorter_engine::Cell;

use super::style;

/// One board cell drawn as a two-column block.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const EMPTY: Self = Self::new(style::EMPTY, "··");
    pub const BLANK: Self = Self::new(style::DEFAULT, "");
    pub const CLEARING: Self = Self::new(style::CLEARING, "<>");

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::EMPTY,
            Cell::Filled(color) => Self::new(style::shape(color), ""),
        }
    }

    pub const fn preview(valid: bool) -> Self {
        if valid {
            Self::new(style::PREVIEW_VALID, "[]")
        } else {
            Self::new(style::PREVIEW_INVALID, "><")
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not only the symbol cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
