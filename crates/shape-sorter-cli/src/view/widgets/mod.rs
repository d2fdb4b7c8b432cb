use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, game_display::*, key_binding_display::*,
    shape_display::*, stats_display::*,
};

mod board_display;
mod cell_display;
mod game_display;
mod key_binding_display;
mod shape_display;
mod stats_display;

pub mod color {
    use ratatui::style::Color;
    use shape_sorter_engine::ShapeColor;

    pub const GRAY: Color = Color::Rgb(110, 110, 110);
    pub const DARK_GRAY: Color = Color::Rgb(40, 40, 40);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const VALID: Color = Color::Rgb(34, 197, 94);
    pub const INVALID: Color = Color::Rgb(220, 38, 38);

    pub const fn shape(color: ShapeColor) -> Color {
        let (r, g, b) = color.rgb();
        Color::Rgb(r, g, b)
    }
}

pub mod style {
    use ratatui::style::{Color, Style};
    use shape_sorter_engine::ShapeColor;

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const PREVIEW_VALID: Style = fg_bg(color::BLACK, color::VALID);
    pub const PREVIEW_INVALID: Style = fg_bg(color::WHITE, color::INVALID);
    pub const CLEARING: Style = fg_bg(color::BLACK, color::WHITE);
    pub const HINT: Style = Style::new().fg(color::GRAY);

    pub const fn shape(shape_color: ShapeColor) -> Style {
        bg_only(color::shape(shape_color))
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.height - inner.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    probe.width - inner.width
}
