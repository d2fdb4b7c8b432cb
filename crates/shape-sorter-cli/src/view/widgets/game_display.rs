use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use shape_sorter_engine::{GamePhase, GameState, LineDescriptor, PlacementPreview};

use super::{BoardDisplay, ShapeDisplay, StatsDisplay, color, style};

/// Full game screen: stats, board, current and next shape, game-over popup.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
    preview: Option<&'a PlacementPreview>,
    clearing: &'a [LineDescriptor],
}

impl<'a> GameDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            preview: None,
            clearing: &[],
        }
    }

    pub fn preview(self, preview: Option<&'a PlacementPreview>) -> Self {
        Self { preview, ..self }
    }

    pub fn clearing(self, lines: &'a [LineDescriptor]) -> Self {
        Self {
            clearing: lines,
            ..self
        }
    }

    fn panel(title: &str, border: Color) -> Block<'_> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(border)
            .style(style::DEFAULT)
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = match self.state.phase() {
            GamePhase::Playing => color::WHITE,
            GamePhase::GameOver => color::INVALID,
        };

        let board = {
            let widget = BoardDisplay::new(self.state.board())
                .clearing(self.clearing)
                .block(Block::bordered().border_style(border).style(style::DEFAULT));
            match self.preview {
                Some(preview) => widget.preview(preview),
                None => widget,
            }
        };
        let current = ShapeDisplay::new(Some(self.state.current_shape()))
            .block(Self::panel("NOW", border));
        let next =
            ShapeDisplay::new(Some(self.state.next_shape())).block(Self::panel("NEXT", border));
        let stats = StatsDisplay::new(self.state).block(Self::panel("STATS", border));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(current.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [current_area, next_area] = Layout::vertical([
            Constraint::Length(current.height()),
            Constraint::Length(next.height()),
        ])
        .areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        current.render(current_area, buf);
        next.render(next_area, buf);

        if self.state.is_game_over() {
            let popup_style = Style::new().fg(color::WHITE).bg(color::INVALID);
            let popup = Block::new().style(popup_style);
            let text = Text::styled("GAME OVER", popup_style).centered();
            let popup_area =
                board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = popup.inner(popup_area);
            Clear.render(popup_area, buf);
            popup.render(popup_area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);

            // The undroppable shape replaces the current one.
            Clear.render(current_area, buf);
            ShapeDisplay::new(self.state.last_shape())
                .block(Self::panel("NO ROOM", border))
                .render(current_area, buf);
        }
    }
}
