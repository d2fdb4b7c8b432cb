use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A key hint: the keys that trigger an action, and the action.
pub type KeyHint = (&'static [&'static str], &'static str);

/// One-line help bar listing key hints.
#[derive(Debug)]
pub struct KeyBindingDisplay {
    hints: &'static [KeyHint],
}

impl KeyBindingDisplay {
    pub fn new(hints: &'static [KeyHint]) -> Self {
        Self { hints }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const ACTION_STYLE: Style = Style::new().fg(Color::White);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = self
            .hints
            .iter()
            .enumerate()
            .flat_map(|(i, (keys, action))| {
                let separator = (i > 0).then(|| Span::styled("  ", SEPARATOR_STYLE));
                let keys = Span::styled(keys.join("/"), KEY_STYLE);
                let action = Span::styled(format!(" {action}"), ACTION_STYLE);
                separator.into_iter().chain([keys, action])
            })
            .collect::<Vec<_>>();
        Line::from(spans).centered().render(area, buf);
    }
}
