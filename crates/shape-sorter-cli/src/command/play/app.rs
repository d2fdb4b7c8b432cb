use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};
use shape_sorter_engine::{ANCHOR_LIMIT, FullLines, GameSeed, LineDescriptor};
use tracing::debug;

use crate::{
    record::{GameHistory, RecordingGame},
    tui::{App, Tui},
    view::widgets::{GameDisplay, KeyBindingDisplay, KeyHint, style},
};

const TICK_RATE: f64 = 30.0;

/// Pause between a drop and the line check.
const DROP_DELAY: Duration = Duration::from_millis(400);
/// Time full lines stay highlighted before they are cleared.
const CLEAR_DELAY: Duration = Duration::from_millis(800);

const PLAYING_HINTS: &[KeyHint] = &[
    (&["←↑↓→", "hjkl"], "Move"),
    (&["Enter", "Space"], "Drop"),
    (&["N"], "New game"),
    (&["S"], "Share"),
    (&["Q"], "Quit"),
];
const GAME_OVER_HINTS: &[KeyHint] = &[(&["N"], "New game"), (&["S"], "Share"), (&["Q"], "Quit")];

/// The turn step the app is waiting to run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
enum TurnStep {
    /// Look for full lines after a drop.
    Resolve,
    /// Clear the highlighted lines, then advance.
    Clear(FullLines),
}

#[derive(Debug)]
struct PendingStep {
    step: TurnStep,
    due: Instant,
}

/// Interactive game: cursor, drop timing and the game being played.
#[derive(Debug)]
pub struct PlayApp {
    game: RecordingGame,
    finished: Vec<GameHistory>,
    cursor: (i32, i32),
    pending: Option<PendingStep>,
    base_url: String,
    share_link: Option<String>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(seed: GameSeed, base_url: String) -> Self {
        Self {
            game: RecordingGame::new(seed),
            finished: vec![],
            cursor: (0, 0),
            pending: None,
            base_url,
            share_link: None,
            is_exiting: false,
        }
    }

    /// Consumes the app and returns the history of every game played.
    pub fn into_histories(mut self) -> Vec<GameHistory> {
        self.finish_pending();
        let mut histories = self.finished;
        histories.push(self.game.into_history());
        histories
    }

    fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    fn clearing_lines(&self) -> &[LineDescriptor] {
        match &self.pending {
            Some(PendingStep {
                step: TurnStep::Clear(lines),
                ..
            }) => lines.as_slice(),
            _ => &[],
        }
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) {
        let can_move = !self.is_waiting() && !self.game.is_game_over();
        match code {
            KeyCode::Left | KeyCode::Char('h') if can_move => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') if can_move => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') if can_move => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') if can_move => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') if can_move => self.drop_shape(now),
            KeyCode::Char('n' | 'N') => self.new_game(),
            KeyCode::Char('s' | 'S') => self.toggle_share_link(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.cursor;
        self.cursor = (
            (x + dx).clamp(0, ANCHOR_LIMIT - 1),
            (y + dy).clamp(0, ANCHOR_LIMIT - 1),
        );
    }

    fn drop_shape(&mut self, now: Instant) {
        let (x, y) = self.cursor;
        if self.game.place_shape(x, y) {
            self.pending = Some(PendingStep {
                step: TurnStep::Resolve,
                due: now + DROP_DELAY,
            });
        }
    }

    /// Runs the pending turn step once its delay has passed.
    fn advance_to(&mut self, now: Instant) {
        let Some(pending) = self.pending.take_if(|pending| now >= pending.due) else {
            return;
        };
        match pending.step {
            TurnStep::Resolve => {
                let lines = self.game.find_lines_to_clear();
                if lines.is_empty() {
                    self.game.next_turn();
                } else {
                    self.pending = Some(PendingStep {
                        step: TurnStep::Clear(lines),
                        due: now + CLEAR_DELAY,
                    });
                }
            }
            TurnStep::Clear(lines) => {
                self.game.clear_lines(&lines);
                self.game.next_turn();
            }
        }
    }

    /// Runs the pending turn steps without waiting for their delays.
    fn finish_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let lines = match pending.step {
            TurnStep::Resolve => self.game.find_lines_to_clear(),
            TurnStep::Clear(lines) => lines,
        };
        self.game.clear_lines(&lines);
        self.game.next_turn();
    }

    /// Replaces the current game with a fresh one on a new seed.
    fn new_game(&mut self) {
        self.finish_pending();
        let next = RecordingGame::new(GameSeed::generate());
        let previous = std::mem::replace(&mut self.game, next);
        debug!(seed = %previous.seed(), score = previous.score(), "game replaced");
        self.finished.push(previous.into_history());
        self.share_link = None;
        self.cursor = (0, 0);
    }

    fn toggle_share_link(&mut self) {
        self.share_link = match self.share_link {
            Some(_) => None,
            None => Some(self.game.seed().share_url(&self.base_url)),
        };
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(TICK_RATE);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code, Instant::now());
        }
    }

    fn update(&mut self, now: Instant) {
        self.advance_to(now);
    }

    fn draw(&self, frame: &mut Frame) {
        let preview = (!self.is_waiting() && !self.game.is_game_over()).then(|| {
            let (x, y) = self.cursor;
            self.game.preview(x, y)
        });
        let game = GameDisplay::new(&self.game)
            .preview(preview.as_ref())
            .clearing(self.clearing_lines());

        let hints = if self.game.is_game_over() {
            GAME_OVER_HINTS
        } else {
            PLAYING_HINTS
        };

        let [main_area, share_area, help_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(game, main_area);
        if let Some(link) = &self.share_link {
            frame.render_widget(Line::styled(link.as_str(), style::HINT).centered(), share_area);
        }
        frame.render_widget(KeyBindingDisplay::new(hints), help_area);
    }
}
