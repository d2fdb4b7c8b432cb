//! Minimal terminal application runtime.
//!
//! [`Tui::run`] drives an [`App`] with three kinds of events: ticks at a fixed
//! rate for time-based updates, renders whenever something changed, and
//! terminal input.

use std::{io, time::Instant};

use crossterm::event::Event;
use ratatui::Frame;

use self::event_loop::{EventLoop, TuiEvent};

mod event_loop;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts; use it to set the tick rate.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles key input, resize and other terminal events.
    fn handle_event(&mut self, event: &Event);

    /// Advances time-based state to `now` (called on each tick).
    fn update(&mut self, now: Instant);

    fn draw(&self, frame: &mut Frame);
}

#[derive(Debug, Default)]
pub struct Tui {
    events: EventLoop,
}

impl Tui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate in ticks per second.
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events.set_tick_rate(rate);
    }

    /// Runs `app` until it asks to exit, restoring the terminal afterwards.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick(now) => app.update(now),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Terminal(event) => app.handle_event(&event),
                }
            }
            Ok(())
        })
    }
}
