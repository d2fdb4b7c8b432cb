use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    /// Tick interval elapsed at the given instant.
    Tick(Instant),
    /// State changed since the last render.
    Render,
    /// Key input, mouse, resize and other terminal events.
    Terminal(Event),
}

/// Produces the next [`TuiEvent`], blocking until one is due.
///
/// Ticks take priority over renders, renders over terminal input. Without a
/// tick rate only input and the renders it triggers are produced.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            // first frame
            dirty: true,
        }
    }
}

impl EventLoop {
    pub(super) fn set_tick_rate(&mut self, rate: f64) {
        self.tick_interval = (rate > 0.0).then(|| Duration::from_secs_f64(1.0 / rate));
    }

    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick(now));
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(interval) = self.tick_interval {
                let timeout = (self.last_tick + interval).saturating_duration_since(now);
                if !event::poll(timeout)? {
                    continue;
                }
            }

            self.dirty = true;
            return Ok(TuiEvent::Terminal(event::read()?));
        }
    }
}
