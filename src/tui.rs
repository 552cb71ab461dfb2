//! Terminal setup, teardown and event polling

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// What the main loop should handle next
#[derive(Debug)]
pub enum TuiEvent {
    Input(Event),
    /// The tick interval elapsed
    Tick,
}

/// Owns the terminal for the lifetime of the panel
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub tick_rate: Duration,
    last_tick: Instant,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            last_tick: Instant::now(),
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Raw mode plus alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.last_tick = Instant::now();
        Ok(())
    }

    /// Restore the terminal; also runs on drop
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    /// Wait for input until the next tick is due
    ///
    /// Ticks fire on schedule even while keys are held down, so motion and
    /// message expiry keep running during continuous input.
    pub fn next_event(&mut self) -> Result<TuiEvent> {
        let elapsed = self.last_tick.elapsed();
        if elapsed >= self.tick_rate {
            self.last_tick = Instant::now();
            return Ok(TuiEvent::Tick);
        }

        if event::poll(self.tick_rate - elapsed)? {
            let event = event::read()?;
            if let Event::Key(key) = &event {
                if key.kind != KeyEventKind::Press {
                    return self.next_event();
                }
            }
            return Ok(TuiEvent::Input(event));
        }

        self.last_tick = Instant::now();
        Ok(TuiEvent::Tick)
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
