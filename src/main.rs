//! labpanel - a terminal control panel for lab instrument axes
//!
//! This is the main entry point. It uses the Component Architecture pattern
//! from ratatui: input becomes Actions, the App applies them, then redraws.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod services;
mod store;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::{Tui, TuiEvent};
use anyhow::Result;
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

fn main() -> Result<()> {
    let (config, config_error) = Config::load_or_init();

    // The terminal belongs to the UI, so logs go to a file
    init_logging(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{:#}", e), "config not loaded, using defaults");
        eprintln!("Warning: config not loaded, using defaults: {:#}", e);
    }
    tracing::info!(panel = ?config.panel_path, "labpanel starting");

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    let mut app = App::new(&config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "labpanel exited with an error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let Some(path) = Config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Warning: could not create log directory {}: {}", dir.display(), e);
            return;
        }
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(config.level())
            .init(),
        Err(e) => eprintln!("Warning: could not open log file {}: {}", path.display(), e),
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            TuiEvent::Input(Event::Key(key)) => app.handle_key_event(key)?,
            TuiEvent::Input(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            TuiEvent::Input(_) => None,
            TuiEvent::Tick => Some(Action::Tick),
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            if a != Action::Tick {
                tracing::trace!(action = %a, "applying action");
            }
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
