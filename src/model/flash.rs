//! Self-expiring message used for validation feedback
//!
//! Nothing blocks on the message: it is shown until its deadline passes and
//! then disappears on the next tick. Setting a new message replaces the old
//! one and restarts the deadline.

use std::time::{Duration, Instant};

/// Default lifetime of a validation error on screen
pub const DEFAULT_FLASH_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct FlashMessage {
    message: Option<(String, Instant)>,
    duration: Duration,
}

impl Default for FlashMessage {
    fn default() -> Self {
        Self::new(DEFAULT_FLASH_DURATION)
    }
}

impl FlashMessage {
    pub fn new(duration: Duration) -> Self {
        Self {
            message: None,
            duration,
        }
    }

    /// Show `text` from `now` until `now + duration`
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some((text.into(), now + self.duration));
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Drop the message if its deadline has passed; returns true when it was dropped
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.message {
            Some((_, deadline)) if now >= deadline => {
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// The message visible at `now`
    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        match &self.message {
            Some((text, deadline)) if now < *deadline => Some(text.as_str()),
            _ => None,
        }
    }
}
