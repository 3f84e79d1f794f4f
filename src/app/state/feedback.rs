use crate::player::PlaybackMode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Controls that flash while their command is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PlayPause,
    Next,
    Previous,
    Mode(PlaybackMode),
    Enqueue,
    Delete,
    Clear,
    Reload,
}

/// Transient highlights. Each expires on its own deadline whether or not the
/// command ever completes.
#[derive(Debug, Clone, Default)]
pub struct FeedbackState {
    lit: HashMap<Control, Instant>,
}

impl FeedbackState {
    pub fn flash(&mut self, control: Control, now: Instant, hold: Duration) {
        self.lit.insert(control, now + hold);
    }

    pub fn is_lit(&self, control: Control) -> bool {
        self.lit.contains_key(&control)
    }

    /// Drop expired highlights; returns true if anything changed.
    pub fn clear_expired(&mut self, now: Instant) -> bool {
        let before = self.lit.len();
        self.lit.retain(|_, deadline| *deadline > now);
        self.lit.len() != before
    }
}
