//! Seek control state machine.
//!
//! `Idle` shows whatever the poller reports. The first drag input moves to
//! `Dragging`, where the bar and time labels freeze and only a projected time
//! is shown. Release moves to `Committing` and yields exactly one seek
//! request. Once the seek command finishes a settle timer is armed; when it
//! fires for the same gesture the controller is `Idle` again.

use super::playback::{format_time, progress_percent};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekPhase {
    #[default]
    Idle,
    Dragging,
    Committing,
}

/// The single drag flag read by the poll-update path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub last_known_total_seconds: f64,
}

/// Issued once per released gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRequest {
    pub fraction: f64,
    pub gesture: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SeekController {
    phase: SeekPhase,
    drag: DragState,
    gesture: u64,
    /// Fraction of the most recent drag input.
    drag_fraction: f64,
    /// Set once the seek command for the current gesture has finished.
    settle_armed: bool,

    // Authoritative display, only written while idle
    bar_percent: f64,
    elapsed_label: String,
    total_label: String,
    projected_label: Option<String>,

    keyboard_deadline: Option<Instant>,
    /// Target of the last commit, the seek base until a poll lands after it.
    committed_fraction: Option<f64>,
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

impl SeekController {
    pub fn new() -> Self {
        Self {
            elapsed_label: format_time(0.0),
            total_label: format_time(0.0),
            ..Default::default()
        }
    }

    pub fn phase(&self) -> SeekPhase {
        self.phase
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn gesture(&self) -> u64 {
        self.gesture
    }

    pub fn bar_percent(&self) -> f64 {
        self.bar_percent
    }

    /// Left time label: the projected time while a gesture is active.
    pub fn elapsed_label(&self) -> &str {
        self.projected_label.as_deref().unwrap_or(&self.elapsed_label)
    }

    pub fn total_label(&self) -> &str {
        &self.total_label
    }

    /// Fraction for the ghost marker while dragging.
    pub fn drag_preview(&self) -> Option<f64> {
        (self.phase == SeekPhase::Dragging).then_some(self.drag_fraction)
    }

    /// Pointer drag input. Takes over any pending keyboard commit so the
    /// gesture only ends on release.
    pub fn on_drag_input(&mut self, fraction: f64) {
        self.keyboard_deadline = None;
        self.drag_to(fraction);
    }

    fn drag_to(&mut self, fraction: f64) {
        let fraction = clamp_fraction(fraction);
        if self.phase != SeekPhase::Dragging {
            self.gesture += 1;
            self.phase = SeekPhase::Dragging;
            self.settle_armed = false;
            self.drag.is_dragging = true;
        }
        self.drag_fraction = fraction;
        let projected = fraction * self.drag.last_known_total_seconds;
        self.projected_label = Some(format_time(projected));
    }

    /// Release. Returns the seek to issue, or `None` if no gesture is active.
    pub fn on_drag_commit(&mut self, fraction: f64) -> Option<SeekRequest> {
        if self.phase != SeekPhase::Dragging {
            return None;
        }
        let fraction = clamp_fraction(fraction);
        self.phase = SeekPhase::Committing;
        self.keyboard_deadline = None;
        self.drag_fraction = fraction;
        self.committed_fraction = Some(fraction);
        self.projected_label = Some(format_time(fraction * self.drag.last_known_total_seconds));
        Some(SeekRequest {
            fraction,
            gesture: self.gesture,
        })
    }

    /// The seek command for `gesture` finished. Returns true when the caller
    /// should arm the settle timer.
    pub fn on_seek_finished(&mut self, gesture: u64) -> bool {
        if gesture != self.gesture || self.phase != SeekPhase::Committing {
            return false;
        }
        self.settle_armed = true;
        true
    }

    /// Settle timer fired. A timer from an older gesture is ignored.
    pub fn on_settled(&mut self, gesture: u64) -> bool {
        if gesture != self.gesture || self.phase != SeekPhase::Committing || !self.settle_armed {
            return false;
        }
        self.phase = SeekPhase::Idle;
        self.settle_armed = false;
        self.drag.is_dragging = false;
        // Optimistic label stays until the next poll replaces it
        true
    }

    /// Poll result. Applied only while idle; returns whether it was applied.
    pub fn on_remote_position_update(&mut self, elapsed: f64, total: f64) -> bool {
        if self.phase != SeekPhase::Idle {
            return false;
        }
        let total = if total.is_finite() && total > 0.0 { total } else { 0.0 };
        self.drag.last_known_total_seconds = total;
        self.bar_percent = progress_percent(elapsed, total);
        self.elapsed_label = format_time(elapsed);
        self.total_label = format_time(total);
        self.projected_label = None;
        self.committed_fraction = None;
        true
    }

    /// Keyboard seek: a drag input `delta` seconds from the projected time.
    /// The gesture commits via [`Self::poll_keyboard_commit`] once keys stop.
    pub fn nudge(&mut self, delta_seconds: f64, now: Instant, commit_delay: Duration) {
        let total = self.drag.last_known_total_seconds;
        if total <= 0.0 {
            return;
        }
        let base = match (self.phase, self.committed_fraction) {
            (SeekPhase::Dragging, _) => self.drag_fraction * total,
            (_, Some(committed)) => committed * total,
            _ => self.bar_percent / 100.0 * total,
        };
        self.drag_to((base + delta_seconds) / total);
        self.keyboard_deadline = Some(now + commit_delay);
    }

    pub fn poll_keyboard_commit(&mut self, now: Instant) -> Option<SeekRequest> {
        match self.keyboard_deadline {
            Some(deadline) if now >= deadline => {
                self.keyboard_deadline = None;
                let fraction = self.drag_fraction;
                self.on_drag_commit(fraction)
            }
            _ => None,
        }
    }
}
