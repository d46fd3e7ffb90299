//! Long-press recognition that turns a press on a row into a drag.

use std::time::Instant;

use crate::config::ReorderConfig;
use crate::position::Position;
use crate::session::Grab;

/// A press waiting for the hold duration to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Armed {
    pub row: Position,
    pub grab: Grab,
    pub x: u16,
    pub y: u16,
    pub at: Instant,
}

/// Outcome of feeding the recogniser an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recognized {
    /// Nothing armed, or still waiting.
    Pending,
    /// The hold elapsed. The row should lift.
    Lift(Armed),
    /// The pointer strayed too far before the hold elapsed.
    Failed,
}

#[derive(Debug, Default)]
pub(crate) struct LongPress {
    armed: Option<Armed>,
}

impl LongPress {
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn reset(&mut self) {
        self.armed = None;
    }

    /// Start tracking a press on `row`. Lifts straight away when the
    /// configured hold is zero.
    pub fn press(&mut self, armed: Armed, config: &ReorderConfig) -> Recognized {
        if config.long_press.is_zero() {
            self.armed = None;
            return Recognized::Lift(armed);
        }
        self.armed = Some(armed);
        Recognized::Pending
    }

    /// Pointer moved with the button held.
    pub fn moved(&mut self, x: u16, y: u16, at: Instant, config: &ReorderConfig) -> Recognized {
        let Some(armed) = self.armed else {
            return Recognized::Pending;
        };
        let held = at.saturating_duration_since(armed.at) >= config.long_press;
        let strayed = armed.x.abs_diff(x) > config.press_tolerance
            || armed.y.abs_diff(y) > config.press_tolerance;

        if held {
            self.armed = None;
            Recognized::Lift(armed)
        } else if strayed {
            log::trace!("[reorder] press on {} moved before hold elapsed", armed.row);
            self.armed = None;
            Recognized::Failed
        } else {
            Recognized::Pending
        }
    }

    /// Time passed without pointer movement.
    pub fn tick(&mut self, at: Instant, config: &ReorderConfig) -> Recognized {
        match self.armed {
            Some(armed) if at.saturating_duration_since(armed.at) >= config.long_press => {
                self.armed = None;
                Recognized::Lift(armed)
            }
            _ => Recognized::Pending,
        }
    }
}
