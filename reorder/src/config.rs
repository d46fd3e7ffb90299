//! Reorder controller configuration.

use std::time::Duration;

use crate::input::MouseButton;

/// How far the dragged row has to travel over a neighbour before the two
/// swap slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossingThreshold {
    /// The dragged row's leading edge passes the neighbour's midpoint.
    #[default]
    Midpoint,
    /// The dragged row's leading edge reaches the neighbour's far edge.
    FullOverlap,
}

/// Gesture and crossing settings for a [`ReorderController`](crate::ReorderController).
#[derive(Debug, Clone)]
pub struct ReorderConfig {
    /// How long a press must be held before the row lifts.
    /// Zero lifts the row on press.
    pub long_press: Duration,

    /// Cells the pointer may wander while the press is held.
    /// Moving further before `long_press` elapses fails the gesture.
    pub press_tolerance: u16,

    /// Button that drives the gesture.
    pub button: MouseButton,

    pub threshold: CrossingThreshold,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(500),
            press_tolerance: 1,
            button: MouseButton::Left,
            threshold: CrossingThreshold::Midpoint,
        }
    }
}

impl ReorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hold duration before a drag starts.
    pub fn long_press(mut self, duration: Duration) -> Self {
        self.long_press = duration;
        self
    }

    /// Start dragging as soon as the button goes down.
    pub fn immediate(mut self) -> Self {
        self.long_press = Duration::ZERO;
        self
    }

    /// Set the movement tolerance while holding.
    pub fn press_tolerance(mut self, cells: u16) -> Self {
        self.press_tolerance = cells;
        self
    }

    /// Set the button that drives the gesture.
    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Set the crossing threshold.
    pub fn threshold(mut self, threshold: CrossingThreshold) -> Self {
        self.threshold = threshold;
        self
    }
}
