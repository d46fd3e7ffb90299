//! State of one drag, from lift to drop.

use crate::config::CrossingThreshold;
use crate::position::{Direction, Position};
use crate::rect::Rect;

/// Where the pointer holds the dragged row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grab {
    /// Pointer distance from the row's top edge at lift time.
    pub offset: u16,
    /// Height of the dragged row.
    pub height: u16,
}

impl Grab {
    /// Grab a row occupying `rect` at pointer row `y`.
    pub fn new(y: u16, rect: Rect) -> Self {
        Self {
            offset: y.saturating_sub(rect.y).min(rect.height.saturating_sub(1)),
            height: rect.height.max(1),
        }
    }

    /// Vertical extent `[top, bottom)` of the dragged row for pointer row `y`.
    fn span(&self, y: u16) -> (i32, i32) {
        let top = i32::from(y) - i32::from(self.offset);
        (top, top + i32::from(self.height))
    }
}

/// A single drag-to-reorder session.
///
/// `initial` is fixed for the session's lifetime. `current_above` only moves
/// one slot at a time through [`DragSession::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    initial: Position,
    current_above: Position,
    previous_above: Position,
    grab: Option<Grab>,
}

impl DragSession {
    pub(crate) fn new(initial: Position, grab: Option<Grab>) -> Self {
        Self {
            initial,
            current_above: initial,
            previous_above: initial,
            grab,
        }
    }

    pub fn initial(&self) -> Position {
        self.initial
    }

    pub fn current_above(&self) -> Position {
        self.current_above
    }

    pub fn previous_above(&self) -> Position {
        self.previous_above
    }

    /// Pointer grab, None for keyboard-driven sessions.
    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    /// Record a crossing into the adjacent slot `to`.
    /// Returns the `(from, to)` pair to report.
    pub(crate) fn advance(&mut self, to: Position) -> (Position, Position) {
        debug_assert_eq!(self.current_above.row().abs_diff(to.row()), 1);
        self.previous_above = self.current_above;
        self.current_above = to;
        (self.previous_above, self.current_above)
    }

    /// The neighbouring slot the dragged row has crossed into for pointer row
    /// `y`, if any. `neighbour` resolves a slot to the rect of the row in it.
    ///
    /// With `only` set, just that direction is checked.
    pub(crate) fn crossing(
        &self,
        y: u16,
        threshold: CrossingThreshold,
        row_count: usize,
        only: Option<Direction>,
        neighbour: impl Fn(Position) -> Option<Rect>,
    ) -> Option<(Direction, Position)> {
        let grab = self.grab?;
        let (top, bottom) = grab.span(y);

        for direction in [Direction::Down, Direction::Up] {
            if only.is_some_and(|d| d != direction) {
                continue;
            }
            let Some(slot) = self.current_above.step(direction, row_count) else {
                continue;
            };
            let Some(rect) = neighbour(slot) else {
                continue;
            };
            let crossed = match (threshold, direction) {
                (CrossingThreshold::Midpoint, Direction::Down) => 2 * bottom > rect.doubled_mid_y(),
                (CrossingThreshold::Midpoint, Direction::Up) => 2 * top < rect.doubled_mid_y(),
                (CrossingThreshold::FullOverlap, Direction::Down) => {
                    bottom >= i32::from(rect.bottom())
                }
                (CrossingThreshold::FullOverlap, Direction::Up) => top <= i32::from(rect.top()),
            };
            if crossed {
                return Some((direction, slot));
            }
        }
        None
    }
}
