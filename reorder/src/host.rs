//! The list view a controller attaches to.

use crate::position::Position;
use crate::rect::Rect;

/// A list view whose rows can be dragged into a new order.
///
/// The controller queries geometry and commands visual moves; it never
/// touches the data behind the rows. Rects are reported in the same screen
/// coordinates as pointer events.
pub trait HostListView {
    /// Number of sections. Only single-section views can be attached.
    fn section_count(&self) -> usize {
        1
    }

    fn row_count(&self) -> usize;

    /// The row under a screen point, if any.
    fn row_at(&self, x: u16, y: u16) -> Option<Position>;

    /// Screen rect of whatever row currently occupies `position`.
    fn row_rect(&self, position: Position) -> Option<Rect>;

    /// Move the row at `from` to `to`, shifting the rows in between.
    fn move_row(&mut self, from: Position, to: Position);

    /// Mark the row being dragged so it can be drawn lifted.
    /// `None` once the drag is over.
    fn set_lifted(&mut self, _position: Option<Position>) {}
}
