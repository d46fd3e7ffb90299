//! Reorder notifications.
//!
//! The owning screen implements [`ReorderDelegate`] to keep its backing
//! ordering in step with the list view. `initial` is passed to every call and
//! stays the same for the whole session, so one delegate can tell several
//! lists' sessions apart.

use crate::position::Position;

/// Receiver of reorder lifecycle notifications.
///
/// For one session the calls always arrive as: one `on_reorder_will_begin`,
/// zero or more `on_reorder_moved` with `from` equal to the previous call's
/// `to`, then either one `on_reorder_did_end` or one `on_reorder_cancelled`.
pub trait ReorderDelegate {
    /// A row was lifted at `initial`.
    fn on_reorder_will_begin(&mut self, initial: Position);

    /// The dragged row crossed a neighbour and now sits at `to`.
    fn on_reorder_moved(&mut self, initial: Position, from: Position, to: Position);

    /// The row was dropped at `final_position`. Equal to `initial` when the
    /// row never crossed a neighbour.
    fn on_reorder_did_end(&mut self, initial: Position, final_position: Position);

    /// The session was abandoned while the row sat at `last`.
    /// The list view has already been put back; revert the data to match.
    fn on_reorder_cancelled(&mut self, _initial: Position, _last: Position) {}
}

type BeginFn = Box<dyn FnMut(Position)>;
type MovedFn = Box<dyn FnMut(Position, Position, Position)>;
type EndFn = Box<dyn FnMut(Position, Position)>;

/// A delegate assembled from closures.
///
/// ```ignore
/// let delegate = Rc::new(RefCell::new(
///     ReorderCallbacks::new()
///         .on_moved(move |_, from, to| items.borrow_mut().swap(from.row(), to.row())),
/// ));
/// controller.set_delegate(&delegate);
/// ```
#[derive(Default)]
pub struct ReorderCallbacks {
    will_begin: Option<BeginFn>,
    moved: Option<MovedFn>,
    did_end: Option<EndFn>,
    cancelled: Option<EndFn>,
}

impl ReorderCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_will_begin(mut self, f: impl FnMut(Position) + 'static) -> Self {
        self.will_begin = Some(Box::new(f));
        self
    }

    pub fn on_moved(mut self, f: impl FnMut(Position, Position, Position) + 'static) -> Self {
        self.moved = Some(Box::new(f));
        self
    }

    pub fn on_did_end(mut self, f: impl FnMut(Position, Position) + 'static) -> Self {
        self.did_end = Some(Box::new(f));
        self
    }

    pub fn on_cancelled(mut self, f: impl FnMut(Position, Position) + 'static) -> Self {
        self.cancelled = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for ReorderCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderCallbacks")
            .field("will_begin", &self.will_begin.is_some())
            .field("moved", &self.moved.is_some())
            .field("did_end", &self.did_end.is_some())
            .field("cancelled", &self.cancelled.is_some())
            .finish()
    }
}

impl ReorderDelegate for ReorderCallbacks {
    fn on_reorder_will_begin(&mut self, initial: Position) {
        if let Some(f) = self.will_begin.as_mut() {
            f(initial);
        }
    }

    fn on_reorder_moved(&mut self, initial: Position, from: Position, to: Position) {
        if let Some(f) = self.moved.as_mut() {
            f(initial, from, to);
        }
    }

    fn on_reorder_did_end(&mut self, initial: Position, final_position: Position) {
        if let Some(f) = self.did_end.as_mut() {
            f(initial, final_position);
        }
    }

    fn on_reorder_cancelled(&mut self, initial: Position, last: Position) {
        if let Some(f) = self.cancelled.as_mut() {
            f(initial, last);
        }
    }
}
