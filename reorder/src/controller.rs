//! The reorder controller: gesture gating and the drag session state machine.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::config::ReorderConfig;
use crate::delegate::ReorderDelegate;
use crate::error::{BindingError, InvalidStateError, Result};
use crate::gesture::{Armed, LongPress, Recognized};
use crate::host::HostListView;
use crate::input::{EventResult, PointerEvent};
use crate::position::{Direction, Position};
use crate::session::{DragSession, Grab};

type SharedHost = Rc<RefCell<dyn HostListView>>;
type WeakDelegate = Weak<RefCell<dyn ReorderDelegate>>;

/// Adds drag-to-reorder to a single-section list view.
///
/// The controller is fed pointer events by the owning event loop, recognises
/// a long press on a row, and reports every slot the dragged row crosses to
/// its [`ReorderDelegate`]. It moves rows on the host visually but never
/// touches the data behind them.
///
/// At most one [`DragSession`] exists at a time. It ends with either
/// `on_reorder_did_end` (release, [`commit`](Self::commit)) or a cancel
/// (disable, detach, interruption, [`cancel`](Self::cancel)), after which the
/// host shows the dragged row back at its initial slot.
pub struct ReorderController {
    config: ReorderConfig,
    enabled: bool,
    host: Option<SharedHost>,
    delegate: Option<WeakDelegate>,
    press: LongPress,
    session: Option<DragSession>,
}

impl Default for ReorderController {
    fn default() -> Self {
        Self::new(ReorderConfig::default())
    }
}

impl std::fmt::Debug for ReorderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderController")
            .field("config", &self.config)
            .field("enabled", &self.enabled)
            .field("attached", &self.host.is_some())
            .field("has_delegate", &self.delegate().is_some())
            .field("session", &self.session)
            .finish()
    }
}

impl ReorderController {
    /// Create an enabled, unattached controller.
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            config,
            enabled: true,
            host: None,
            delegate: None,
            press: LongPress::default(),
            session: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active drag session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Bind to a host list view.
    ///
    /// # Errors
    ///
    /// [`BindingError::AlreadyAttached`] if a host is already bound, and
    /// [`BindingError::SectionCount`] if the host does not have exactly one
    /// section. The controller is unchanged on error.
    pub fn attach<H: HostListView + 'static>(&mut self, host: &Rc<RefCell<H>>) -> Result<()> {
        if self.host.is_some() {
            return Err(BindingError::AlreadyAttached.into());
        }
        let sections = host.borrow().section_count();
        if sections != 1 {
            return Err(BindingError::SectionCount(sections).into());
        }
        let host: SharedHost = host.clone();
        self.host = Some(host);
        debug!("[reorder] attached to list view");
        Ok(())
    }

    /// Unbind from the host, cancelling any drag in progress.
    /// Returns false if nothing was attached.
    pub fn detach(&mut self) -> bool {
        if self.host.is_none() {
            return false;
        }
        self.abort("detached");
        self.press.reset();
        self.host = None;
        debug!("[reorder] detached from list view");
        true
    }

    // -------------------------------------------------------------------------
    // Enable / delegate
    // -------------------------------------------------------------------------

    /// Enable or disable reordering. Disabling cancels an active session.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.press.reset();
            self.abort("disabled");
        }
        self.enabled = enabled;
        debug!("[reorder] enabled = {}", enabled);
    }

    /// Set the delegate. Only a weak reference is kept.
    pub fn set_delegate<D: ReorderDelegate + 'static>(&mut self, delegate: &Rc<RefCell<D>>) {
        let delegate: Rc<RefCell<dyn ReorderDelegate>> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if set and still alive.
    pub fn delegate(&self) -> Option<Rc<RefCell<dyn ReorderDelegate>>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Feed one pointer event from the event loop.
    pub fn handle_event(&mut self, event: &PointerEvent) -> EventResult {
        if !self.enabled {
            return EventResult::Ignored;
        }
        let Some(host) = self.host.clone() else {
            return EventResult::Ignored;
        };

        match *event {
            PointerEvent::Press { x, y, button, at } => {
                if button != self.config.button || self.session.is_some() {
                    return EventResult::Ignored;
                }
                let hit = {
                    let host = host.borrow();
                    host.row_at(x, y)
                        .and_then(|row| host.row_rect(row).map(|rect| (row, rect)))
                };
                let Some((row, rect)) = hit else {
                    self.press.reset();
                    return EventResult::Ignored;
                };
                let armed = Armed {
                    row,
                    grab: Grab::new(y, rect),
                    x,
                    y,
                    at,
                };
                trace!("[reorder] press armed on {}", row);
                match self.press.press(armed, &self.config) {
                    Recognized::Lift(armed) => self.lift(armed, y),
                    _ => EventResult::Ignored,
                }
            }
            PointerEvent::Drag { x, y, button, at } => {
                if button != self.config.button {
                    return EventResult::Ignored;
                }
                if self.is_pointer_drag() {
                    self.track(y);
                    return EventResult::Consumed;
                }
                if self.session.is_some() {
                    return EventResult::Ignored;
                }
                match self.press.moved(x, y, at, &self.config) {
                    Recognized::Lift(armed) => self.lift(armed, y),
                    Recognized::Pending | Recognized::Failed => EventResult::Ignored,
                }
            }
            PointerEvent::Tick { at } => match self.press.tick(at, &self.config) {
                Recognized::Lift(armed) => self.lift(armed, armed.y),
                Recognized::Pending | Recognized::Failed => EventResult::Ignored,
            },
            PointerEvent::Release { y, button, .. } => {
                if button != self.config.button {
                    return EventResult::Ignored;
                }
                self.press.reset();
                // Keyboard sessions end through commit/cancel only.
                if !self.is_pointer_drag() {
                    return EventResult::Ignored;
                }
                self.track(y);
                self.finish();
                EventResult::Consumed
            }
            PointerEvent::Interrupt => {
                self.press.reset();
                if self.abort("interrupted") {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Whether a press is waiting for its hold to elapse.
    pub fn is_press_pending(&self) -> bool {
        self.press.is_armed()
    }

    // -------------------------------------------------------------------------
    // Programmatic reorder
    // -------------------------------------------------------------------------

    /// Lift the row at `position` without a pointer, e.g. from a keybind.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError`] if disabled, unattached, already dragging, or
    /// `position` is not a row. Nothing changes on error.
    pub fn begin(&mut self, position: Position) -> Result<()> {
        if !self.enabled {
            return Err(InvalidStateError::Disabled.into());
        }
        let host = self.host.clone().ok_or(InvalidStateError::NotAttached)?;
        if self.session.is_some() {
            return Err(InvalidStateError::SessionActive.into());
        }
        let row_count = host.borrow().row_count();
        if position.row() >= row_count {
            return Err(InvalidStateError::PositionOutOfRange {
                position,
                row_count,
            }
            .into());
        }
        self.press.reset();
        self.start(position, None);
        Ok(())
    }

    /// Move the dragged row one slot in `direction`.
    /// Returns false when it is already at that end of the list.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError::NoSession`] when nothing is being dragged.
    pub fn shift(&mut self, direction: Direction) -> Result<bool> {
        let current = self
            .session
            .as_ref()
            .map(DragSession::current_above)
            .ok_or(InvalidStateError::NoSession)?;
        let row_count = self.row_count();
        match current.step(direction, row_count) {
            Some(to) => {
                self.cross(to);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the dragged row where it is. Returns the final position.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError::NoSession`] when nothing is being dragged.
    pub fn commit(&mut self) -> Result<Position> {
        self.finish().ok_or(InvalidStateError::NoSession.into())
    }

    /// Abandon the drag and put the row back.
    ///
    /// # Errors
    ///
    /// [`InvalidStateError::NoSession`] when nothing is being dragged.
    pub fn cancel(&mut self) -> Result<()> {
        if self.abort("cancelled") {
            Ok(())
        } else {
            Err(InvalidStateError::NoSession.into())
        }
    }

    // -------------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------------

    fn is_pointer_drag(&self) -> bool {
        self.session.as_ref().and_then(DragSession::grab).is_some()
    }

    fn row_count(&self) -> usize {
        self.host.as_ref().map_or(0, |h| h.borrow().row_count())
    }

    fn lift(&mut self, armed: Armed, y: u16) -> EventResult {
        // The row may have gone away while the press was held.
        if armed.row.row() >= self.row_count() {
            return EventResult::Ignored;
        }
        self.start(armed.row, Some(armed.grab));
        self.track(y);
        EventResult::StartDrag
    }

    /// Idle -> Dragging.
    fn start(&mut self, initial: Position, grab: Option<Grab>) {
        self.session = Some(DragSession::new(initial, grab));
        if let Some(host) = &self.host {
            host.borrow_mut().set_lifted(Some(initial));
        }
        debug!("[reorder] lifted {}", initial);
        self.notify(|d| d.on_reorder_will_begin(initial));
    }

    /// Apply every crossing the pointer at row `y` implies, in order.
    fn track(&mut self, y: u16) {
        let Some(host) = self.host.clone() else {
            return;
        };
        let row_count = host.borrow().row_count();
        let mut locked = None;

        // One crossing per slot at most; a sweep cannot cross more rows than exist.
        for _ in 0..row_count {
            let Some(session) = &self.session else {
                return;
            };
            let next = {
                let host = host.borrow();
                session.crossing(y, self.config.threshold, row_count, locked, |slot| {
                    host.row_rect(slot)
                })
            };
            let Some((direction, to)) = next else {
                return;
            };
            locked = Some(direction);
            self.cross(to);
        }
    }

    /// Dragging -> Dragging.
    fn cross(&mut self, to: Position) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let initial = session.initial();
        let (from, to) = session.advance(to);
        if let Some(host) = &self.host {
            let mut host = host.borrow_mut();
            host.move_row(from, to);
            host.set_lifted(Some(to));
        }
        debug!("[reorder] {} moved {} -> {}", initial, from, to);
        self.notify(|d| d.on_reorder_moved(initial, from, to));
    }

    /// Dragging -> Idle, committing.
    fn finish(&mut self) -> Option<Position> {
        let session = self.session.take()?;
        let (initial, final_position) = (session.initial(), session.current_above());
        if let Some(host) = &self.host {
            host.borrow_mut().set_lifted(None);
        }
        debug!("[reorder] dropped {} at {}", initial, final_position);
        self.notify(|d| d.on_reorder_did_end(initial, final_position));
        Some(final_position)
    }

    /// Dragging -> Idle, cancelling. Returns false if nothing was dragging.
    fn abort(&mut self, reason: &str) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let (initial, last) = (session.initial(), session.current_above());
        if let Some(host) = &self.host {
            let mut host = host.borrow_mut();
            if last != initial {
                host.move_row(last, initial);
            }
            host.set_lifted(None);
        }
        debug!("[reorder] drag of {} {} at {}", initial, reason, last);
        self.notify(|d| d.on_reorder_cancelled(initial, last));
        true
    }

    fn notify(&self, f: impl FnOnce(&mut dyn ReorderDelegate)) {
        match self.delegate() {
            Some(delegate) => f(&mut *delegate.borrow_mut()),
            None => trace!("[reorder] no delegate, notification dropped"),
        }
    }
}
