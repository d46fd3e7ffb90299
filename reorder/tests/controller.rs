use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use reorder::{
    BindingError, Direction, EventResult, HostListView, InvalidStateError, MouseButton,
    PointerEvent, Position, Rect, ReorderCallbacks, ReorderConfig, ReorderController,
    ReorderDelegate, ReorderError, RowList,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Note {
    Begin(usize),
    Moved(usize, usize, usize),
    End(usize, usize),
    Cancelled(usize, usize),
}

#[derive(Debug, Default)]
struct Recorder {
    notes: Vec<Note>,
}

impl ReorderDelegate for Recorder {
    fn on_reorder_will_begin(&mut self, initial: Position) {
        self.notes.push(Note::Begin(initial.row()));
    }

    fn on_reorder_moved(&mut self, initial: Position, from: Position, to: Position) {
        self.notes
            .push(Note::Moved(initial.row(), from.row(), to.row()));
    }

    fn on_reorder_did_end(&mut self, initial: Position, final_position: Position) {
        self.notes.push(Note::End(initial.row(), final_position.row()));
    }

    fn on_reorder_cancelled(&mut self, initial: Position, last: Position) {
        self.notes.push(Note::Cancelled(initial.row(), last.row()));
    }
}

struct Fixture {
    controller: ReorderController,
    list: Rc<RefCell<RowList>>,
    recorder: Rc<RefCell<Recorder>>,
    t0: Instant,
}

impl Fixture {
    /// `rows` one-cell rows starting at the top-left corner, so row n is at y = n.
    fn new(rows: usize) -> Self {
        Self::with_config(rows, ReorderConfig::new().immediate())
    }

    fn with_config(rows: usize, config: ReorderConfig) -> Self {
        let list = Rc::new(RefCell::new(RowList::new(
            Rect::new(0, 0, 20, rows as u16),
            rows,
        )));
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut controller = ReorderController::new(config);
        controller.attach(&list).unwrap();
        controller.set_delegate(&recorder);
        Self {
            controller,
            list,
            recorder,
            t0: Instant::now(),
        }
    }

    fn press(&mut self, y: u16) -> EventResult {
        self.controller.handle_event(&PointerEvent::Press {
            x: 2,
            y,
            button: MouseButton::Left,
            at: self.t0,
        })
    }

    fn drag(&mut self, y: u16) -> EventResult {
        self.controller.handle_event(&PointerEvent::Drag {
            x: 2,
            y,
            button: MouseButton::Left,
            at: self.t0,
        })
    }

    fn release(&mut self, y: u16) -> EventResult {
        self.controller.handle_event(&PointerEvent::Release {
            x: 2,
            y,
            button: MouseButton::Left,
            at: self.t0,
        })
    }

    fn notes(&self) -> Vec<Note> {
        self.recorder.borrow().notes.clone()
    }

    fn order(&self) -> Vec<usize> {
        self.list.borrow().order().to_vec()
    }
}

// ============================================================================
// Drag sessions
// ============================================================================

#[test]
fn test_drag_down_across_two_rows() {
    let mut fx = Fixture::new(5);

    assert_eq!(fx.press(2), EventResult::StartDrag);
    assert_eq!(fx.drag(3), EventResult::Consumed);
    assert_eq!(fx.drag(4), EventResult::Consumed);
    assert_eq!(fx.release(4), EventResult::Consumed);

    assert_eq!(
        fx.notes(),
        vec![
            Note::Begin(2),
            Note::Moved(2, 2, 3),
            Note::Moved(2, 3, 4),
            Note::End(2, 4),
        ]
    );
    assert_eq!(fx.order(), vec![0, 1, 3, 4, 2]);
    assert!(!fx.controller.is_dragging());
    assert_eq!(fx.list.borrow().lifted(), None);
}

#[test]
fn test_release_without_crossing_reports_initial_position() {
    let mut fx = Fixture::new(5);

    fx.press(0);
    fx.release(0);

    assert_eq!(fx.notes(), vec![Note::Begin(0), Note::End(0, 0)]);
    assert_eq!(fx.order(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_disable_mid_drag_cancels_without_end() {
    let mut fx = Fixture::new(5);

    fx.press(1);
    fx.drag(0);
    fx.controller.set_enabled(false);

    let notes = fx.notes();
    assert_eq!(&notes[..2], &[Note::Begin(1), Note::Moved(1, 1, 0)]);
    assert!(!notes.iter().any(|n| matches!(n, Note::End(..))));
    assert_eq!(notes.last(), Some(&Note::Cancelled(1, 0)));
    assert!(!fx.controller.is_dragging());
    // Dragged row is back at its initial slot
    assert_eq!(fx.order(), vec![0, 1, 2, 3, 4]);

    // Release after the cancel does nothing
    assert_eq!(fx.release(0), EventResult::Ignored);
    assert_eq!(fx.notes().len(), 3);
}

#[test]
fn test_one_update_can_cross_several_rows() {
    let mut fx = Fixture::new(5);

    fx.press(0);
    fx.drag(3);
    fx.release(3);

    assert_eq!(
        fx.notes(),
        vec![
            Note::Begin(0),
            Note::Moved(0, 0, 1),
            Note::Moved(0, 1, 2),
            Note::Moved(0, 2, 3),
            Note::End(0, 3),
        ]
    );
}

#[test]
fn test_moves_chain_from_previous_to() {
    let mut fx = Fixture::new(6);

    fx.press(1);
    let session = fx.controller.session().unwrap();
    assert_eq!(session.previous_above(), Position(1));
    assert_eq!(session.current_above(), Position(1));

    for y in [3, 5, 4, 0, 2, 2, 5] {
        fx.drag(y);
        let last_move = fx.notes().into_iter().rev().find_map(|n| match n {
            Note::Moved(_, from, to) => Some((from, to)),
            _ => None,
        });
        let session = fx.controller.session().unwrap();
        assert_eq!(
            Some((session.previous_above().row(), session.current_above().row())),
            last_move
        );
        assert_eq!(session.initial(), Position(1));
    }
    fx.release(5);

    let notes = fx.notes();
    assert_eq!(notes.first(), Some(&Note::Begin(1)));
    let moves: Vec<(usize, usize)> = notes
        .iter()
        .filter_map(|n| match *n {
            Note::Moved(initial, from, to) => {
                assert_eq!(initial, 1);
                Some((from, to))
            }
            _ => None,
        })
        .collect();
    assert_eq!(moves.first().map(|m| m.0), Some(1));
    for pair in moves.windows(2) {
        assert_eq!(pair[1].0, pair[0].1);
    }
    assert_eq!(notes.last(), Some(&Note::End(1, 5)));
}

#[test]
fn test_second_press_during_drag_is_ignored() {
    let mut fx = Fixture::new(5);

    fx.press(1);
    assert_eq!(fx.press(3), EventResult::Ignored);
    assert_eq!(fx.controller.session().map(|s| s.initial()), Some(Position(1)));
    assert_eq!(fx.notes(), vec![Note::Begin(1)]);
}

#[test]
fn test_press_outside_rows_is_ignored() {
    let mut fx = Fixture::new(3);

    assert_eq!(fx.press(10), EventResult::Ignored);
    assert!(!fx.controller.is_dragging());
    assert!(fx.notes().is_empty());
}

#[test]
fn test_other_buttons_are_ignored() {
    let mut fx = Fixture::new(3);

    let result = fx.controller.handle_event(&PointerEvent::Press {
        x: 2,
        y: 1,
        button: MouseButton::Right,
        at: fx.t0,
    });

    assert_eq!(result, EventResult::Ignored);
    assert!(fx.notes().is_empty());
}

#[test]
fn test_interrupt_cancels_session() {
    let mut fx = Fixture::new(4);

    fx.press(0);
    fx.drag(2);
    assert_eq!(
        fx.controller.handle_event(&PointerEvent::Interrupt),
        EventResult::Consumed
    );

    assert_eq!(fx.notes().last(), Some(&Note::Cancelled(0, 2)));
    assert_eq!(fx.order(), vec![0, 1, 2, 3]);
    assert_eq!(
        fx.controller.handle_event(&PointerEvent::Interrupt),
        EventResult::Ignored
    );
}

#[test]
fn test_click_does_not_end_keyboard_session() {
    let mut fx = Fixture::new(4);

    fx.controller.begin(Position(1)).unwrap();
    fx.controller.shift(Direction::Down).unwrap();

    // A click outside the list, then one on a row
    for y in [50, 0] {
        let at = fx.t0;
        assert_eq!(
            fx.controller.handle_event(&PointerEvent::Press {
                x: 50,
                y,
                button: MouseButton::Left,
                at,
            }),
            EventResult::Ignored
        );
        assert_eq!(fx.drag(y), EventResult::Ignored);
        assert_eq!(
            fx.controller.handle_event(&PointerEvent::Release {
                x: 50,
                y,
                button: MouseButton::Left,
                at,
            }),
            EventResult::Ignored
        );
    }

    assert!(fx.controller.is_dragging());
    assert_eq!(fx.notes(), vec![Note::Begin(1), Note::Moved(1, 1, 2)]);

    assert_eq!(fx.controller.commit(), Ok(Position(2)));
    assert_eq!(fx.notes().last(), Some(&Note::End(1, 2)));
}

// ============================================================================
// Enable / disable
// ============================================================================

#[test]
fn test_disabled_controller_ignores_presses() {
    let mut fx = Fixture::new(3);
    fx.controller.set_enabled(false);

    assert_eq!(fx.press(1), EventResult::Ignored);
    assert!(!fx.controller.is_dragging());
    assert!(fx.notes().is_empty());

    fx.controller.set_enabled(true);
    assert_eq!(fx.press(1), EventResult::StartDrag);
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_attach_twice_keeps_first_binding() {
    let mut fx = Fixture::new(3);
    let other = Rc::new(RefCell::new(RowList::new(Rect::new(0, 0, 20, 3), 3)));

    let err = fx.controller.attach(&other).unwrap_err();
    assert_eq!(err, ReorderError::Binding(BindingError::AlreadyAttached));

    fx.controller.begin(Position(0)).unwrap();
    fx.controller.shift(Direction::Down).unwrap();
    fx.controller.commit().unwrap();

    assert_eq!(fx.order(), vec![1, 0, 2]);
    assert_eq!(other.borrow().order(), &[0, 1, 2]);
}

struct Sectioned {
    sections: usize,
}

impl HostListView for Sectioned {
    fn section_count(&self) -> usize {
        self.sections
    }

    fn row_count(&self) -> usize {
        0
    }

    fn row_at(&self, _x: u16, _y: u16) -> Option<Position> {
        None
    }

    fn row_rect(&self, _position: Position) -> Option<Rect> {
        None
    }

    fn move_row(&mut self, _from: Position, _to: Position) {}
}

#[test]
fn test_attach_rejects_multi_section_host() {
    let mut controller = ReorderController::default();
    let host = Rc::new(RefCell::new(Sectioned { sections: 2 }));

    let err = controller.attach(&host).unwrap_err();

    assert_eq!(err, ReorderError::Binding(BindingError::SectionCount(2)));
    assert!(!controller.is_attached());
}

#[test]
fn test_detach_mid_drag_cancels_and_unbinds() {
    let mut fx = Fixture::new(4);

    fx.press(3);
    fx.drag(1);
    assert!(fx.controller.detach());

    assert_eq!(fx.notes().last(), Some(&Note::Cancelled(3, 1)));
    assert_eq!(fx.order(), vec![0, 1, 2, 3]);
    assert!(!fx.controller.is_attached());
    assert!(!fx.controller.detach());
    assert_eq!(fx.press(0), EventResult::Ignored);

    // Can bind again after detaching
    fx.controller.attach(&fx.list).unwrap();
    assert_eq!(fx.press(0), EventResult::StartDrag);
}

// ============================================================================
// Delegate
// ============================================================================

#[test]
fn test_dropped_delegate_is_tolerated() {
    let list = Rc::new(RefCell::new(RowList::new(Rect::new(0, 0, 10, 3), 3)));
    let mut controller = ReorderController::new(ReorderConfig::new().immediate());
    controller.attach(&list).unwrap();
    {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        controller.set_delegate(&recorder);
    }
    assert!(controller.delegate().is_none());

    controller.begin(Position(2)).unwrap();
    controller.shift(Direction::Up).unwrap();
    assert_eq!(controller.commit().unwrap(), Position(1));
    assert_eq!(list.borrow().order(), &[0, 2, 1]);
}

#[test]
fn test_delegate_can_be_swapped_between_sessions() {
    let mut fx = Fixture::new(3);
    let second = Rc::new(RefCell::new(Recorder::default()));

    fx.press(0);
    fx.release(0);
    fx.controller.set_delegate(&second);
    fx.press(1);
    fx.release(1);

    assert_eq!(fx.notes(), vec![Note::Begin(0), Note::End(0, 0)]);
    assert_eq!(second.borrow().notes, vec![Note::Begin(1), Note::End(1, 1)]);

    fx.controller.clear_delegate();
    fx.press(2);
    fx.release(2);
    assert_eq!(second.borrow().notes.len(), 2);
}

#[test]
fn test_callbacks_keep_backing_data_in_step() {
    let items = Rc::new(RefCell::new(vec!["a", "b", "c", "d"]));
    let ended = Rc::new(RefCell::new(None));
    let list = Rc::new(RefCell::new(RowList::new(Rect::new(0, 0, 10, 4), 4)));

    let delegate = Rc::new(RefCell::new(
        ReorderCallbacks::new()
            .on_moved({
                let items = items.clone();
                move |_, from, to| items.borrow_mut().swap(from.row(), to.row())
            })
            .on_did_end({
                let ended = ended.clone();
                move |initial, final_position| *ended.borrow_mut() = Some((initial, final_position))
            }),
    ));

    let mut controller = ReorderController::new(ReorderConfig::new().immediate());
    controller.attach(&list).unwrap();
    controller.set_delegate(&delegate);

    let t0 = Instant::now();
    controller.handle_event(&PointerEvent::Press {
        x: 0,
        y: 3,
        button: MouseButton::Left,
        at: t0,
    });
    controller.handle_event(&PointerEvent::Drag {
        x: 0,
        y: 1,
        button: MouseButton::Left,
        at: t0,
    });
    controller.handle_event(&PointerEvent::Release {
        x: 0,
        y: 1,
        button: MouseButton::Left,
        at: t0,
    });

    assert_eq!(*items.borrow(), vec!["a", "d", "b", "c"]);
    assert_eq!(*ended.borrow(), Some((Position(3), Position(1))));
    assert_eq!(list.borrow().order(), &[0, 3, 1, 2]);
}

// ============================================================================
// Programmatic reorder
// ============================================================================

#[test]
fn test_keyboard_reorder() {
    let mut fx = Fixture::new(5);

    fx.controller.begin(Position(3)).unwrap();
    assert_eq!(fx.controller.shift(Direction::Up), Ok(true));
    assert_eq!(fx.controller.shift(Direction::Up), Ok(true));
    assert_eq!(fx.controller.commit(), Ok(Position(1)));

    assert_eq!(
        fx.notes(),
        vec![
            Note::Begin(3),
            Note::Moved(3, 3, 2),
            Note::Moved(3, 2, 1),
            Note::End(3, 1),
        ]
    );
    assert_eq!(fx.order(), vec![0, 3, 1, 2, 4]);
}

#[test]
fn test_shift_past_either_end_is_noop() {
    let mut fx = Fixture::new(2);

    fx.controller.begin(Position(0)).unwrap();
    assert_eq!(fx.controller.shift(Direction::Up), Ok(false));
    assert_eq!(fx.controller.shift(Direction::Down), Ok(true));
    assert_eq!(fx.controller.shift(Direction::Down), Ok(false));
    fx.controller.cancel().unwrap();

    assert_eq!(
        fx.notes(),
        vec![Note::Begin(0), Note::Moved(0, 0, 1), Note::Cancelled(0, 1)]
    );
    assert_eq!(fx.order(), vec![0, 1]);
}

#[test]
fn test_begin_rejections_leave_state_unchanged() {
    let mut fx = Fixture::new(3);

    assert_eq!(
        fx.controller.begin(Position(3)),
        Err(ReorderError::InvalidState(
            InvalidStateError::PositionOutOfRange {
                position: Position(3),
                row_count: 3,
            }
        ))
    );
    assert!(!fx.controller.is_dragging());

    fx.controller.begin(Position(1)).unwrap();
    assert_eq!(
        fx.controller.begin(Position(0)),
        Err(ReorderError::InvalidState(InvalidStateError::SessionActive))
    );
    assert_eq!(fx.controller.session().map(|s| s.initial()), Some(Position(1)));

    fx.controller.set_enabled(false);
    assert_eq!(
        fx.controller.begin(Position(0)),
        Err(ReorderError::InvalidState(InvalidStateError::Disabled))
    );
    assert_eq!(fx.notes(), vec![Note::Begin(1), Note::Cancelled(1, 1)]);
}

#[test]
fn test_operations_without_session_or_host() {
    let mut controller = ReorderController::default();

    assert_eq!(
        controller.begin(Position(0)),
        Err(ReorderError::InvalidState(InvalidStateError::NotAttached))
    );
    assert_eq!(
        controller.shift(Direction::Down),
        Err(ReorderError::InvalidState(InvalidStateError::NoSession))
    );
    assert_eq!(
        controller.commit(),
        Err(ReorderError::InvalidState(InvalidStateError::NoSession))
    );
    assert_eq!(
        controller.cancel(),
        Err(ReorderError::InvalidState(InvalidStateError::NoSession))
    );
}
