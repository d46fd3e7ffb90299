use std::time::Instant;

/// Pointer input fed to the controller, one per event-loop tick.
///
/// Every variant carries the time it was observed so the long-press
/// recogniser does not read the clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed
    Press {
        x: u16,
        y: u16,
        button: MouseButton,
        at: Instant,
    },
    /// Pointer moved with the button held
    Drag {
        x: u16,
        y: u16,
        button: MouseButton,
        at: Instant,
    },
    /// Button released
    Release {
        x: u16,
        y: u16,
        button: MouseButton,
        at: Instant,
    },
    /// No input, time passed. Lets a stationary press reach the hold threshold.
    Tick { at: Instant },
    /// The gesture was taken away, e.g. the terminal lost focus.
    Interrupt,
}

impl PointerEvent {
    /// Convert a crossterm event observed at `at`.
    /// Returns None for events the reorder gesture does not care about.
    pub fn from_crossterm(event: &crossterm::event::Event, at: Instant) -> Option<Self> {
        use crossterm::event::Event as CtEvent;
        match event {
            CtEvent::Mouse(mouse) => Self::from_mouse(mouse, at),
            CtEvent::FocusLost => Some(Self::Interrupt),
            _ => None,
        }
    }

    pub fn from_mouse(mouse: &crossterm::event::MouseEvent, at: Instant) -> Option<Self> {
        use crossterm::event::MouseEventKind;
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(btn) => Some(Self::Press {
                x,
                y,
                button: btn.into(),
                at,
            }),
            MouseEventKind::Drag(btn) => Some(Self::Drag {
                x,
                y,
                button: btn.into(),
                at,
            }),
            MouseEventKind::Up(btn) => Some(Self::Release {
                x,
                y,
                button: btn.into(),
                at,
            }),
            _ => None,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

/// What the controller did with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event started a drag session.
    StartDrag,
}
