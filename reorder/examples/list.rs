//! Drag rows with the mouse (press and hold), or use the keyboard:
//! space lifts the cursor row, up/down move it, enter drops, esc cancels,
//! `e` toggles reordering, `q` quits.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, execute, queue, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

use reorder::{
    Direction, HostListView, PointerEvent, Position, Rect, ReorderConfig, ReorderController,
    ReorderDelegate, RowList,
};

/// Owns the data behind the rows.
struct Screen {
    items: Vec<String>,
    cursor: usize,
    status: String,
}

impl ReorderDelegate for Screen {
    fn on_reorder_will_begin(&mut self, initial: Position) {
        self.status = format!("lifted {}", self.items[initial.row()]);
    }

    fn on_reorder_moved(&mut self, _initial: Position, from: Position, to: Position) {
        self.items.swap(from.row(), to.row());
        self.cursor = to.row();
    }

    fn on_reorder_did_end(&mut self, initial: Position, final_position: Position) {
        self.cursor = final_position.row();
        self.status = format!("moved {} -> {}", initial.row(), final_position.row());
    }

    fn on_reorder_cancelled(&mut self, initial: Position, last: Position) {
        let item = self.items.remove(last.row());
        self.items.insert(initial.row(), item);
        self.cursor = initial.row();
        self.status = "cancelled".to_string();
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("reorder.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let items: Vec<String> = ["inbox", "today", "upcoming", "someday", "logbook", "trash"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let list = Rc::new(RefCell::new(RowList::new(
        Rect::new(2, 2, 30, items.len() as u16),
        items.len(),
    )));
    let screen = Rc::new(RefCell::new(Screen {
        items,
        cursor: 0,
        status: String::new(),
    }));

    let mut controller = ReorderController::new(ReorderConfig::new().long_press(Duration::from_millis(300)));
    controller
        .attach(&list)
        .expect("a fresh controller accepts a single-section list");
    controller.set_delegate(&screen);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture,
        event::EnableFocusChange
    )?;

    let result = run(&mut stdout, &mut controller, &list, &screen);

    execute!(
        stdout,
        event::DisableFocusChange,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    stdout: &mut io::Stdout,
    controller: &mut ReorderController,
    list: &Rc<RefCell<RowList>>,
    screen: &Rc<RefCell<Screen>>,
) -> io::Result<()> {
    loop {
        draw(stdout, controller, list, screen)?;

        if !event::poll(Duration::from_millis(50))? {
            controller.handle_event(&PointerEvent::Tick { at: Instant::now() });
            continue;
        }

        let raw = event::read()?;
        if let Some(pointer) = PointerEvent::from_crossterm(&raw, Instant::now()) {
            controller.handle_event(&pointer);
            continue;
        }

        let CrosstermEvent::Key(key) = raw else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let outcome = match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('e') => {
                controller.set_enabled(!controller.is_enabled());
                Ok(())
            }
            KeyCode::Char(' ') => {
                let cursor = screen.borrow().cursor;
                controller.begin(Position(cursor))
            }
            KeyCode::Up | KeyCode::Down if controller.is_dragging() => {
                let direction = if key.code == KeyCode::Up {
                    Direction::Up
                } else {
                    Direction::Down
                };
                controller.shift(direction).map(|_| ())
            }
            KeyCode::Up => {
                let mut screen = screen.borrow_mut();
                screen.cursor = screen.cursor.saturating_sub(1);
                Ok(())
            }
            KeyCode::Down => {
                let rows = list.borrow().row_count();
                let mut screen = screen.borrow_mut();
                screen.cursor = (screen.cursor + 1).min(rows.saturating_sub(1));
                Ok(())
            }
            KeyCode::Enter => controller.commit().map(|_| ()),
            KeyCode::Esc => controller.cancel(),
            _ => Ok(()),
        };

        if let Err(e) = outcome {
            log::warn!("{}", e);
            screen.borrow_mut().status = e.to_string();
        }
    }
}

fn draw(
    stdout: &mut io::Stdout,
    controller: &ReorderController,
    list: &Rc<RefCell<RowList>>,
    screen: &Rc<RefCell<Screen>>,
) -> io::Result<()> {
    let list = list.borrow();
    let screen = screen.borrow();

    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
    queue!(
        stdout,
        cursor::MoveTo(2, 0),
        Print(format!(
            "reorder {}",
            if controller.is_enabled() { "on" } else { "off" }
        ))
    )?;

    for (position, rect) in list.visible() {
        let Some(item) = screen.items.get(position.row()) else {
            continue;
        };
        let marker = if position.row() == screen.cursor { '>' } else { ' ' };
        let lifted = list.lifted() == Some(position);

        queue!(stdout, cursor::MoveTo(rect.x, rect.y))?;
        if lifted {
            queue!(stdout, SetAttribute(Attribute::Reverse))?;
        }
        queue!(stdout, Print(format!("{} {:<26}", marker, item)))?;
        if lifted {
            queue!(stdout, SetAttribute(Attribute::Reset))?;
        }
    }

    let status_row = list.area().bottom() + 1;
    queue!(stdout, cursor::MoveTo(2, status_row), Print(&screen.status))?;
    stdout.flush()
}
