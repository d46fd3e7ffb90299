/// Zero-based row index within the single section of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub usize);

impl Position {
    pub const fn new(row: usize) -> Self {
        Self(row)
    }

    pub const fn row(self) -> usize {
        self.0
    }

    /// The neighbouring slot in `direction`, or None when that would leave
    /// `0..row_count`.
    pub fn step(self, direction: Direction, row_count: usize) -> Option<Self> {
        match direction {
            Direction::Up => self.0.checked_sub(1).map(Self),
            Direction::Down => {
                let next = self.0 + 1;
                (next < row_count).then_some(Self(next))
            }
        }
    }
}

impl From<usize> for Position {
    fn from(row: usize) -> Self {
        Self(row)
    }
}

impl From<Position> for usize {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// Vertical direction a dragged row travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}
