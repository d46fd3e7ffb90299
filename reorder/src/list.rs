//! A plain terminal list that can host a [`ReorderController`](crate::ReorderController).

use crate::host::HostListView;
use crate::position::Position;
use crate::rect::Rect;

/// Row geometry for a vertically stacked, single-section list.
///
/// Rows keep the index they were created with, so after any number of
/// moves `order()[slot]` tells which original row is drawn in `slot`.
#[derive(Debug, Clone)]
pub struct RowList {
    area: Rect,
    heights: Vec<u16>,
    order: Vec<usize>,
    scroll_offset: u16,
    lifted: Option<Position>,
}

impl RowList {
    /// `rows` rows of height 1 inside `area`.
    pub fn new(area: Rect, rows: usize) -> Self {
        Self::with_heights(area, vec![1; rows])
    }

    /// One row per entry of `heights`. Zero heights are bumped to 1.
    pub fn with_heights(area: Rect, heights: Vec<u16>) -> Self {
        let heights: Vec<u16> = heights.into_iter().map(|h| h.max(1)).collect();
        let order = (0..heights.len()).collect();
        Self {
            area,
            heights,
            order,
            scroll_offset: 0,
            lifted: None,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Original row index drawn in each slot.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Slot currently drawn lifted.
    pub fn lifted(&self) -> Option<Position> {
        self.lifted
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u16) {
        let content: u32 = self.heights.iter().map(|&h| u32::from(h)).sum();
        let max = content.saturating_sub(u32::from(self.area.height));
        self.scroll_offset = u32::from(offset).min(max) as u16;
    }

    /// Append a row at the end.
    pub fn push(&mut self, height: u16) {
        self.order.push(self.heights.len());
        self.heights.push(height.max(1));
    }

    /// Slots with at least part of the row inside the area, top to bottom.
    pub fn visible(&self) -> impl Iterator<Item = (Position, Rect)> + '_ {
        (0..self.heights.len()).filter_map(move |slot| {
            let position = Position(slot);
            self.row_rect(position)
                .filter(|rect| rect.top() < self.area.bottom() && rect.bottom() > self.area.top())
                .map(|rect| (position, rect))
        })
    }

    fn content_top(&self, slot: usize) -> i32 {
        let above: i32 = self.heights[..slot].iter().map(|&h| i32::from(h)).sum();
        i32::from(self.area.y) + above - i32::from(self.scroll_offset)
    }
}

impl HostListView for RowList {
    fn row_count(&self) -> usize {
        self.heights.len()
    }

    fn row_at(&self, x: u16, y: u16) -> Option<Position> {
        if !self.area.contains(x, y) {
            return None;
        }
        self.visible()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(position, _)| position)
    }

    fn row_rect(&self, position: Position) -> Option<Rect> {
        let height = *self.heights.get(position.row())?;
        let top = u16::try_from(self.content_top(position.row())).ok()?;
        // Rows that would end past the coordinate space have no rect.
        top.checked_add(height)?;
        Some(Rect::new(self.area.x, top, self.area.width, height))
    }

    fn move_row(&mut self, from: Position, to: Position) {
        let (from, to) = (from.row(), to.row());
        if from == to || from >= self.heights.len() || to >= self.heights.len() {
            return;
        }
        let height = self.heights.remove(from);
        self.heights.insert(to, height);
        let original = self.order.remove(from);
        self.order.insert(to, original);
    }

    fn set_lifted(&mut self, position: Option<Position>) {
        self.lifted = position;
    }
}
