//! Scroll viewport
//!
//! Tracks the top-left logical coordinate currently visible and keeps the
//! cursor inside the visible window. Scrolling is minimal: the offset moves
//! by exactly the amount needed to bring the cursor back in view, never
//! recentering.

use super::cursor::Cursor;

/// The top-left logical coordinate of the visible window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line
    pub row_offset: usize,
    /// First visible column
    pub col_offset: usize,
}

impl Viewport {
    /// Create a viewport at the buffer origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the offsets so `cursor` lies within the `rows` x `cols`
    /// visible window. Called once per frame before drawing.
    pub fn scroll_to(&mut self, cursor: Cursor, rows: usize, cols: usize) {
        if cursor.line < self.row_offset {
            self.row_offset = cursor.line;
        }
        if rows > 0 && cursor.line >= self.row_offset + rows {
            self.row_offset = cursor.line - rows + 1;
        }
        if cursor.col < self.col_offset {
            self.col_offset = cursor.col;
        }
        if cols > 0 && cursor.col >= self.col_offset + cols {
            self.col_offset = cursor.col - cols + 1;
        }
    }

    /// Whether `cursor` lies within the `rows` x `cols` window
    pub fn contains(&self, cursor: Cursor, rows: usize, cols: usize) -> bool {
        cursor.line >= self.row_offset
            && cursor.line < self.row_offset + rows
            && cursor.col >= self.col_offset
            && cursor.col < self.col_offset + cols
    }
}
