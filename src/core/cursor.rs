//! Logical cursor and movement rules
//!
//! The cursor addresses the text buffer in logical (line, column)
//! coordinates, never screen coordinates. Movement clamps at the buffer
//! edges; the line one past the last real line is a legal position and
//! represents "about to append".

use super::buffer::TextBuffer;

/// A single-step movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Logical cursor position into a [`TextBuffer`]
///
/// `col` is a byte offset into the line, always on a `char` boundary.
/// Invariant: `line <= buffer.line_count()`, and `col <= line_len(line)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Column (byte offset into the line)
    pub col: usize,
    /// Line index
    pub line: usize,
}

impl Cursor {
    /// Create a cursor at the buffer origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one step in the given direction, clamping at buffer edges.
    ///
    /// Right at the end of a line wraps to the start of the next line;
    /// Left at column 0 wraps to the end of the previous line. After any
    /// vertical move the column snaps to the end of a shorter target line.
    pub fn step(&mut self, direction: Direction, buffer: &TextBuffer) {
        let row_len = buffer.line_len(self.line);
        match direction {
            Direction::Up => {
                if self.line > 0 {
                    self.line -= 1;
                }
            }
            Direction::Down => {
                if self.line < buffer.line_count() {
                    self.line += 1;
                }
            }
            Direction::Right => {
                if self.col < row_len {
                    self.col = buffer.col_after(self.line, self.col);
                } else if self.col == row_len && self.line < buffer.line_count() {
                    self.line += 1;
                    self.col = 0;
                }
            }
            Direction::Left => {
                if self.col > 0 {
                    self.col = buffer.col_before(self.line, self.col);
                } else if self.line > 0 {
                    self.line -= 1;
                    self.col = buffer.line_len(self.line);
                }
            }
        }

        // Moving onto a shorter line snaps the column to that line's end.
        let row_len = buffer.line_len(self.line);
        if self.col > row_len {
            self.col = buffer.clamp_col(self.line, self.col);
        }
    }

    /// Jump to column 0 (Home)
    pub fn home(&mut self) {
        self.col = 0;
    }

    /// Jump to the end of the current line (End); no-op past the last line
    pub fn end(&mut self, buffer: &TextBuffer) {
        if self.line < buffer.line_count() {
            self.col = buffer.line_len(self.line);
        }
    }
}
