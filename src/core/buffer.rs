//! Line-oriented text buffer
//!
//! The buffer owns an ordered sequence of lines (no embedded newlines) and
//! exposes the edit operations the editor needs: splice a character, split a
//! line, join two lines. The backing container is private so the invariant
//! "line indices 0..N-1 are contiguous" is enforced at this API boundary
//! rather than by caller convention.
//!
//! Columns are byte offsets into a line. Every column handed back by this
//! module lies on a `char` boundary, so rune pass-through input can never
//! produce an out-of-boundary splice.

use super::cursor::Cursor;

/// An ordered sequence of text lines with a modification flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    /// The lines, in visual order
    lines: Vec<String>,
    /// True if the buffer has unsaved mutations
    dirty: bool,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from pre-loaded lines (e.g. a file's contents)
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            dirty: false,
        }
    }

    /// Number of lines in the buffer
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the line at the given index
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Byte length of the line at the given index, or 0 past the end
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, String::len)
    }

    /// All lines, for handing to the save collaborator
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the buffer has unsaved mutations
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Splice a character into the line under the cursor and advance the
    /// cursor past it. A cursor on the append position (one past the last
    /// line) grows the buffer by an empty line first.
    pub fn insert_char(&mut self, cursor: &mut Cursor, c: char) {
        if cursor.line == self.lines.len() {
            self.lines.push(String::new());
        }
        let Some(line) = self.lines.get_mut(cursor.line) else {
            return;
        };
        let col = clamp_to_boundary(line, cursor.col);
        line.insert(col, c);
        cursor.col = col + c.len_utf8();
        self.dirty = true;
    }

    /// Split the line under the cursor at the cursor column. At column 0 an
    /// empty line is inserted above instead; otherwise the text right of the
    /// cursor becomes a new next line. The cursor always ends up on the line
    /// below, at column 0 when a split happened.
    pub fn insert_newline(&mut self, cursor: &mut Cursor) {
        let index = cursor.line.min(self.lines.len());
        if cursor.col == 0 || index == self.lines.len() {
            self.lines.insert(index, String::new());
        } else {
            let col = clamp_to_boundary(&self.lines[index], cursor.col);
            let rest = self.lines[index].split_off(col);
            self.lines.insert(index + 1, rest);
            cursor.col = 0;
        }
        cursor.line = index + 1;
        self.dirty = true;
    }

    /// Remove the character left of the cursor, or join the current line
    /// onto the previous one when the cursor is at column 0. A no-op at the
    /// buffer start and on the append position past the last line.
    pub fn delete_backward(&mut self, cursor: &mut Cursor) {
        if cursor.line >= self.lines.len() {
            return;
        }
        if cursor.line == 0 && cursor.col == 0 {
            return;
        }
        if cursor.col > 0 {
            let line = &mut self.lines[cursor.line];
            let prev = prev_char_boundary(line, cursor.col);
            line.remove(prev);
            cursor.col = prev;
        } else {
            let removed = self.lines.remove(cursor.line);
            let previous = &mut self.lines[cursor.line - 1];
            cursor.col = previous.len();
            previous.push_str(&removed);
            cursor.line -= 1;
        }
        self.dirty = true;
    }

    /// Clamp a column into the line at `line`, snapping down to a `char`
    /// boundary. Returns 0 for lines past the end of the buffer.
    pub fn clamp_col(&self, line: usize, col: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |s| clamp_to_boundary(s, col))
    }

    /// The column one character right of `col` in the line at `line`,
    /// clamped to the line end
    pub fn col_after(&self, line: usize, col: usize) -> usize {
        let Some(s) = self.lines.get(line) else {
            return 0;
        };
        let mut next = col.saturating_add(1).min(s.len());
        while next < s.len() && !s.is_char_boundary(next) {
            next += 1;
        }
        next
    }

    /// The column one character left of `col` in the line at `line`
    pub fn col_before(&self, line: usize, col: usize) -> usize {
        self.lines
            .get(line)
            .map_or(0, |s| prev_char_boundary(s, col))
    }
}

/// Clamp `col` to the length of `s` and snap down to a `char` boundary
fn clamp_to_boundary(s: &str, col: usize) -> usize {
    let mut col = col.min(s.len());
    while col > 0 && !s.is_char_boundary(col) {
        col -= 1;
    }
    col
}

/// The largest `char` boundary strictly below `col` (0 if none)
fn prev_char_boundary(s: &str, col: usize) -> usize {
    let col = col.min(s.len());
    (0..col).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_insert_char_mid_line() {
        let mut buf = buffer(&["abc"]);
        let mut cursor = Cursor { col: 1, line: 0 };
        buf.insert_char(&mut cursor, 'x');
        assert_eq!(buf.line(0), Some("axbc"));
        assert_eq!(cursor, Cursor { col: 2, line: 0 });
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_char_appends_line_past_end() {
        let mut buf = TextBuffer::new();
        let mut cursor = Cursor::default();
        buf.insert_char(&mut cursor, 'a');
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some("a"));
        assert_eq!(cursor, Cursor { col: 1, line: 0 });
    }

    #[test]
    fn test_insert_then_delete_restores_line() {
        let mut buf = buffer(&["hello"]);
        let mut cursor = Cursor { col: 3, line: 0 };
        buf.insert_char(&mut cursor, 'z');
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.line(0), Some("hello"));
        assert_eq!(cursor, Cursor { col: 3, line: 0 });
    }

    #[test]
    fn test_insert_newline_splits_line() {
        // Scenario: ["ab"], cursor (0,1) -> ["a","b"], cursor (1,0)
        let mut buf = buffer(&["ab"]);
        let mut cursor = Cursor { col: 1, line: 0 };
        buf.insert_newline(&mut cursor);
        assert_eq!(buf.lines(), &["a".to_string(), "b".to_string()]);
        assert_eq!(cursor, Cursor { col: 0, line: 1 });
    }

    #[test]
    fn test_insert_newline_at_column_zero_inserts_above() {
        let mut buf = buffer(&["ab"]);
        let mut cursor = Cursor { col: 0, line: 0 };
        buf.insert_newline(&mut cursor);
        assert_eq!(buf.lines(), &["".to_string(), "ab".to_string()]);
        assert_eq!(cursor, Cursor { col: 0, line: 1 });
    }

    #[test]
    fn test_delete_backward_joins_lines() {
        // Scenario: ["a","b"], cursor (1,0) -> ["ab"], cursor (0,1)
        let mut buf = buffer(&["a", "b"]);
        let mut cursor = Cursor { col: 0, line: 1 };
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.lines(), &["ab".to_string()]);
        assert_eq!(cursor, Cursor { col: 1, line: 0 });
    }

    #[test]
    fn test_split_then_join_are_inverses() {
        let mut buf = buffer(&["abcdef"]);
        let mut cursor = Cursor { col: 4, line: 0 };
        buf.insert_newline(&mut cursor);
        assert_eq!(buf.lines(), &["abcd".to_string(), "ef".to_string()]);
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.lines(), &["abcdef".to_string()]);
        assert_eq!(cursor, Cursor { col: 4, line: 0 });
    }

    #[test]
    fn test_delete_backward_at_buffer_start_is_noop() {
        let mut buf = buffer(&["abc"]);
        let mut cursor = Cursor::default();
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.line(0), Some("abc"));
        assert_eq!(cursor, Cursor::default());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_backward_past_last_line_is_noop() {
        let mut buf = buffer(&["abc"]);
        let mut cursor = Cursor { col: 0, line: 1 };
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.line_count(), 1);
        assert_eq!(cursor, Cursor { col: 0, line: 1 });
    }

    #[test]
    fn test_join_into_empty_previous_line() {
        let mut buf = buffer(&["", "xy"]);
        let mut cursor = Cursor { col: 0, line: 1 };
        buf.delete_backward(&mut cursor);
        assert_eq!(buf.lines(), &["xy".to_string()]);
        assert_eq!(cursor, Cursor { col: 0, line: 0 });
    }

    #[test]
    fn test_mark_saved_clears_dirty() {
        let mut buf = buffer(&["a"]);
        let mut cursor = Cursor { col: 1, line: 0 };
        buf.insert_char(&mut cursor, 'b');
        assert!(buf.is_dirty());
        buf.mark_saved();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_clamp_col_snaps_to_char_boundary() {
        let buf = buffer(&["aé"]); // 'é' is two bytes, boundary at 1 and 3
        assert_eq!(buf.clamp_col(0, 2), 1);
        assert_eq!(buf.clamp_col(0, 3), 3);
        assert_eq!(buf.clamp_col(0, 99), 3);
        assert_eq!(buf.clamp_col(5, 2), 0);
    }

    #[test]
    fn test_col_stepping_over_multibyte_rune() {
        let buf = buffer(&["aé b"]);
        assert_eq!(buf.col_after(0, 1), 3);
        assert_eq!(buf.col_before(0, 3), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_insert_then_delete_is_identity(
                s in "[a-z]{0,20}",
                col in 0usize..=20,
                c in proptest::char::range('a', 'z'),
            ) {
                let col = col.min(s.len());
                let mut buf = TextBuffer::from_lines(vec![s.clone()]);
                let mut cursor = Cursor { col, line: 0 };
                buf.insert_char(&mut cursor, c);
                buf.delete_backward(&mut cursor);
                prop_assert_eq!(buf.line(0), Some(s.as_str()));
                prop_assert_eq!(cursor, Cursor { col, line: 0 });
            }

            #[test]
            fn prop_split_then_join_is_identity(s in "[a-z]{0,20}", col in 0usize..=20) {
                let col = col.min(s.len());
                let mut buf = TextBuffer::from_lines(vec![s.clone()]);
                let mut cursor = Cursor { col, line: 0 };
                buf.insert_newline(&mut cursor);
                buf.delete_backward(&mut cursor);
                prop_assert_eq!(buf.lines(), &[s.clone()]);
                prop_assert_eq!(cursor, Cursor { col, line: 0 });
            }
        }
    }
}
