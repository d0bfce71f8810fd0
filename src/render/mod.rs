//! Frame rendering
//!
//! Builds one escape-sequence-annotated frame per call into a reusable
//! string buffer, so the session can write it to the terminal in a single
//! flush. Every frame is a full repaint; each row ends with an
//! erase-to-end-of-line so stale content from a longer previous frame
//! never survives. No diffing against the previous frame is attempted —
//! full repaints are cheap at interactive typing speeds.

use crate::core::{Cursor, TextBuffer, Viewport};

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const ERASE_LINE: &str = "\x1b[K";
pub const INVERT_VIDEO: &str = "\x1b[7m";
pub const RESET_STYLE: &str = "\x1b[m";

/// Title banner shown while the buffer is empty
const TITLE: &str = "Mino editor - pre alpha";

/// Maximum file name length shown in the status bar
const STATUS_NAME_LEN: usize = 20;

/// Everything the renderer needs to draw one frame
#[derive(Debug)]
pub struct View<'a> {
    pub buffer: &'a TextBuffer,
    pub cursor: Cursor,
    pub viewport: Viewport,
    /// Visible text rows (terminal rows minus the two chrome rows)
    pub rows: usize,
    /// Visible columns
    pub cols: usize,
    pub file_name: &'a str,
    /// Status message, already filtered by its time-to-live
    pub message: Option<&'a str>,
}

/// Builds frames into a reusable buffer
#[derive(Debug, Default)]
pub struct Renderer {
    frame: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one full frame and return it for writing
    pub fn render(&mut self, view: &View) -> &str {
        self.frame.clear();
        self.frame.push_str(HIDE_CURSOR);
        self.frame.push_str(CURSOR_HOME);
        self.draw_rows(view);
        self.draw_status_bar(view);
        self.draw_message_bar(view);
        self.place_cursor(view);
        self.frame.push_str(SHOW_CURSOR);
        &self.frame
    }

    /// Draw the visible slice of every buffer row, `~` filler past the end
    /// of the buffer, and the title banner once while the buffer is empty
    fn draw_rows(&mut self, view: &View) {
        for y in 0..view.rows {
            let file_row = y + view.viewport.row_offset;
            if file_row >= view.buffer.line_count() {
                if view.buffer.line_count() == 0 && y == view.rows / 3 {
                    self.draw_banner(view.cols);
                } else {
                    self.frame.push('~');
                }
            } else {
                let line = view.buffer.line(file_row).unwrap_or("");
                let start = view.buffer.clamp_col(file_row, view.viewport.col_offset);
                let end = view
                    .buffer
                    .clamp_col(file_row, view.viewport.col_offset + view.cols);
                self.frame.push_str(&line[start..end]);
            }
            self.frame.push_str(ERASE_LINE);
            self.frame.push_str("\r\n");
        }
    }

    fn draw_banner(&mut self, cols: usize) {
        let title: String = TITLE.chars().take(cols).collect();
        let padding = cols.saturating_sub(title.len()) / 2;
        for _ in 0..padding {
            self.frame.push(' ');
        }
        self.frame.push_str(&title);
    }

    /// Inverse-video status bar: file name (truncated), line count, dirty
    /// marker on the left; `line+1:col` on the right; padded to the full
    /// terminal width
    fn draw_status_bar(&mut self, view: &View) {
        let name: String = view.file_name.chars().take(STATUS_NAME_LEN).collect();
        let mut left = format!("{} - {}", name, view.buffer.line_count());
        if view.buffer.is_dirty() {
            left.push_str(" [+]");
        }
        let right = format!("{}:{}", view.cursor.line + 1, view.cursor.col);

        let padding = view.cols.saturating_sub(left.len() + right.len());
        let mut bar = left;
        for _ in 0..padding {
            bar.push(' ');
        }
        bar.push_str(&right);
        truncate_to_width(&mut bar, view.cols);

        self.frame.push_str(INVERT_VIDEO);
        self.frame.push_str(&bar);
        self.frame.push_str(RESET_STYLE);
        self.frame.push_str("\r\n");
    }

    /// Message bar: the status message while it is live, otherwise blank
    fn draw_message_bar(&mut self, view: &View) {
        self.frame.push_str(ERASE_LINE);
        if let Some(message) = view.message {
            let mut message = message.to_string();
            truncate_to_width(&mut message, view.cols);
            self.frame.push_str(&message);
        }
    }

    /// Position the real terminal cursor at the screen coordinate derived
    /// from the logical cursor minus the viewport offset (1-indexed)
    fn place_cursor(&mut self, view: &View) {
        let row = view.cursor.line - view.viewport.row_offset + 1;
        let col = view.cursor.col - view.viewport.col_offset + 1;
        self.frame.push_str(&format!("\x1b[{};{}H", row, col));
    }
}

/// Truncate a string to at most `width` bytes on a `char` boundary
fn truncate_to_width(s: &mut String, width: usize) {
    if s.len() <= width {
        return;
    }
    let mut end = width;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    fn view<'a>(buf: &'a TextBuffer, rows: usize, cols: usize) -> View<'a> {
        View {
            buffer: buf,
            cursor: Cursor::new(),
            viewport: Viewport::new(),
            rows,
            cols,
            file_name: "test.txt",
            message: None,
        }
    }

    #[test]
    fn test_frame_starts_hidden_and_homed() {
        let buf = buffer(&["hello"]);
        let mut renderer = Renderer::new();
        let frame = renderer.render(&view(&buf, 5, 40));
        assert!(frame.starts_with("\x1b[?25l\x1b[H"));
        assert!(frame.ends_with(SHOW_CURSOR));
    }

    #[test]
    fn test_rows_past_buffer_end_are_tildes() {
        let buf = buffer(&["one"]);
        let mut renderer = Renderer::new();
        let frame = renderer.render(&view(&buf, 4, 40)).to_string();
        assert!(frame.contains("one\x1b[K\r\n"));
        assert_eq!(frame.matches("~\x1b[K\r\n").count(), 3);
    }

    #[test]
    fn test_banner_drawn_once_on_empty_buffer() {
        let buf = TextBuffer::new();
        let mut renderer = Renderer::new();
        let frame = renderer.render(&view(&buf, 9, 60)).to_string();
        assert_eq!(frame.matches(TITLE).count(), 1);
        // Every other text row is a tilde
        assert_eq!(frame.matches("~\x1b[K\r\n").count(), 8);
    }

    #[test]
    fn test_no_banner_when_buffer_has_lines() {
        let buf = buffer(&["x"]);
        let mut renderer = Renderer::new();
        let frame = renderer.render(&view(&buf, 9, 60)).to_string();
        assert!(!frame.contains(TITLE));
    }

    #[test]
    fn test_horizontal_slice_respects_offsets() {
        let buf = buffer(&["0123456789"]);
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 1, 4);
        v.viewport.col_offset = 3;
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains("3456\x1b[K"));
        assert!(!frame.contains("2345678"));
    }

    #[test]
    fn test_status_bar_contents() {
        let mut buf = buffer(&["a", "b"]);
        let mut cursor = Cursor { col: 1, line: 0 };
        buf.insert_char(&mut cursor, 'x');
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 2, 40);
        v.cursor = cursor;
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains(INVERT_VIDEO));
        assert!(frame.contains("test.txt - 2 [+]"));
        assert!(frame.contains("1:2"));
        assert!(frame.contains(RESET_STYLE));
    }

    #[test]
    fn test_status_bar_truncates_long_file_name() {
        let buf = buffer(&["a"]);
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 1, 60);
        v.file_name = "a_very_long_file_name_that_keeps_going.txt";
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains("a_very_long_file_nam - 1"));
        assert!(!frame.contains("keeps_going"));
    }

    #[test]
    fn test_message_bar_shows_live_message() {
        let buf = buffer(&["a"]);
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 1, 40);
        v.message = Some("saved");
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains("saved"));
    }

    #[test]
    fn test_message_truncated_to_width() {
        let buf = buffer(&["a"]);
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 1, 5);
        v.message = Some("a message longer than the bar");
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains("a mes"));
        assert!(!frame.contains("longer"));
    }

    #[test]
    fn test_cursor_placed_relative_to_viewport() {
        let buf = buffer(&["abc"; 50]);
        let mut renderer = Renderer::new();
        let mut v = view(&buf, 10, 40);
        v.cursor = Cursor { col: 2, line: 25 };
        v.viewport.row_offset = 20;
        let frame = renderer.render(&v).to_string();
        assert!(frame.contains("\x1b[6;3H"));
    }
}
