//! Editor session
//!
//! Orchestrates the single-threaded read-dispatch-render loop: draw the
//! current state, block for one decoded key, mutate the model, repeat until
//! the quit chord. All state is owned here and mutated only on this thread;
//! the only blocking operation is the key read, which is correct because
//! the program has no other work while idle.

mod config;

pub use config::{Config, ConfigError};

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::{Cursor, Direction, TextBuffer, Viewport};
use crate::file;
use crate::input::{InputError, Key, KeyReader};
use crate::render::{self, Renderer, View};
use crate::term::{Size, TermError};

/// Error type for the editor session
///
/// Everything here is fatal: the session only surfaces errors that mean
/// the execution environment is unusable. Recoverable conditions
/// (malformed sequences, boundary edits) never become errors.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Couldn't load file {path}: {source}")]
    Load { path: String, source: io::Error },

    #[error("Couldn't save file {path}: {source}")]
    Save { path: String, source: io::Error },

    #[error("Failed to write frame to terminal: {0}")]
    Write(#[from] io::Error),
}

/// A transient status line message with a time-to-live
#[derive(Debug)]
struct StatusMessage {
    text: String,
    created_at: Instant,
}

impl StatusMessage {
    fn new(text: String) -> Self {
        Self {
            text,
            created_at: Instant::now(),
        }
    }

    /// Expired messages stop rendering but are not deleted
    fn is_live(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

/// The editor session: buffer, cursor, viewport, and the reader loop
#[derive(Debug)]
pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    viewport: Viewport,
    renderer: Renderer,
    /// Visible text area: terminal size minus the reserved chrome rows
    text_size: Size,
    file_name: String,
    status: Option<StatusMessage>,
    config: Config,
}

impl Editor {
    /// Create a session with an empty unnamed buffer
    pub fn new(config: Config, terminal: Size) -> Self {
        let text_size = Size {
            rows: terminal.rows.saturating_sub(config.reserved_rows),
            cols: terminal.cols,
        };
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::new(),
            viewport: Viewport::new(),
            renderer: Renderer::new(),
            text_size,
            file_name: String::new(),
            status: None,
            config,
        }
    }

    /// Load a file into the buffer, expanding tabs per the configuration
    pub fn open(&mut self, path: &str) -> Result<(), EditorError> {
        let lines = file::load_lines(path, self.config.tab_stop).map_err(|source| {
            EditorError::Load {
                path: path.to_string(),
                source,
            }
        })?;
        info!(path, lines = lines.len(), "loaded file");
        self.file_name = path.to_string();
        self.buffer = TextBuffer::from_lines(lines);
        Ok(())
    }

    /// The buffer being edited
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The current cursor position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Replace the status line message and restart its time-to-live
    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text.into()));
    }

    /// Run the reader loop until the quit chord or a fatal error.
    ///
    /// Input and output are injected so the session can run against stdin
    /// and stdout in production or scripted byte streams in tests.
    pub fn run<R: Read, W: Write>(
        &mut self,
        keys: &mut KeyReader<R>,
        out: &mut W,
    ) -> Result<(), EditorError> {
        loop {
            self.refresh_screen(out)?;
            let key = keys.read_key()?;
            if !self.dispatch(key)? {
                // Quit: leave a clean screen behind.
                out.write_all(render::CLEAR_SCREEN.as_bytes())?;
                out.write_all(render::CURSOR_HOME.as_bytes())?;
                out.flush()?;
                info!("session ended");
                return Ok(());
            }
        }
    }

    /// Repaint the whole frame and write it in a single flush
    fn refresh_screen<W: Write>(&mut self, out: &mut W) -> Result<(), EditorError> {
        self.viewport
            .scroll_to(self.cursor, self.text_size.rows, self.text_size.cols);

        let ttl = Duration::from_secs(self.config.message_ttl_secs);
        let message = self
            .status
            .as_ref()
            .filter(|m| m.is_live(ttl))
            .map(|m| m.text.as_str());

        let view = View {
            buffer: &self.buffer,
            cursor: self.cursor,
            viewport: self.viewport,
            rows: self.text_size.rows,
            cols: self.text_size.cols,
            file_name: &self.file_name,
            message,
        };
        let frame = self.renderer.render(&view);
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Apply one key event; returns `false` when the session should quit
    fn dispatch(&mut self, key: Key) -> Result<bool, EditorError> {
        match key {
            Key::Ctrl('q') => return Ok(false),
            Key::Ctrl('s') => self.save()?,
            Key::Enter => self.buffer.insert_newline(&mut self.cursor),
            Key::Backspace => self.buffer.delete_backward(&mut self.cursor),
            Key::Delete => {
                // Delete-forward is a right step followed by a backward delete.
                self.cursor.step(Direction::Right, &self.buffer);
                self.buffer.delete_backward(&mut self.cursor);
            }
            Key::ArrowUp => self.cursor.step(Direction::Up, &self.buffer),
            Key::ArrowDown => self.cursor.step(Direction::Down, &self.buffer),
            Key::ArrowLeft => self.cursor.step(Direction::Left, &self.buffer),
            Key::ArrowRight => self.cursor.step(Direction::Right, &self.buffer),
            Key::Home => self.cursor.home(),
            Key::End => self.cursor.end(&self.buffer),
            Key::PageUp => self.page(Direction::Up),
            Key::PageDown => self.page(Direction::Down),
            Key::Escape | Key::Ctrl('h') | Key::Ctrl('l') => {
                debug!(?key, "ignored key");
            }
            Key::Ctrl(letter) => {
                // Unbound chords splice their raw control code, like any
                // other unhandled key.
                self.buffer
                    .insert_char(&mut self.cursor, char::from(Key::chord(letter)));
            }
            Key::Char(c) => self.buffer.insert_char(&mut self.cursor, c),
        }
        Ok(true)
    }

    /// PageUp/PageDown: jump the cursor to the viewport edge, then take a
    /// full page of single steps so the usual clamping applies at the
    /// buffer boundaries
    fn page(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.cursor.line = self.viewport.row_offset,
            Direction::Down => {
                let bottom = self.viewport.row_offset + self.text_size.rows.saturating_sub(1);
                self.cursor.line = bottom.min(self.buffer.line_count());
            }
            Direction::Left | Direction::Right => return,
        }
        self.cursor.col = self.buffer.clamp_col(self.cursor.line, self.cursor.col);
        for _ in 0..self.text_size.rows {
            self.cursor.step(direction, &self.buffer);
        }
    }

    /// Write the buffer back to its file and clear the dirty flag
    fn save(&mut self) -> Result<(), EditorError> {
        if self.file_name.is_empty() {
            self.set_status_message("No file name set");
            return Ok(());
        }
        file::save_lines(&self.file_name, self.buffer.lines()).map_err(|source| {
            EditorError::Save {
                path: self.file_name.clone(),
                source,
            }
        })?;
        self.buffer.mark_saved();
        info!(path = %self.file_name, "saved file");
        self.set_status_message(format!("Saved file {}", self.file_name));
        Ok(())
    }
}
