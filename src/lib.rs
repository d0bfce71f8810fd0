//! Mino Text Editor Library
//!
//! A minimal full-screen terminal text editor built from scratch without
//! terminal UI libraries. This crate provides:
//!
//! - `core`: Text buffer, cursor, and viewport model
//! - `input`: Key events and the escape-sequence decoder
//! - `term`: Raw mode handling and terminal size queries
//! - `render`: Full-repaint frame rendering
//! - `app`: The editor session that ties everything together
//! - `file`: Loading and saving line-oriented text files

pub mod app;
pub mod core;
pub mod file;
pub mod input;
pub mod render;
pub mod term;

pub use app::{Editor, EditorError};
pub use core::{Cursor, Direction, TextBuffer, Viewport};
pub use input::{Key, KeyReader};
pub use term::Size;
