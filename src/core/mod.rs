//! Editor core model
//!
//! The pure data side of the editor: the line-oriented text buffer, the
//! logical cursor, and the scroll viewport. Nothing in this module performs
//! I/O; every operation is addressed by (line, column) and clamps at the
//! buffer boundaries instead of panicking.

mod buffer;
mod cursor;
mod viewport;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Direction};
pub use viewport::Viewport;
