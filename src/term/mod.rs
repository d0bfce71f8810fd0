//! Terminal mode and size handling
//!
//! Raw input mode is a process-wide terminal setting, so it is modeled as a
//! scoped resource: [`RawModeGuard::enable`] captures the current attributes
//! and the guard restores them on drop, on every exit path including fatal
//! errors. Window size is read with the `TIOCGWINSZ` ioctl.

use std::io;

use nix::libc;
use nix::sys::termios::{self, SetArg, Termios};

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to enter raw mode: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("Failed to get terminal size: {0}")]
    WindowSize(#[source] nix::Error),

    #[error("Terminal reported a zero-sized window")]
    ZeroSize,
}

/// Terminal dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    /// Create a size from columns and rows
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { rows, cols }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Scoped raw-mode acquisition for the controlling terminal
///
/// Raw mode stays active for the lifetime of the guard; dropping it
/// restores the attributes captured at enable time.
#[derive(Debug)]
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    /// Switch stdin into raw mode, returning a guard that restores the
    /// previous attributes on drop
    pub fn enable() -> Result<Self, TermError> {
        let original = termios::tcgetattr(io::stdin()).map_err(TermError::GetAttr)?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw).map_err(TermError::SetAttr)?;
        tracing::debug!("entered raw mode");
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original) {
            // Nothing sensible to do here; the process is on its way out.
            tracing::error!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Query the window size of the controlling terminal
pub fn window_size() -> Result<Size, TermError> {
    let mut winsize = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut winsize) };

    if result < 0 {
        return Err(TermError::WindowSize(nix::errno::Errno::last()));
    }
    if winsize.ws_row == 0 || winsize.ws_col == 0 {
        return Err(TermError::ZeroSize);
    }
    Ok(Size {
        rows: winsize.ws_row as usize,
        cols: winsize.ws_col as usize,
    })
}
