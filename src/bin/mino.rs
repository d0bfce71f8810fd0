//! Mino - a minimal full-screen terminal text editor
//!
//! Usage: `mino [FILE]`. Opens the file (or an empty unnamed buffer),
//! switches the terminal into raw mode for the session, and restores it on
//! every exit path.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use mino::app::{Config, Editor};
use mino::input::KeyReader;
use mino::term::{self, RawModeGuard};

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The raw-mode guard has been dropped by the time we get here,
            // so the message lands on a usable terminal.
            eprintln!("{}", e);
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to the file named by `MINO_LOG`, if set. Stdout and stderr belong
/// to the frame renderer while the session runs, so there is no default
/// logging destination.
fn init_logging() {
    let Ok(path) = std::env::var("MINO_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

fn print_help() {
    eprintln!(
        r#"mino - a minimal terminal text editor

USAGE:
    mino [FILE]

KEYS:
    Ctrl-S    save
    Ctrl-Q    quit
    Arrows, Home, End, PageUp, PageDown    navigate

ENVIRONMENT:
    MINO_CONFIG    path to a JSON config file
    MINO_LOG       path to a log file (filtered by RUST_LOG)
"#
    );
}

fn run() -> Result<(), mino::EditorError> {
    let path = std::env::args().nth(1);
    if matches!(path.as_deref(), Some("-h" | "--help")) {
        print_help();
        return Ok(());
    }

    let config = match std::env::var("MINO_CONFIG") {
        Ok(config_path) => Config::load(config_path)?,
        Err(_) => Config::default(),
    };

    let size = term::window_size()?;
    let mut editor = Editor::new(config, size);
    if let Some(path) = &path {
        editor.open(path)?;
    }

    // Raw mode is scoped to the session; the guard restores the previous
    // attributes even when `run` returns an error.
    let _raw = RawModeGuard::enable()?;
    let mut keys = KeyReader::new(io::stdin());
    let mut out = io::stdout();
    editor.run(&mut keys, &mut out)
}
