//! File loading and saving
//!
//! The buffer's only persistence: read a file into lines at startup and
//! write the lines back on demand. Tabs are expanded to spaces at load
//! time so no stored line ever contains a tab character.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read a file into lines, expanding each tab to `tab_stop` spaces
pub fn load_lines<P: AsRef<Path>>(path: P, tab_stop: usize) -> io::Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let expanded = " ".repeat(tab_stop);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?.replace('\t', &expanded));
    }
    Ok(lines)
}

/// Write lines back to a file, joined with newlines, in one write
pub fn save_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> io::Result<()> {
    fs::write(path, lines.join("\n"))
}
