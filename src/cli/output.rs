//! Shared CLI output helpers for consistent operator-facing text.

use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Print a successful status line.
pub fn ok(message: &str) {
    println!(
        "{} {message}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green())
    );
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!(
        "{} {message}",
        "⚠".if_supports_color(Stream::Stdout, |s| s.yellow())
    );
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!(
        "{} {message}",
        "✗".if_supports_color(Stream::Stderr, |s| s.red())
    );
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Render rows as a rounded-border table, or a note when empty.
pub fn table<T: Tabled>(rows: &[T], empty_message: &str) {
    if rows.is_empty() {
        note(empty_message);
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
