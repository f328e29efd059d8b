//! Shared helper functions for CLI commands

use std::io::{self, BufRead, IsTerminal};

/// Read event lines from stdin if it is piped (Unix philosophy support)
///
/// Returns `Some(lines)` when stdin is not a terminal, even if it is empty,
/// or `None` when stdin is a terminal (interactive mode).
///
/// This enables scripted sessions like:
/// ```bash
/// printf 'slider angle 30\ntext gears 500\n' | fac session
/// ```
pub fn read_lines_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        return None;
    }

    Some(collect_lines(stdin.lock()))
}

/// Collect non-empty lines from a reader, stopping at the first read error
pub fn collect_lines<R: BufRead>(reader: R) -> Vec<String> {
    reader
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Format a signed difference with an explicit sign
pub fn format_signed(value: f64, decimals: usize) -> String {
    if value >= 0.0 {
        format!("+{:.*}", decimals, value)
    } else {
        format!("{:.*}", decimals, value)
    }
}
