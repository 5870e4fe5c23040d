//! Blank line removal

use crate::lines::LineSequence;
use log::trace;

/// Which padding characters make a line count as blank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlankLineOptions {
    /// Also treat `.` as padding
    pub ignore_periods: bool,
}

impl BlankLineOptions {
    fn is_padding(&self, ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\r') || (self.ignore_periods && ch == '.')
    }
}

/// A line is blank when every character is padding
pub fn is_blank(line: &str, options: BlankLineOptions) -> bool {
    line.chars().all(|ch| options.is_padding(ch))
}

/// Drop blank lines, keeping every other line verbatim
pub fn remove_blank_lines(lines: LineSequence, options: BlankLineOptions) -> LineSequence {
    lines.retain(|line| {
        let blank = is_blank(&line.text, options);
        if blank {
            trace!("Dropping blank line {}", line.number);
        }
        !blank
    })
}

/// Drop blank lines from a text
pub fn remove_blank(text: &str, options: BlankLineOptions) -> String {
    remove_blank_lines(LineSequence::parse(text), options).render()
}
