//! IC10 chip limits
//!
//! A chip accepts at most 128 lines of at most 52 characters. Exceeding
//! either is reported as a warning; the transformed text is still produced.

use crate::lines::LineSequence;
use ic10_common::{Diagnostic, DiagnosticReport, SourceLocation};

pub const MAX_LINE_LENGTH: usize = 52;
pub const MAX_LINES: usize = 128;

/// Check a transformed program against the chip limits
///
/// Locations refer to lines of the transformed program.
pub fn check_limits(program: &LineSequence) -> DiagnosticReport {
    let mut report = DiagnosticReport::new();

    for (index, line) in program.lines().iter().enumerate() {
        let length = line.text.chars().count();
        if length > MAX_LINE_LENGTH {
            let location = SourceLocation::new_simple(index as u32 + 1, MAX_LINE_LENGTH as u32 + 1);
            report.push(
                Diagnostic::warning(
                    format!("line is {length} characters long, the limit is {MAX_LINE_LENGTH}"),
                    location,
                )
                .with_note(format!("from source line {}", line.number)),
            );
        }
    }

    if program.len() > MAX_LINES {
        report.warning(
            format!("program has {} lines, the limit is {MAX_LINES}", program.len()),
            SourceLocation::new_simple(MAX_LINES as u32 + 1, 1),
        );
    }

    report
}
