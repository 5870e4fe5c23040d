//! Label resolution
//!
//! A label line is `<name>:` alone on a line. Label lines are removed and
//! every reference to the label is replaced by the 0-based index of the line
//! that followed it, counted after all label lines are gone. Labels are
//! located in one pass over the stable line records and the lines are
//! filtered in a second, so no index is ever computed against a sequence
//! that is still shrinking.

use crate::lines::{replace_all, LineSequence, NameReplacer, Replacement, SourceLine};
use ic10_common::{SourceLocation, TransformError, TransformResult};
use log::debug;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Index of the target line in the output
    pub line_index: usize,
    pub location: SourceLocation,
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The label declared by `line`, if it is a label line
///
/// A line whose first `:` (past column 1) ends the line, with no whitespace
/// in front of it except indentation, is label-looking. If what precedes the
/// colon is not an identifier the label cannot be used.
fn label_declaration(line: &SourceLine) -> TransformResult<Option<&str>> {
    let text = line.text.trim_end();
    let colon = match text.find(':') {
        Some(pos) if pos > 0 => pos,
        _ => return Ok(None),
    };
    if colon + 1 != text.len() {
        return Ok(None);
    }

    let name = text[..colon].trim_start();
    if name.contains(char::is_whitespace) {
        return Ok(None);
    }
    if !is_identifier(name) {
        return Err(TransformError::UnterminatedLabel {
            location: line.location_at(0),
            text: line.text.clone(),
        });
    }
    Ok(Some(name))
}

/// Find every label and the output index it points at
pub fn collect_labels(lines: &LineSequence) -> TransformResult<Vec<Label>> {
    let mut labels: Vec<Label> = Vec::new();
    let mut seen: HashMap<&str, u32> = HashMap::new();
    let mut kept = 0usize;

    for line in lines.lines() {
        let Some(name) = label_declaration(line)? else {
            kept += 1;
            continue;
        };
        if let Some(&first_line) = seen.get(name) {
            return Err(TransformError::DuplicateLabel {
                location: line.location_at(0),
                name: name.to_string(),
                first_line,
            });
        }
        seen.insert(name, line.number);
        labels.push(Label {
            name: name.to_string(),
            line_index: kept,
            location: line.location_at(0),
        });
    }

    Ok(labels)
}

/// Remove label lines and replace label references with line indices
pub fn resolve_labels(lines: LineSequence, replacement: Replacement) -> TransformResult<LineSequence> {
    let labels = collect_labels(&lines)?;
    if labels.is_empty() {
        return Ok(lines);
    }

    let label_lines: HashSet<u32> = labels.iter().map(|label| label.location.line).collect();
    let replacers = labels
        .iter()
        .map(|label| {
            debug!("label {} -> {}", label.name, label.line_index);
            NameReplacer::new(&label.name, &label.line_index.to_string(), replacement)
        })
        .collect::<TransformResult<Vec<_>>>()?;

    let lines = lines.retain(|line| !label_lines.contains(&line.number));
    Ok(replace_all(lines, &replacers))
}
