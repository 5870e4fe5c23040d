//! Comment removal
//!
//! IC10 comments run from `#` to the end of the line. A `#` sitting at the
//! very start of the text (or of a directive value) is not a comment start
//! and is kept verbatim.

use crate::lines::LineSequence;

pub const COMMENT_MARKER: char = '#';

/// Byte offset of the first comment marker past `min_offset`
fn comment_start(text: &str, min_offset: usize) -> Option<usize> {
    text.match_indices(COMMENT_MARKER)
        .map(|(pos, _)| pos)
        .find(|&pos| pos >= min_offset)
}

/// Strip a trailing comment from a single directive value
pub fn strip_value_comment(value: &str) -> &str {
    match comment_start(value, 1) {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

/// Strip comments from every line of a document
///
/// The newline of a commented line survives, so a line that held only a
/// comment becomes empty rather than merging with its neighbour. A `\r`
/// ending the line is kept so CRLF input stays CRLF.
pub fn strip_comments(lines: LineSequence) -> LineSequence {
    let first_line = lines.lines().first().map(|line| line.number);
    lines.map_text(|line| {
        let min_offset = if Some(line.number) == first_line { 1 } else { 0 };
        match comment_start(&line.text, min_offset) {
            Some(pos) => {
                let mut kept = line.text[..pos].trim_end_matches([' ', '\t']).to_string();
                if line.text.ends_with('\r') {
                    kept.push('\r');
                }
                kept
            }
            None => line.text.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &str) -> String {
        strip_comments(LineSequence::parse(input)).render()
    }

    #[test]
    fn test_value_comment() {
        assert_eq!(strip_value_comment("10 # ten"), "10");
        assert_eq!(strip_value_comment("d0#sensor"), "d0");
        assert_eq!(strip_value_comment("10"), "10");
    }

    #[test]
    fn test_value_leading_marker_is_kept() {
        assert_eq!(strip_value_comment("# not a comment"), "# not a comment");
        // A later marker is still a comment
        assert_eq!(strip_value_comment("#5 # five"), "#5");
    }

    #[test]
    fn test_trailing_comment_keeps_newline() {
        assert_eq!(strip("move r0 1 # set register\n"), "move r0 1\n");
        assert_eq!(strip("move r0 1 # a\nyield # b\n"), "move r0 1\nyield\n");
    }

    #[test]
    fn test_comment_only_line_becomes_empty() {
        assert_eq!(strip("yield\n# loop forever\nj 0\n"), "yield\n\nj 0\n");
    }

    #[test]
    fn test_marker_at_document_start_is_kept() {
        assert_eq!(strip("# header\nyield\n"), "# header\nyield\n");
        assert_eq!(strip("# header # note\nyield\n"), "# header\nyield\n");
    }

    #[test]
    fn test_marker_at_start_of_later_line_is_a_comment() {
        assert_eq!(strip("yield\n# later\n"), "yield\n\n");
    }

    #[test]
    fn test_crlf_line_ending_survives() {
        assert_eq!(strip("a # x\r\nb\r\n"), "a\r\nb\r\n");
        assert_eq!(strip("yield\r\n# note\r\nj 0\r\n"), "yield\r\n\r\nj 0\r\n");
    }

    #[test]
    fn test_indented_comment_on_first_line() {
        assert_eq!(strip("  # header\nyield"), "\nyield");
    }
}
