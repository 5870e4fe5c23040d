//! Line sequences and name replacement
//!
//! Every pass of the pipeline takes a [`LineSequence`] and returns a new one.
//! Lines keep the number they had in the original input, so a pass that
//! drops lines never shifts the location reported for a later error.

use ic10_common::{SourceLocation, TransformError, TransformResult};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// One line of source text, without its terminating newline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original input
    pub number: u32,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Location of a 0-based byte offset within this line
    pub fn location_at(&self, offset: usize) -> SourceLocation {
        let column = self.text[..offset.min(self.text.len())].chars().count() as u32 + 1;
        SourceLocation::new_simple(self.number, column)
    }
}

/// An ordered sequence of lines plus whether the text ended in a newline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<SourceLine>,
    trailing_newline: bool,
}

impl LineSequence {
    /// Split a text on `\n`
    pub fn parse(input: &str) -> Self {
        let lines = input
            .split_terminator('\n')
            .enumerate()
            .map(|(i, text)| SourceLine::new(i as u32 + 1, text))
            .collect();
        Self {
            lines,
            trailing_newline: input.ends_with('\n'),
        }
    }

    /// Build a sequence from bare line texts, numbered from 1, with no final newline
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| SourceLine::new(i as u32 + 1, text))
            .collect();
        Self {
            lines,
            trailing_newline: false,
        }
    }

    /// Join the lines back into text
    pub fn render(&self) -> String {
        let mut output = self
            .lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            output.push('\n');
        }
        output
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if `line` is the final line and the text did not end with a newline
    pub fn is_unterminated(&self, line: &SourceLine) -> bool {
        !self.trailing_newline
            && self
                .lines
                .last()
                .is_some_and(|last| last.number == line.number)
    }

    /// Keep only the lines matching `keep`
    pub fn retain(mut self, mut keep: impl FnMut(&SourceLine) -> bool) -> Self {
        self.lines.retain(|line| keep(line));
        self
    }

    /// Rewrite the text of every line
    pub fn map_text(mut self, mut rewrite: impl FnMut(&SourceLine) -> String) -> Self {
        for line in &mut self.lines {
            line.text = rewrite(line);
        }
        self
    }
}

/// How a name is matched when it is replaced by its value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Replacement {
    /// Only where the name is not part of a longer identifier
    #[default]
    WholeToken,
    /// Every occurrence, even inside other identifiers
    Substring,
}

/// Replaces every occurrence of one name with one value
#[derive(Debug, Clone)]
pub struct NameReplacer {
    name: String,
    value: String,
    pattern: Option<Regex>,
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

impl NameReplacer {
    pub fn new(name: &str, value: &str, policy: Replacement) -> TransformResult<Self> {
        let (Some(first), Some(last)) = (name.chars().next(), name.chars().last()) else {
            return Err(TransformError::InvalidPattern {
                message: "cannot replace an empty name".to_string(),
            });
        };

        let pattern = match policy {
            Replacement::Substring => None,
            Replacement::WholeToken => {
                // \b only holds next to a word character
                let start = if is_word_char(first) { r"\b" } else { "" };
                let end = if is_word_char(last) { r"\b" } else { "" };
                let source = format!("{start}{}{end}", regex::escape(name));
                let regex = Regex::new(&source).map_err(|e| TransformError::InvalidPattern {
                    message: format!("`{name}`: {e}"),
                })?;
                Some(regex)
            }
        };

        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            pattern,
        })
    }

    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(regex) => regex.replace_all(text, NoExpand(self.value.as_str())),
            None if text.contains(self.name.as_str()) => {
                Cow::Owned(text.replace(self.name.as_str(), &self.value))
            }
            None => Cow::Borrowed(text),
        }
    }
}

/// Apply each replacer in order to every line
pub fn replace_all(lines: LineSequence, replacers: &[NameReplacer]) -> LineSequence {
    if replacers.is_empty() {
        return lines;
    }
    lines.map_text(|line| {
        replacers
            .iter()
            .fold(line.text.clone(), |text, replacer| replacer.apply(&text).into_owned())
    })
}
