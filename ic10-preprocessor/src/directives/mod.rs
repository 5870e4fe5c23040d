//! `define` and `alias` substitution
//!
//! A declaration `define <name> <value>` (or `alias <name> <value>`) is
//! removed from the program and every occurrence of `<name>` in the
//! remaining lines is replaced by `<value>`. Substitution runs in two
//! phases: all declarations of one keyword are collected first, in the order
//! they appear, then their lines are dropped and the values applied in that
//! same order. A value may use names declared above it.

use crate::comments::strip_value_comment;
use crate::hash::{hash, HashFormat};
use crate::lines::{replace_all, LineSequence, NameReplacer, Replacement, SourceLine};
use ic10_common::{DirectiveFault, SourceLocation, TransformError, TransformResult};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const HASH_MARKER: &str = "HASH(";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Define,
    Alias,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Define => "define",
            Keyword::Alias => "alias",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub keyword: Keyword,
    pub name: String,
    /// Value as written, after substitution of earlier names
    pub raw_value: String,
    /// Value that replaces the name: comment stripped, `HASH(...)` folded
    pub value: String,
    pub location: SourceLocation,
}

/// Name and raw value of a declaration line, plus the byte offset of the value
struct Declaration<'a> {
    name: &'a str,
    value: &'a str,
    value_offset: usize,
}

fn malformed(line: &SourceLine, offset: usize, keyword: Keyword, reason: DirectiveFault) -> TransformError {
    TransformError::MalformedDirective {
        location: line.location_at(offset),
        keyword: keyword.to_string(),
        reason,
    }
}

/// Recognise a declaration line of `keyword`
///
/// Only lines that start (after indentation) with the keyword followed by
/// whitespace are declarations; `defined`, `# define` and the like are not.
fn parse_declaration<'a>(
    line: &'a SourceLine,
    keyword: Keyword,
    unterminated: bool,
) -> TransformResult<Option<Declaration<'a>>> {
    let text = line.text.as_str();
    let start = text.len() - text.trim_start().len();
    let Some(rest) = text[start..].strip_prefix(keyword.as_str()) else {
        return Ok(None);
    };
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }

    let rest_offset = text.len() - rest.len();
    let name_start = text.len() - rest.trim_start().len();
    if rest.trim().is_empty() {
        return Err(malformed(line, rest_offset, keyword, DirectiveFault::MissingName));
    }

    let after_name = &text[name_start..];
    let Some(name_len) = after_name.find(char::is_whitespace) else {
        return Err(malformed(line, text.len(), keyword, DirectiveFault::MissingValue));
    };
    let name = &after_name[..name_len];
    let value = after_name[name_len..].trim();
    if value.is_empty() {
        return Err(malformed(line, text.len(), keyword, DirectiveFault::MissingValue));
    }
    if unterminated {
        return Err(malformed(line, start, keyword, DirectiveFault::MissingTerminator));
    }

    let value_offset = text.len() - after_name[name_len..].trim_start().len();
    Ok(Some(Declaration {
        name,
        value,
        value_offset,
    }))
}

/// Fold a leading `HASH(...)` in a value to its decimal hash
///
/// The content between the parentheses is hashed as written, except that
/// one pair of surrounding double quotes is removed: `HASH("ItemKit")` and
/// `HASH(ItemKit)` both hash `ItemKit`. Text after the closing parenthesis
/// is kept. Values not starting with the marker are returned unchanged.
pub fn resolve_hash(value: &str, format: HashFormat, location: &SourceLocation) -> TransformResult<String> {
    let Some(rest) = value.strip_prefix(HASH_MARKER) else {
        return Ok(value.to_string());
    };
    let Some(close) = rest.find(')') else {
        return Err(TransformError::UnterminatedHashDirective {
            location: location.clone(),
            value: value.to_string(),
        });
    };

    let inner = &rest[..close];
    let content = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(inner);
    let hashed = format.render(hash(content));
    trace!("HASH({content:?}) = {hashed}");
    Ok(format!("{hashed}{}", &rest[close + 1..]))
}

/// Collect every declaration of `keyword`, resolving each value
///
/// Each value is rewritten by the declarations above it before its comment
/// is stripped and its hash folded.
pub fn collect_directives(
    lines: &LineSequence,
    keyword: Keyword,
    replacement: Replacement,
    hash_format: HashFormat,
) -> TransformResult<Vec<Directive>> {
    let mut directives: Vec<Directive> = Vec::new();
    let mut replacers: Vec<NameReplacer> = Vec::new();
    let mut declared: HashMap<String, u32> = HashMap::new();

    for line in lines.lines() {
        let Some(declaration) = parse_declaration(line, keyword, lines.is_unterminated(line))? else {
            continue;
        };
        let location = line.location_at(0);

        if let Some(&first_line) = declared.get(declaration.name) {
            return Err(TransformError::DuplicateDirective {
                location,
                keyword: keyword.to_string(),
                name: declaration.name.to_string(),
                first_line,
            });
        }

        let raw_value = replacers
            .iter()
            .fold(declaration.value.to_string(), |value, replacer| replacer.apply(&value).into_owned());
        let value = resolve_hash(
            strip_value_comment(&raw_value),
            hash_format,
            &line.location_at(declaration.value_offset),
        )?;
        debug!("{keyword} {} = {value} (line {})", declaration.name, line.number);

        replacers.push(NameReplacer::new(declaration.name, &value, replacement)?);
        declared.insert(declaration.name.to_string(), line.number);
        directives.push(Directive {
            keyword,
            name: declaration.name.to_string(),
            raw_value,
            value,
            location,
        });
    }

    Ok(directives)
}

/// Remove every declaration of `keyword` and substitute its value
pub fn substitute(
    lines: LineSequence,
    keyword: Keyword,
    replacement: Replacement,
    hash_format: HashFormat,
) -> TransformResult<LineSequence> {
    let directives = collect_directives(&lines, keyword, replacement, hash_format)?;
    if directives.is_empty() {
        return Ok(lines);
    }
    trace!("Substituting {} {keyword} directive(s)", directives.len());

    let declaration_lines: HashSet<u32> = directives.iter().map(|d| d.location.line).collect();
    let replacers = directives
        .iter()
        .map(|d| NameReplacer::new(&d.name, &d.value, replacement))
        .collect::<TransformResult<Vec<_>>>()?;

    let lines = lines.retain(|line| !declaration_lines.contains(&line.number));
    Ok(replace_all(lines, &replacers))
}
