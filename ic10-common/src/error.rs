//! Error handling for the IC10 preprocessor
//!
//! This module defines the error raised when a source text cannot be
//! transformed, and the diagnostics used for problems that do not stop the
//! transformation (such as exceeding the chip's line limits).

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type TransformResult<T> = Result<T, TransformError>;

/// What is missing from a malformed `define`/`alias` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveFault {
    MissingName,
    MissingValue,
    MissingTerminator,
}

impl fmt::Display for DirectiveFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveFault::MissingName => write!(f, "missing name"),
            DirectiveFault::MissingValue => write!(f, "missing value"),
            DirectiveFault::MissingTerminator => write!(f, "missing terminating newline"),
        }
    }
}

/// Every way a transformation can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Malformed `{keyword}` directive at {location}: {reason}")]
    MalformedDirective {
        location: SourceLocation,
        keyword: String,
        reason: DirectiveFault,
    },

    #[error("Unterminated HASH directive at {location}: `{value}` has no closing parenthesis")]
    UnterminatedHashDirective {
        location: SourceLocation,
        value: String,
    },

    #[error("Unterminated label at {location}: `{text}` does not name a label")]
    UnterminatedLabel {
        location: SourceLocation,
        text: String,
    },

    #[error("Duplicate `{keyword}` of `{name}` at {location} (first declared on line {first_line})")]
    DuplicateDirective {
        location: SourceLocation,
        keyword: String,
        name: String,
        first_line: u32,
    },

    #[error("Duplicate label `{name}` at {location} (first declared on line {first_line})")]
    DuplicateLabel {
        location: SourceLocation,
        name: String,
        first_line: u32,
    },

    #[error("Invalid replacement pattern: {message}")]
    InvalidPattern { message: String },
}

impl TransformError {
    /// Location of the offending text, if the error has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            TransformError::MalformedDirective { location, .. }
            | TransformError::UnterminatedHashDirective { location, .. }
            | TransformError::UnterminatedLabel { location, .. }
            | TransformError::DuplicateDirective { location, .. }
            | TransformError::DuplicateLabel { location, .. } => Some(location),
            TransformError::InvalidPattern { .. } => None,
        }
    }

    /// Re-home the error's location into a named file
    pub fn with_filename(mut self, filename: &str) -> Self {
        match &mut self {
            TransformError::MalformedDirective { location, .. }
            | TransformError::UnterminatedHashDirective { location, .. }
            | TransformError::UnterminatedLabel { location, .. }
            | TransformError::DuplicateDirective { location, .. }
            | TransformError::DuplicateLabel { location, .. } => {
                location.filename = filename.to_string();
            }
            TransformError::InvalidPattern { .. } => {}
        }
        self
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl From<&TransformError> for Diagnostic {
    fn from(err: &TransformError) -> Self {
        let location = err
            .location()
            .cloned()
            .unwrap_or_else(|| SourceLocation::new_simple(0, 0));
        Diagnostic::error(err.to_string(), location)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Collects diagnostics produced while checking a transformed program
#[derive(Debug, Default)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, updating the per-severity counts
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, location: SourceLocation) {
        self.push(Diagnostic::warning(message, location));
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}
