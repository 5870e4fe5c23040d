pub mod blank;
pub mod comments;
pub mod config;
pub mod directives;
pub mod hash;
pub mod labels;
pub mod limits;
pub mod lines;
pub mod tests;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use blank::BlankLineOptions;
use log::trace;

pub use config::PreprocessorConfig;
pub use directives::Keyword;
pub use hash::{hash, HashFormat};
pub use ic10_common::{Diagnostic, DiagnosticReport, TransformError, TransformResult};
pub use lines::{LineSequence, Replacement};

/// Which transformation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Resolve `define` and `alias` directives only
    Compile,
    /// Also strip comments, drop blank lines and number labels
    Minify,
}

impl Mode {
    /// Prefix of the file the result is written to
    pub fn prefix(&self) -> &'static str {
        match self {
            Mode::Compile => "compiled_",
            Mode::Minify => "minified_",
        }
    }

    /// Verb used when reporting the written file
    pub fn past_tense(&self) -> &'static str {
        match self {
            Mode::Compile => "compiled",
            Mode::Minify => "minified",
        }
    }

    /// Sibling of `source` with the mode's prefix on the file name
    pub fn output_path(&self, source: &Path) -> Option<PathBuf> {
        let file_name = source.file_name()?;
        let mut name = OsString::from(self.prefix());
        name.push(file_name);
        Some(source.with_file_name(name))
    }
}

/// Main preprocessor struct
pub struct Preprocessor {
    config: PreprocessorConfig,
    /// Name used in error locations
    filename: Option<String>,
}

impl Preprocessor {
    /// Create a new preprocessor with the default configuration
    pub fn new() -> Self {
        Self::with_config(PreprocessorConfig::default())
    }

    pub fn with_config(config: PreprocessorConfig) -> Self {
        Self {
            config,
            filename: None,
        }
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Set how names are matched
    pub fn set_replacement(&mut self, replacement: Replacement) {
        self.config.replacement = replacement;
    }

    /// Set how hashes are written
    pub fn set_hash_format(&mut self, hash_format: HashFormat) {
        self.config.hash_format = hash_format;
    }

    /// Set whether `.` counts as blank-line padding
    pub fn set_ignore_periods(&mut self, ignore: bool) {
        self.config.ignore_periods = ignore;
    }

    /// Set whether chip limits are checked
    pub fn set_check_limits(&mut self, check: bool) {
        self.config.check_limits = check;
    }

    /// Set the file name reported in error locations
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    /// Resolve `define` and `alias` directives
    pub fn compile(&self, input: &str) -> TransformResult<String> {
        self.process(input, Mode::Compile)
    }

    /// Resolve directives, strip comments and blank lines, number labels
    pub fn minify(&self, input: &str) -> TransformResult<String> {
        self.process(input, Mode::Minify)
    }

    /// Run the pipeline for `mode`
    pub fn process(&self, input: &str, mode: Mode) -> TransformResult<String> {
        self.run(input, mode).map_err(|err| match &self.filename {
            Some(filename) => err.with_filename(filename),
            None => err,
        })
    }

    fn run(&self, input: &str, mode: Mode) -> TransformResult<String> {
        let PreprocessorConfig {
            replacement,
            hash_format,
            ignore_periods,
            ..
        } = self.config;

        let mut lines = LineSequence::parse(input);
        trace!("{:?}: {} line(s) in", mode, lines.len());

        if mode == Mode::Minify {
            lines = comments::strip_comments(lines);
        }

        lines = directives::substitute(lines, Keyword::Define, replacement, hash_format)?;
        lines = directives::substitute(lines, Keyword::Alias, replacement, hash_format)?;

        if mode == Mode::Minify {
            lines = blank::remove_blank_lines(lines, BlankLineOptions { ignore_periods });
            lines = labels::resolve_labels(lines, replacement)?;
        }

        trace!("{:?}: {} line(s) out", mode, lines.len());
        Ok(lines.render())
    }

    /// Chip-limit warnings for a program produced in `mode`
    ///
    /// Only minified output is what goes onto the chip; compiled output
    /// still carries comments and blank lines and is never checked.
    pub fn diagnostics(&self, output: &str, mode: Mode) -> DiagnosticReport {
        if !self.config.check_limits || mode != Mode::Minify {
            return DiagnosticReport::new();
        }
        let report = limits::check_limits(&LineSequence::parse(output));
        match &self.filename {
            Some(filename) => {
                let mut relabelled = DiagnosticReport::new();
                for mut diagnostic in report.into_diagnostics() {
                    diagnostic.location.filename = filename.clone();
                    relabelled.push(diagnostic);
                }
                relabelled
            }
            None => report,
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
