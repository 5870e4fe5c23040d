//! IC10 preprocessor - Common Types and Utilities
//! 
//! This crate contains the error, diagnostic and source location types
//! shared by the preprocessor library and its command-line front end.

pub mod error;
pub mod source_loc;

pub use error::{Diagnostic, DiagnosticReport, DirectiveFault, Severity, TransformError, TransformResult};
pub use source_loc::SourceLocation;
