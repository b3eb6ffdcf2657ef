//! # Codeview Diagnostics
//!
//! Diagnostic messages anchored at line/column locations in a text buffer.
//!
//! ## Key Concepts
//!
//! - `TextLocation` is one-based in both line and column
//! - `Message` is immutable; changing one means remove + insert
//! - `DiagnosticSet` has set semantics keyed by an explicit `MessageKey`
//! - `MessageDraft` holds raw entry-form text, `build_message` turns it
//!   into a `LocatedMessage` without ever rejecting input

mod entry;
mod location;
mod message;
mod set;

pub use entry::{DEFAULT_SUMMARY, MessageDraft, build_message};
pub use location::TextLocation;
pub use message::{Category, LocatedMessage, Message, MessageKey};
pub use set::{CategoryCounts, DiagnosticSet};

/// Result type for diagnostic operations
pub type DiagnosticResult<T> = Result<T, DiagnosticError>;

/// Errors that can occur when constructing diagnostics
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    #[error("Location {line}:{column} is invalid, lines and columns start at 1")]
    InvalidLocation { line: usize, column: usize },

    #[error("Unknown message category: {0}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DiagnosticError::InvalidLocation { line: 0, column: 3 };
        assert_eq!(
            err.to_string(),
            "Location 0:3 is invalid, lines and columns start at 1"
        );

        let err = DiagnosticError::UnknownCategory("fatal".into());
        assert_eq!(err.to_string(), "Unknown message category: fatal");
    }
}
