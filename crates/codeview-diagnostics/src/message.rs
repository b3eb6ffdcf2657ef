//! Diagnostic messages and their composite identity.
//!
//! ## Learning: Explicit Keys instead of Derived Hashing
//!
//! `Message` deliberately does not derive `Hash`. Identity inside a
//! `DiagnosticSet` is spelled out by `MessageKey`, so the fields that make
//! two diagnostics "the same" are listed in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{DiagnosticError, TextLocation};

/// Severity category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Transient feedback, e.g. from a running program
    Live,
    /// Errors
    #[default]
    Error,
    /// Warnings
    Warning,
    /// Informational notes
    Informational,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Live,
        Category::Error,
        Category::Warning,
        Category::Informational,
    ];

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Live => "live",
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Informational => "informational",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DiagnosticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Category::Live),
            "error" => Ok(Category::Error),
            "warning" => Ok(Category::Warning),
            "informational" | "info" => Ok(Category::Informational),
            _ => Err(DiagnosticError::UnknownCategory(s.to_string())),
        }
    }
}

/// A diagnostic record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    category: Category,
    /// Span in characters, starting at the anchor location
    length: usize,
    summary: String,
    description: String,
}

impl Message {
    /// Creates a message with an empty description.
    pub fn new(category: Category, length: usize, summary: impl Into<String>) -> Self {
        Self {
            category,
            length,
            summary: summary.into(),
            description: String::new(),
        }
    }

    /// Returns a copy of this message carrying the given description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A message anchored at a text location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedMessage {
    pub location: TextLocation,
    pub entity: Message,
}

impl LocatedMessage {
    pub fn new(location: TextLocation, entity: Message) -> Self {
        Self { location, entity }
    }

    /// Derives the identity used for set membership.
    pub fn key(&self) -> MessageKey {
        MessageKey {
            line: self.location.line(),
            column: self.location.column(),
            category: self.entity.category,
            length: self.entity.length,
            summary: self.entity.summary.clone(),
            description: self.entity.description.clone(),
        }
    }

    /// Returns true if the message span touches the given line.
    ///
    /// Spans never wrap onto following lines, so this is a line match.
    pub fn is_on_line(&self, line: usize) -> bool {
        self.location.line() == line
    }
}

impl fmt::Display for LocatedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.location, self.entity.category, self.entity.summary
        )
    }
}

/// Composite identity of a located message: every location and message field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    line: usize,
    column: usize,
    category: Category,
    length: usize,
    summary: String,
    description: String,
}
