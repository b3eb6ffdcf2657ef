//! Manual diagnostic entry.
//!
//! The entry form keeps its fields as raw text in a `MessageDraft`.
//! `build_message` is a pure function from draft to `LocatedMessage` that
//! never fails: missing or malformed input falls back to a default, since a
//! slightly wrong diagnostic is more useful on screen than a dropped one.

use serde::{Deserialize, Serialize};

use crate::{Category, LocatedMessage, Message, TextLocation};

/// Summary used when the form's summary field is left blank.
pub const DEFAULT_SUMMARY: &str = "Summary";

/// Length of manually entered messages, in characters.
const ENTRY_LENGTH: usize = 1;

/// Caller-owned state of the message entry form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDraft {
    pub category: Category,
    pub summary: String,
    /// Line number as typed, 1-indexed
    pub line: String,
    /// Column number as typed, 1-indexed
    pub column: String,
    /// Detailed message body
    pub description: String,
}

impl MessageDraft {
    /// Creates an empty draft with the default category.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the located message described by a draft.
pub fn build_message(draft: &MessageDraft) -> LocatedMessage {
    let summary = if draft.summary.trim().is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        draft.summary.clone()
    };
    let location = TextLocation::clamped(
        coerce_number(&draft.line),
        coerce_number(&draft.column),
    );
    let message = Message::new(draft.category, ENTRY_LENGTH, summary)
        .with_description(draft.description.clone());

    LocatedMessage::new(location, message)
}

/// Parses a 1-indexed number, falling back to 1.
fn coerce_number(text: &str) -> usize {
    match text.trim().parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => 1,
    }
}
