//! Source documents shown in the code view.
//!
//! The document only owns raw UTF-8 text. Diagnostics and view positions
//! refer into it by location or character offset but are never stored in
//! the file.

use codeview_diagnostics::TextLocation;
use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::{CoreError, CoreResult};

/// File types the host can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    SwiftSource,
}

impl ContentType {
    /// Uniform type identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            ContentType::SwiftSource => "public.swift-source",
        }
    }

    /// Preferred file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ContentType::SwiftSource => "swift",
        }
    }
}

/// A text document being viewed.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    text: String,

    /// File path (None for untitled documents)
    path: Option<PathBuf>,

    modified: bool,
}

impl SourceDocument {
    /// Creates an untitled document with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            modified: false,
        }
    }

    /// Content types accepted by `open`.
    pub fn readable_content_types() -> &'static [ContentType] {
        &[ContentType::SwiftSource]
    }

    /// Decodes file contents, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: Vec<u8>) -> CoreResult<Self> {
        let text = String::from_utf8(bytes).map_err(|e| CoreError::CorruptFile(e.to_string()))?;
        Ok(Self::new(text))
    }

    /// Opens a document from a file.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut doc = Self::from_bytes(bytes)?;
        doc.path = Some(path.to_path_buf());
        tracing::debug!("Opened {} ({} chars)", path.display(), doc.len_chars());
        Ok(doc)
    }

    /// Encodes the document for writing.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }

    /// Saves the document to its path.
    pub fn save(&mut self) -> CoreResult<()> {
        let path = self.path.clone().ok_or(CoreError::Untitled)?;
        std::fs::write(&path, self.to_bytes())?;
        self.modified = false;
        Ok(())
    }

    /// Saves the document to a new path.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes())?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    // ==================== Getters ====================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the whole text. Editing proper belongs to the code view.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.modified = true;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
    }

    /// Returns the language implied by the file extension.
    pub fn language(&self) -> Option<Language> {
        self.path
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns the number of lines. An empty document has one line.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    // ==================== Coordinates ====================

    /// Converts a location to a character offset.
    ///
    /// Columns past the end of a line clamp to the line end, lines past the
    /// end of the document clamp to the document end.
    pub fn offset_of(&self, location: TextLocation) -> usize {
        let (line, column) = location.to_zero_based();
        let mut offset = 0;
        for (index, text) in self.text.split('\n').enumerate() {
            let len = text.chars().count();
            if index == line {
                return offset + column.min(len);
            }
            offset += len + 1;
        }
        self.len_chars()
    }

    /// Converts a character offset to a location, clamping to the document end.
    pub fn location_of(&self, offset: usize) -> TextLocation {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        TextLocation::from_zero_based(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        assert!(matches!(
            SourceDocument::from_bytes(vec![0x66, 0xff, 0xfe]),
            Err(CoreError::CorruptFile(_))
        ));
        assert_eq!(
            SourceDocument::from_bytes(b"var x = 5".to_vec()).unwrap().text(),
            "var x = 5"
        );
    }

    #[test]
    fn test_open_and_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.swift");
        std::fs::write(&path, "let a = 1\n").unwrap();

        let mut doc = SourceDocument::open(&path).unwrap();
        assert_eq!(doc.name(), "main.swift");
        assert_eq!(doc.language(), Some(Language::Swift));

        doc.set_text("let a = 2\n");
        assert!(doc.is_modified());
        doc.save().unwrap();
        assert!(!doc.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "let a = 2\n");
    }

    #[test]
    fn test_untitled_save_fails() {
        let mut doc = SourceDocument::new("x");
        assert_eq!(doc.name(), "Untitled");
        assert!(matches!(doc.save(), Err(CoreError::Untitled)));
    }

    #[test]
    fn test_offsets() {
        let doc = SourceDocument::new("ab\ncde\n\nf");
        assert_eq!(doc.line_count(), 4);

        assert_eq!(doc.offset_of(TextLocation::START), 0);
        assert_eq!(doc.offset_of(TextLocation::clamped(2, 2)), 4);
        assert_eq!(doc.offset_of(TextLocation::clamped(2, 99)), 6);
        assert_eq!(doc.offset_of(TextLocation::clamped(4, 1)), 8);
        assert_eq!(doc.offset_of(TextLocation::clamped(9, 1)), 9);

        assert_eq!(doc.location_of(4), TextLocation::clamped(2, 2));
        assert_eq!(doc.location_of(7), TextLocation::clamped(3, 1));
        assert_eq!(doc.location_of(100), TextLocation::clamped(4, 2));
    }

    #[test]
    fn test_content_types() {
        let types = SourceDocument::readable_content_types();
        assert_eq!(types[0].identifier(), "public.swift-source");
        assert_eq!(types[0].extension(), "swift");
    }
}
