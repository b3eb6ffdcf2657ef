//! Language selection.
//!
//! ## Learning: Closed Enums over Lookup Tables
//!
//! The set of supported languages is fixed at compile time, so it is a
//! plain enum. `configuration()` is an exhaustive `match`: adding a
//! language without a configuration is a compile error, not a runtime miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Languages the code view can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Swift,
    Haskell,
}

impl Language {
    /// All languages, in picker order.
    pub const ALL: [Language; 2] = [Language::Swift, Language::Haskell];

    /// Returns the lexical configuration handed to the code view.
    pub fn configuration(&self) -> LanguageConfiguration {
        match self {
            Language::Swift => LanguageConfiguration::swift(),
            Language::Haskell => LanguageConfiguration::haskell(),
        }
    }

    /// Detects the language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.configuration().extensions.contains(&ext.as_str()))
    }

    /// Returns the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Swift => "Swift",
            Language::Haskell => "Haskell",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swift" => Ok(Language::Swift),
            "haskell" => Ok(Language::Haskell),
            _ => Err(CoreError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Lexical properties of a language, as consumed by the code view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfiguration {
    pub name: &'static str,
    /// File extensions, lowercase, without the dot
    pub extensions: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    /// Opening and closing delimiters of nestable block comments
    pub nested_comment: Option<(&'static str, &'static str)>,
    pub reserved_identifiers: &'static [&'static str],
}

impl LanguageConfiguration {
    pub fn swift() -> Self {
        Self {
            name: "Swift",
            extensions: &["swift"],
            single_line_comment: Some("//"),
            nested_comment: Some(("/*", "*/")),
            reserved_identifiers: &[
                "actor", "as", "associatedtype", "async", "await", "break", "case", "catch",
                "class", "continue", "default", "defer", "do", "else", "enum", "extension",
                "fallthrough", "false", "fileprivate", "for", "func", "guard", "if", "import",
                "in", "init", "inout", "internal", "is", "let", "nil", "open", "operator",
                "private", "protocol", "public", "repeat", "rethrows", "return", "self",
                "Self", "static", "struct", "subscript", "super", "switch", "throw", "throws",
                "true", "try", "typealias", "var", "where", "while",
            ],
        }
    }

    pub fn haskell() -> Self {
        Self {
            name: "Haskell",
            extensions: &["hs", "lhs"],
            single_line_comment: Some("--"),
            nested_comment: Some(("{-", "-}")),
            reserved_identifiers: &[
                "case", "class", "data", "default", "deriving", "do", "else", "foreign", "if",
                "import", "in", "infix", "infixl", "infixr", "instance", "let", "module",
                "newtype", "of", "then", "type", "where", "_",
            ],
        }
    }

    /// Returns true if `word` is reserved in this language.
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_identifiers.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_dispatch() {
        let swift = Language::Swift.configuration();
        assert_eq!(swift.single_line_comment, Some("//"));
        assert!(swift.is_reserved("func"));
        assert!(!swift.is_reserved("where_"));

        let haskell = Language::Haskell.configuration();
        assert_eq!(haskell.nested_comment, Some(("{-", "-}")));
        assert!(haskell.is_reserved("newtype"));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("swift"), Some(Language::Swift));
        assert_eq!(Language::from_extension("HS"), Some(Language::Haskell));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Haskell".parse::<Language>().unwrap(), Language::Haskell);
        assert!("cobol".parse::<Language>().is_err());
    }
}
