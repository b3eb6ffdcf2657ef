//! # Codeview Core
//!
//! Session state for a code-view host: the diagnostics overlay and the
//! persisted view position.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     EditorSession                         │
//! │  ┌──────────────┐ ┌───────────────┐ ┌──────────────────┐ │
//! │  │SourceDocument│ │ DiagnosticSet │ │ViewPositionStore │ │
//! │  └──────────────┘ └───────────────┘ └────────┬─────────┘ │
//! │  ┌──────────┐ ┌────────────┐ ┌──────────┐    │           │
//! │  │ Language │ │ThemeChoice │ │ EventBus │    │           │
//! │  └──────────┘ └────────────┘ └──────────┘    │           │
//! └──────────────────────────────────────────────┼───────────┘
//!                                                 │ write-only after startup
//!                                        ┌────────┴────────┐
//!                                        │  SceneStorage   │──► <scene>.json
//!                                        └─────────────────┘
//! ```
//!
//! The diagnostic types themselves live in `codeview-diagnostics` and are
//! re-exported here for convenience.

pub mod config;
pub mod document;
pub mod event;
pub mod language;
pub mod position;
pub mod session;
pub mod storage;
pub mod theme;

pub use codeview_diagnostics as diagnostics;
pub use config::Config;
pub use document::{ContentType, SourceDocument};
pub use event::{EventBus, EventHandler, SessionEvent};
pub use language::{Language, LanguageConfiguration};
pub use position::{POSITION_KEY, Reconciliation, SelectionRange, ViewPosition, ViewPositionStore};
pub use session::{EditorSession, LayoutConfiguration, SessionId};
pub use storage::{SceneId, SceneStorage, StorageError};
pub use theme::{Color, ColorScheme, Theme, ThemeChoice};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("File is not valid UTF-8: {0}")]
    CorruptFile(String),

    #[error("Document has no file path")]
    Untitled,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
