//! # Codeview Host
//!
//! A headless host for the code view: it owns the session around the view
//! (document, diagnostics, pickers, persisted position) and drives it from
//! line commands on stdin.
//!
//! ## Architecture
//!
//! The host follows the Elm architecture (TEA):
//! - **Model**: `App`, wrapping an `EditorSession` and its `SceneStorage`
//! - **Message**: `HostMessage`, parsed from one input line
//! - **Update**: `App::update`, one call per update cycle
//! - **View**: `App::view`, a text rendering of the model
//!
//! Every input line is one update cycle. Storage writes made during a cycle
//! are committed when the cycle ends, mirroring platform scene storage.

pub mod app;
pub mod command;

pub use app::{App, Control, Flags, HostMessage, run};
pub use command::{CommandError, parse};
