//! Editor session state.
//!
//! ## Learning: Explicit State Stores
//!
//! Everything the host shows next to the code view lives in one owned
//! struct. Mutations go through methods, which keeps the invariants (one
//! startup reconciliation, write-only position persistence, deduplicated
//! messages) in one place and makes the whole session testable without a UI.

use codeview_diagnostics::{DiagnosticSet, LocatedMessage, MessageDraft, build_message};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreResult;
use crate::config::SessionConfig;
use crate::document::SourceDocument;
use crate::event::{EventBus, SessionEvent};
use crate::language::{Language, LanguageConfiguration};
use crate::position::{ViewPosition, ViewPositionStore};
use crate::storage::SceneStorage;
use crate::theme::{ColorScheme, Theme, ThemeChoice};

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout options passed to the code view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfiguration {
    pub show_minimap: bool,
    pub wrap_text: bool,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        Self {
            show_minimap: true,
            wrap_text: true,
        }
    }
}

/// State of one document window.
pub struct EditorSession {
    id: SessionId,
    document: SourceDocument,
    messages: DiagnosticSet,
    position: ViewPositionStore,
    language: Language,
    theme: ThemeChoice,
    layout: LayoutConfiguration,

    /// Open message entry form, if any
    entry: Option<MessageDraft>,

    editor_focused: bool,
    events: EventBus,
}

impl EditorSession {
    /// Creates a session with default settings.
    pub fn new(document: SourceDocument) -> Self {
        Self::with_config(document, &SessionConfig::default())
    }

    /// Creates a session, taking the language from the document when possible.
    pub fn with_config(document: SourceDocument, config: &SessionConfig) -> Self {
        let language = document.language().unwrap_or(config.language);
        Self {
            id: SessionId::new(),
            document,
            messages: DiagnosticSet::new(),
            position: ViewPositionStore::new(),
            language,
            theme: config.theme,
            layout: LayoutConfiguration {
                show_minimap: config.show_minimap,
                wrap_text: config.wrap_text,
            },
            entry: None,
            editor_focused: false,
            events: EventBus::new(),
        }
    }

    /// Uses a custom storage key for the view position.
    pub fn with_position_key(mut self, key: impl Into<String>) -> Self {
        self.position = ViewPositionStore::with_key(key);
        self
    }

    // ==================== Getters ====================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut SourceDocument {
        &mut self.document
    }

    /// Returns the diagnostics shown by the code view.
    pub fn messages(&self) -> &DiagnosticSet {
        &self.messages
    }

    /// Returns the live view position.
    pub fn position(&self) -> &ViewPosition {
        self.position.live()
    }

    pub fn position_store(&self) -> &ViewPositionStore {
        &self.position
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn language_configuration(&self) -> LanguageConfiguration {
        self.language.configuration()
    }

    pub fn theme_choice(&self) -> ThemeChoice {
        self.theme
    }

    /// Resolves the theme against the system appearance.
    pub fn editor_theme(&self, system: ColorScheme) -> Theme {
        self.theme.resolve(system)
    }

    pub fn layout(&self) -> LayoutConfiguration {
        self.layout
    }

    pub fn is_editor_focused(&self) -> bool {
        self.editor_focused
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    // ==================== Lifecycle ====================

    /// Called when the code view first appears.
    ///
    /// Focuses the editor and restores the persisted position, limited to
    /// the document's length. Only the first call restores anything.
    pub fn appear(&mut self, storage: &SceneStorage) -> bool {
        self.editor_focused = true;
        let reconciled = self.position.appear(storage);
        if reconciled {
            self.position.clamp_to(self.document.len_chars());
            self.events.emit(SessionEvent::PositionRestored(self.id));
        }
        reconciled
    }

    /// Called by the code view on every navigation.
    pub fn set_position(&mut self, position: ViewPosition, storage: &mut SceneStorage) -> bool {
        let changed = self.position.update(position, storage);
        if changed {
            self.events.emit(SessionEvent::PositionChanged(self.id));
        }
        changed
    }

    /// Writes the document to its file.
    pub fn save_document(&mut self) -> CoreResult<()> {
        self.document.save()?;
        self.events.emit(SessionEvent::DocumentSaved(self.id));
        Ok(())
    }

    // ==================== Messages ====================

    /// Adds a message. Returns false if it was already present.
    pub fn add_message(&mut self, message: LocatedMessage) -> bool {
        let added = self.messages.insert_located(message.clone());
        if added {
            self.events.emit(SessionEvent::MessageAdded(self.id, message));
        }
        added
    }

    /// Removes a message. Returns false if it wasn't present.
    pub fn remove_message(&mut self, message: &LocatedMessage) -> bool {
        let removed = self.messages.remove_located(message);
        if removed {
            self.events
                .emit(SessionEvent::MessageRemoved(self.id, message.clone()));
        }
        removed
    }

    /// Opens the entry form with a fresh draft, or returns the open one.
    pub fn open_message_entry(&mut self) -> &mut MessageDraft {
        if self.entry.is_none() {
            self.events.emit(SessionEvent::MessageEntryOpened(self.id));
        }
        self.entry.get_or_insert_with(MessageDraft::new)
    }

    /// Returns the open draft.
    pub fn message_entry(&self) -> Option<&MessageDraft> {
        self.entry.as_ref()
    }

    /// Edits the open draft. Returns false if no form is open.
    pub fn edit_message_entry(&mut self, edit: impl FnOnce(&mut MessageDraft)) -> bool {
        match self.entry.as_mut() {
            Some(draft) => {
                edit(draft);
                true
            }
            None => false,
        }
    }

    /// Submits the open form and closes it.
    ///
    /// Returns the built message, or None if no form was open.
    pub fn submit_message_entry(&mut self) -> Option<LocatedMessage> {
        let draft = self.entry.take()?;
        let message = build_message(&draft);
        self.add_message(message.clone());
        self.events.emit(SessionEvent::MessageEntryClosed(self.id));
        Some(message)
    }

    /// Discards the open form.
    pub fn cancel_message_entry(&mut self) -> bool {
        let was_open = self.entry.take().is_some();
        if was_open {
            self.events.emit(SessionEvent::MessageEntryClosed(self.id));
        }
        was_open
    }

    // ==================== Pickers and toggles ====================

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.events
                .emit(SessionEvent::LanguageChanged(self.id, language));
        }
    }

    pub fn set_theme(&mut self, theme: ThemeChoice) {
        if self.theme != theme {
            self.theme = theme;
            self.events.emit(SessionEvent::ThemeChanged(self.id, theme));
        }
    }

    pub fn toggle_minimap(&mut self) -> bool {
        self.layout.show_minimap = !self.layout.show_minimap;
        self.events.emit(SessionEvent::LayoutChanged(self.id));
        self.layout.show_minimap
    }

    pub fn toggle_wrap_text(&mut self) -> bool {
        self.layout.wrap_text = !self.layout.wrap_text;
        self.events.emit(SessionEvent::LayoutChanged(self.id));
        self.layout.wrap_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SceneId;
    use codeview_diagnostics::{Category, TextLocation};

    fn session() -> EditorSession {
        EditorSession::new(SourceDocument::new("var x = 5"))
    }

    #[test]
    fn test_defaults() {
        let session = session();
        assert_eq!(session.language(), Language::Swift);
        assert_eq!(session.theme_choice(), ThemeChoice::Default);
        assert_eq!(session.layout(), LayoutConfiguration::default());
        assert!(session.messages().is_empty());
        assert!(session.message_entry().is_none());
        assert!(!session.is_editor_focused());
    }

    #[test]
    fn test_entry_form_flow() {
        let mut session = session();
        let mut rx = session.subscribe();

        session.open_message_entry();
        assert!(session.edit_message_entry(|draft| {
            draft.category = Category::Warning;
            draft.summary = "Shadowed".into();
            draft.line = "1".into();
            draft.column = "5".into();
        }));

        let built = session.submit_message_entry().unwrap();
        assert_eq!(built.location, TextLocation::new(1, 5).unwrap());
        assert!(session.message_entry().is_none());
        assert!(session.messages().contains(&built));

        assert!(matches!(rx.try_recv(), Ok(SessionEvent::MessageEntryOpened(_))));
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::MessageAdded(_, _))));
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::MessageEntryClosed(_))));
    }

    #[test]
    fn test_submit_same_message_twice() {
        let mut session = session();

        session.open_message_entry();
        let first = session.submit_message_entry().unwrap();
        session.open_message_entry();
        let second = session.submit_message_entry().unwrap();

        assert_eq!(first, second);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_cancel_and_edit_without_form() {
        let mut session = session();
        assert!(!session.edit_message_entry(|d| d.summary = "x".into()));
        assert!(session.submit_message_entry().is_none());

        session.open_message_entry().summary = "draft".into();
        assert!(session.cancel_message_entry());
        assert!(session.messages().is_empty());
        assert!(!session.cancel_message_entry());
    }

    #[test]
    fn test_appear_focuses_and_restores_once() {
        let mut storage = SceneStorage::in_memory(SceneId::new("s"));
        ViewPositionStore::new().save(&mut storage, &ViewPosition::at(4));
        storage.end_cycle();

        let mut session = session();
        assert!(session.appear(&storage));
        assert!(session.is_editor_focused());
        assert_eq!(session.position(), &ViewPosition::at(4));

        session.set_position(ViewPosition::at(8), &mut storage);
        assert!(!session.appear(&storage));
        assert_eq!(session.position(), &ViewPosition::at(8));
    }

    #[test]
    fn test_restored_position_fits_document() {
        let mut storage = SceneStorage::in_memory(SceneId::new("s"));
        ViewPositionStore::new().save(&mut storage, &ViewPosition::at(15));
        storage.end_cycle();

        let mut session = EditorSession::new(SourceDocument::new("b\n"));
        assert!(session.appear(&storage));
        assert_eq!(session.position(), &ViewPosition::at(2));
        assert_eq!(
            session.document().location_of(session.position().primary().start),
            TextLocation::new(2, 1).unwrap()
        );
    }

    #[test]
    fn test_language_from_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Main.hs");
        std::fs::write(&path, "main = pure ()").unwrap();

        let session = EditorSession::new(SourceDocument::open(&path).unwrap());
        assert_eq!(session.language(), Language::Haskell);
        assert!(session.language_configuration().is_reserved("where"));
    }

    #[test]
    fn test_pickers_and_toggles() {
        let mut session = session();

        session.set_theme(ThemeChoice::Light);
        assert!(!session.editor_theme(ColorScheme::Dark).is_dark);

        session.set_language(Language::Haskell);
        assert_eq!(session.language(), Language::Haskell);

        assert!(!session.toggle_minimap());
        assert!(!session.toggle_wrap_text());
        assert!(session.toggle_wrap_text());
    }
}
