use codeview_core::{Language, ThemeChoice};
use codeview_diagnostics::{Category, MessageDraft, TextLocation};

#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    // Message entry sheet
    ShowMessageEntry,
    EntryCategoryChanged(Category),
    EntrySummaryChanged(String),
    EntryLineChanged(String),
    EntryColumnChanged(String),
    EntryDescriptionChanged(String),
    SubmitMessage,
    CancelMessageEntry,

    // Messages
    AddMessage(MessageDraft),
    /// 1-based index into the sorted listing
    RemoveMessage(usize),
    ListMessages,

    // Code view navigation
    Goto(TextLocation),
    Select(TextLocation, TextLocation),
    Scroll(f64),

    // Pickers and toggles
    LanguageSelected(Language),
    ThemeSelected(ThemeChoice),
    ToggleMinimap,
    ToggleWrapText,

    // Document
    Save,

    // Application
    Help,
    Quit,
}
