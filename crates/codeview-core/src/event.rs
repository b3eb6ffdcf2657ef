//! Session change notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Components that render the session (the host view, loggers) subscribe
//! to a `tokio::sync::broadcast` channel instead of holding references
//! to the session. Events are values; subscribers receive clones.

use codeview_diagnostics::LocatedMessage;
use tokio::sync::broadcast;

use crate::language::Language;
use crate::session::SessionId;
use crate::theme::ThemeChoice;

/// Events that can occur in an editor session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The persisted view position was merged at startup
    PositionRestored(SessionId),
    /// The live view position changed
    PositionChanged(SessionId),

    /// A message was added to the diagnostic set
    MessageAdded(SessionId, LocatedMessage),
    /// A message was removed from the diagnostic set
    MessageRemoved(SessionId, LocatedMessage),
    /// The message entry form was opened
    MessageEntryOpened(SessionId),
    /// The message entry form was dismissed
    MessageEntryClosed(SessionId),

    /// Language picker changed
    LanguageChanged(SessionId, Language),
    /// Theme picker changed
    ThemeChanged(SessionId, ThemeChoice),
    /// Minimap or wrapping toggled
    LayoutChanged(SessionId),

    /// The document was written to disk
    DocumentSaved(SessionId),
}

impl SessionEvent {
    /// The session the event came from.
    pub fn session(&self) -> SessionId {
        match self {
            Self::PositionRestored(id)
            | Self::PositionChanged(id)
            | Self::MessageAdded(id, _)
            | Self::MessageRemoved(id, _)
            | Self::MessageEntryOpened(id)
            | Self::MessageEntryClosed(id)
            | Self::LanguageChanged(id, _)
            | Self::ThemeChanged(id, _)
            | Self::LayoutChanged(id)
            | Self::DocumentSaved(id) => *id,
        }
    }
}

/// Event bus for broadcasting session events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: SessionEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Async consumer of session events, optionally limited to one session.
///
/// ## Example
///
/// ```ignore
/// let mut handler = EventHandler::for_session(session.subscribe(), session.id());
///
/// tokio::spawn(async move {
///     while let Some(event) = handler.next().await {
///         tracing::debug!(?event, "session event");
///     }
/// });
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<SessionEvent>,
    session: Option<SessionId>,
}

impl EventHandler {
    /// Receives events from every session on the bus.
    pub fn new(receiver: broadcast::Receiver<SessionEvent>) -> Self {
        Self {
            receiver,
            session: None,
        }
    }

    /// Receives only events from `session`.
    pub fn for_session(receiver: broadcast::Receiver<SessionEvent>, session: SessionId) -> Self {
        Self {
            receiver,
            session: Some(session),
        }
    }

    /// Waits for the next matching event, or None once the bus is gone.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.session.is_some_and(|id| id != event.session()) => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
