//! View position persistence.
//!
//! ## Learning: One-shot State Machines
//!
//! Restoring the cursor/scroll position at startup has to happen exactly
//! once. Reading storage again later would race with our own writes (see
//! `storage`), so the store tracks an explicit `Reconciliation` state:
//!
//! ```text
//!   Uninitialized ──appear()──► Initialized
//!        │                           │
//!   updates kept live only      updates written through, never read back
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::SceneStorage;

/// Storage key of the view position.
pub const POSITION_KEY: &str = "editPosition";

/// Version of the stored position layout.
const POSITION_VERSION: u32 = 1;

/// A half-open range of character offsets, normalized so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// An empty range (insertion point).
    pub fn cursor(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Snapshot of the code view's selections and scroll offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPosition {
    /// Selected ranges; the first one is the primary selection
    pub selections: Vec<SelectionRange>,

    /// Vertical scroll offset in points
    pub vertical_scroll: f64,
}

impl ViewPosition {
    /// A cursor at `offset`, scrolled to the top.
    pub fn at(offset: usize) -> Self {
        Self {
            selections: vec![SelectionRange::cursor(offset)],
            vertical_scroll: 0.0,
        }
    }

    pub fn with_scroll(mut self, vertical_scroll: f64) -> Self {
        self.vertical_scroll = vertical_scroll;
        self
    }

    /// Returns the primary selection.
    pub fn primary(&self) -> SelectionRange {
        self.selections.first().copied().unwrap_or_default()
    }

    /// Limits every selection to a document of `len` characters.
    pub fn clamped_to(mut self, len: usize) -> Self {
        for range in &mut self.selections {
            *range = SelectionRange::new(range.start.min(len), range.end.min(len));
        }
        self
    }

    /// Repairs values the code view can't display.
    fn sanitized(mut self) -> Self {
        if self.selections.is_empty() {
            self.selections.push(SelectionRange::cursor(0));
        }
        for range in &mut self.selections {
            *range = SelectionRange::new(range.start, range.end);
        }
        if !self.vertical_scroll.is_finite() || self.vertical_scroll < 0.0 {
            self.vertical_scroll = 0.0;
        }
        self
    }
}

impl Default for ViewPosition {
    /// Top of the document, no selection.
    fn default() -> Self {
        Self::at(0)
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    position: T,
}

/// Whether the persisted position has been merged into the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconciliation {
    #[default]
    Uninitialized,
    Initialized,
}

/// Owns the live view position of a session and its persisted cache.
#[derive(Debug, Clone)]
pub struct ViewPositionStore {
    key: String,
    live: ViewPosition,
    state: Reconciliation,
}

impl ViewPositionStore {
    /// Creates a store using the default storage key.
    pub fn new() -> Self {
        Self::with_key(POSITION_KEY)
    }

    /// Creates a store using a custom storage key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            live: ViewPosition::default(),
            state: Reconciliation::Uninitialized,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the live position.
    pub fn live(&self) -> &ViewPosition {
        &self.live
    }

    pub fn state(&self) -> Reconciliation {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == Reconciliation::Initialized
    }

    /// Reads the persisted position.
    ///
    /// Absence, a different layout version and undecodable data all
    /// yield `None`.
    pub fn load(&self, storage: &SceneStorage) -> Option<ViewPosition> {
        let value = storage.get(&self.key)?;
        decode(value.clone())
    }

    /// Picks the position a session starts with.
    pub fn reconcile(live: ViewPosition, persisted: Option<ViewPosition>) -> ViewPosition {
        persisted.unwrap_or(live)
    }

    /// One-shot startup trigger, run when the live value first becomes observable.
    ///
    /// Returns true if this call performed the reconciliation.
    pub fn appear(&mut self, storage: &SceneStorage) -> bool {
        if self.is_initialized() {
            return false;
        }

        let persisted = self.load(storage);
        let restored = persisted.is_some();
        self.live = Self::reconcile(self.live.clone(), persisted);
        self.state = Reconciliation::Initialized;
        tracing::debug!(
            "View position reconciled ({}): {:?}",
            if restored { "restored" } else { "default" },
            self.live
        );
        true
    }

    /// Limits the live position to a document of `len` characters.
    ///
    /// Nothing is written; the next navigation persists the result.
    pub fn clamp_to(&mut self, len: usize) {
        self.live = self.live.clone().clamped_to(len);
    }

    /// Sets the live position, writing it through once initialized.
    ///
    /// Returns true if the live position changed.
    pub fn update(&mut self, position: ViewPosition, storage: &mut SceneStorage) -> bool {
        if position == self.live {
            return false;
        }
        self.live = position;
        if self.is_initialized() {
            self.save(storage, &self.live);
        }
        true
    }

    /// Writes a position. Fire-and-forget; failures are logged.
    pub fn save(&self, storage: &mut SceneStorage, position: &ViewPosition) {
        let envelope = Envelope {
            version: POSITION_VERSION,
            position,
        };
        match serde_json::to_value(envelope) {
            Ok(value) => storage.set(self.key.clone(), value),
            Err(e) => tracing::warn!("Failed to encode view position: {}", e),
        }
    }
}

impl Default for ViewPositionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(value: Value) -> Option<ViewPosition> {
    let envelope: Envelope<Value> = match serde_json::from_value(value) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Ignoring stored view position: {}", e);
            return None;
        }
    };
    if envelope.version != POSITION_VERSION {
        tracing::warn!(
            "Ignoring stored view position with layout version {}",
            envelope.version
        );
        return None;
    }
    match serde_json::from_value::<ViewPosition>(envelope.position) {
        Ok(position) => Some(position.sanitized()),
        Err(e) => {
            tracing::warn!("Ignoring stored view position: {}", e);
            None
        }
    }
}
