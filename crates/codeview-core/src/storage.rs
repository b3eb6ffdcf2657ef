//! Per-scene key/value persistence.
//!
//! ## Learning: Staged Writes
//!
//! `SceneStorage` models a platform persistence primitive whose writes are
//! not visible to reads in the same update cycle. A `set` lands in a staging
//! map; `end_cycle()` commits staged values so later `get`s see them and
//! hands a snapshot to a background writer task.
//!
//! ```text
//!   set(k, v) ──► staged ──end_cycle()──► committed ──► writer task ──► <scene>.json
//!                                             ▲
//!   get(k)  ──────────────────────────────────┘
//! ```
//!
//! Callers that read back a value they just wrote get the *old* value. The
//! view-position store is built around that by never reading after startup.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in scene storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background writer stopped: {0}")]
    WriterGone(String),
}

/// Name of a scene, safe to use as a file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneId(String);

impl SceneId {
    /// Creates a scene id, replacing characters that aren't file-name safe.
    pub fn new(name: &str) -> Self {
        let sanitized: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let sanitized = sanitized.trim_matches('.');
        if sanitized.is_empty() {
            Self("untitled".to_string())
        } else {
            Self(sanitized.to_string())
        }
    }

    /// Scene id for a document file.
    ///
    /// The file name keeps the id readable. A digest of the canonical path
    /// keeps same-named files in different directories apart.
    pub fn for_path(path: &Path) -> Self {
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let digest = Uuid::new_v5(&Uuid::NAMESPACE_URL, canonical.as_os_str().as_encoded_bytes());
        let name = canonical
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        Self::new(&format!("{}-{}", name, digest.simple()))
    }

    /// Scene id for a document. Untitled documents have no durable scene.
    pub fn for_document(path: Option<&Path>) -> Option<Self> {
        path.map(Self::for_path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Snapshot = BTreeMap<String, Value>;

/// Handle to the background writer.
struct Writer {
    path: PathBuf,
    sender: mpsc::UnboundedSender<Snapshot>,
    handle: JoinHandle<()>,
}

/// Key/value storage scoped to one scene (one document window).
pub struct SceneStorage {
    scene: SceneId,

    /// Values visible to `get`
    committed: Snapshot,

    /// Writes issued this cycle (None = removal)
    staged: HashMap<String, Option<Value>>,

    /// Durable backing, absent for in-memory scenes
    writer: Option<Writer>,
}

impl SceneStorage {
    /// Creates a storage that lives only as long as the process.
    pub fn in_memory(scene: SceneId) -> Self {
        Self {
            scene,
            committed: Snapshot::new(),
            staged: HashMap::new(),
            writer: None,
        }
    }

    /// Opens `<dir>/<scene>.json` and starts its background writer.
    ///
    /// A missing file is an empty scene. A file that doesn't parse is logged
    /// and treated as empty; it gets overwritten by the next commit.
    pub async fn open(dir: impl AsRef<Path>, scene: SceneId) -> StorageResult<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(format!("{}.json", scene));

        let committed = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<Snapshot>(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Discarding unreadable scene file {}: {}", path.display(), e);
                    Snapshot::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Opened scene {} with {} keys", scene, committed.len());

        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_loop(path.clone(), receiver));

        Ok(Self {
            scene,
            committed,
            staged: HashMap::new(),
            writer: Some(Writer {
                path,
                sender,
                handle,
            }),
        })
    }

    pub fn scene(&self) -> &SceneId {
        &self.scene
    }

    /// Returns the backing file, if the scene is durable.
    pub fn path(&self) -> Option<&Path> {
        self.writer.as_ref().map(|w| w.path.as_path())
    }

    /// Reads a committed value. Writes staged this cycle are not visible.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.committed.get(key)
    }

    /// Stages a write. The last write to a key within a cycle wins.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.staged.insert(key.into(), Some(value));
    }

    /// Stages a removal.
    pub fn remove(&mut self, key: impl Into<String>) {
        self.staged.insert(key.into(), None);
    }

    /// Number of keys written since the last commit.
    pub fn pending_writes(&self) -> usize {
        self.staged.len()
    }

    /// Commits staged writes and schedules them for persistence.
    ///
    /// Returns true if anything was committed.
    pub fn end_cycle(&mut self) -> bool {
        if self.staged.is_empty() {
            return false;
        }

        for (key, value) in self.staged.drain() {
            match value {
                Some(value) => {
                    self.committed.insert(key, value);
                }
                None => {
                    self.committed.remove(&key);
                }
            }
        }

        if let Some(writer) = &self.writer {
            if writer.sender.send(self.committed.clone()).is_err() {
                tracing::warn!("Scene writer for {} has stopped, dropping write", self.scene);
            }
        }
        true
    }

    /// Commits pending writes and waits until they are on disk.
    pub async fn shutdown(mut self) -> StorageResult<()> {
        self.end_cycle();
        if let Some(writer) = self.writer.take() {
            drop(writer.sender);
            writer
                .handle
                .await
                .map_err(|e| StorageError::WriterGone(e.to_string()))?;
            tracing::debug!("Scene {} flushed to {}", self.scene, writer.path.display());
        }
        Ok(())
    }
}

/// Writes snapshots in order, skipping ones already superseded.
async fn write_loop(path: PathBuf, mut receiver: mpsc::UnboundedReceiver<Snapshot>) {
    while let Some(mut snapshot) = receiver.recv().await {
        while let Ok(newer) = receiver.try_recv() {
            snapshot = newer;
        }
        if let Err(e) = write_snapshot(&path, &snapshot).await {
            tracing::warn!("Failed to persist scene {}: {}", path.display(), e);
        }
    }
}

async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> StorageResult<()> {
    let content = serde_json::to_vec_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
