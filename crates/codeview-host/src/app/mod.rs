use anyhow::Context;
use codeview_core::config::Config;
use codeview_core::{
    ColorScheme, EditorSession, EventHandler, Language, SceneId, SceneStorage, SourceDocument,
    ThemeChoice,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

use crate::command::{self, CommandError};

/// Launch options, usually from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Document to open (None = untitled)
    pub file: Option<PathBuf>,
    /// Overrides the configured scene storage directory
    pub state_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub theme: Option<ThemeChoice>,
    /// System appearance to resolve the default theme against
    pub appearance: Option<ColorScheme>,
    /// Keep scene storage in memory only
    pub ephemeral: bool,
}

/// What the run loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub session: EditorSession,
    pub storage: SceneStorage,
    pub appearance: ColorScheme,
    pub status_message: String,
}

impl App {
    pub fn new(session: EditorSession, storage: SceneStorage, appearance: ColorScheme) -> Self {
        Self {
            session,
            storage,
            appearance,
            status_message: "Ready | type `help` for commands".to_string(),
        }
    }

    /// Builds the app from launch flags and configuration.
    pub async fn open(flags: Flags, config: &Config) -> anyhow::Result<Self> {
        let document = match &flags.file {
            Some(path) => SourceDocument::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
            None => SourceDocument::default(),
        };

        let mut session_config = config.session.clone();
        if let Some(theme) = flags.theme {
            session_config.theme = theme;
        }
        let appearance = flags.appearance.unwrap_or(session_config.appearance);

        let storage = match SceneId::for_document(document.path()) {
            Some(scene) if !flags.ephemeral => {
                let dir = match flags.state_dir {
                    Some(dir) => dir,
                    None => config.storage.state_dir()?,
                };
                SceneStorage::open(&dir, scene)
                    .await
                    .with_context(|| format!("Failed to open scene storage in {}", dir.display()))?
            }
            Some(scene) => SceneStorage::in_memory(scene),
            None => SceneStorage::in_memory(SceneId::new("untitled")),
        };

        let mut session = EditorSession::with_config(document, &session_config)
            .with_position_key(config.storage.position_key.clone());
        if let Some(language) = flags.language {
            session.set_language(language);
        }

        Ok(Self::new(session, storage, appearance))
    }

    pub fn title(&self) -> String {
        let modified = if self.session.document().is_modified() {
            " *"
        } else {
            ""
        };
        format!("{}{} - Codeview", self.session.document().name(), modified)
    }

    /// The code view has appeared: restore the persisted position once.
    pub fn appear(&mut self) {
        if self.session.appear(&self.storage) {
            let location = self
                .session
                .document()
                .location_of(self.session.position().primary().start);
            self.status_message = format!("Restored view at {}", location);
        }
    }

    /// Ends the current update cycle, committing storage writes.
    pub fn end_cycle(&mut self) {
        self.storage.end_cycle();
    }

    /// Flushes storage to disk.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.storage.shutdown().await?;
        Ok(())
    }
}

/// Runs the host on stdin/stdout until `quit` or end of input.
pub async fn run(flags: Flags) -> anyhow::Result<()> {
    let config = Config::load();
    let app = App::open(flags, &config).await?;
    tracing::info!("Opened {} in scene {}", app.title(), app.storage.scene());
    app.serve(BufReader::new(tokio::io::stdin())).await
}

impl App {
    /// Feeds command lines from `input` through `update`, one cycle per line.
    ///
    /// Storage is flushed before returning, also when reading fails.
    pub async fn serve<R>(mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let session = self.session.id();
        let mut handler = EventHandler::for_session(self.session.subscribe(), session);
        let event_log = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                tracing::debug!(%session, ?event, "session event");
            }
        });

        self.appear();
        self.end_cycle();
        println!("{}", self.view());

        let mut lines = input.lines();
        let read_error = loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break None,
                Err(e) => break Some(e),
            };
            let control = match command::parse(&line) {
                Ok(message) => self.update(message),
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    self.status_message = e.to_string();
                    Control::Continue
                }
            };
            self.end_cycle();
            println!("{}", self.view());

            if control == Control::Quit {
                break None;
            }
        };

        self.shutdown().await?;
        // The session is gone, so the event stream has ended.
        event_log.await?;
        match read_error {
            Some(e) => Err(anyhow::Error::new(e).context("Failed to read command")),
            None => Ok(()),
        }
    }
}
