//! Drives the host through two launches on the same document.

use codeview_core::config::Config;
use codeview_core::{Language, ThemeChoice, ViewPosition};
use codeview_diagnostics::TextLocation;
use codeview_host::{App, Flags, HostMessage, parse};
use tempfile::tempdir;

fn flags(dir: &std::path::Path) -> Flags {
    Flags {
        file: Some(dir.join("Demo.swift")),
        state_dir: Some(dir.join("scenes")),
        ..Flags::default()
    }
}

#[tokio::test]
async fn position_survives_restart_but_messages_do_not() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Demo.swift"), "let a = 1\nlet b = 2\n").unwrap();
    let config = Config::default();

    let mut app = App::open(flags(dir.path()), &config).await.unwrap();
    assert_eq!(app.session.language(), Language::Swift);
    app.appear();
    app.end_cycle();

    for line in ["goto 2 3", "msg warning 2 3 Unused", "theme light"] {
        app.update(parse(line).unwrap());
        app.end_cycle();
    }
    assert_eq!(app.session.messages().len(), 1);
    app.shutdown().await.unwrap();

    let mut app = App::open(flags(dir.path()), &config).await.unwrap();
    assert_eq!(app.session.position(), &ViewPosition::default());
    app.appear();

    assert_eq!(app.session.position(), &ViewPosition::at(12));
    assert_eq!(app.status_message, "Restored view at 2:3");
    assert!(app.session.messages().is_empty());
    assert_eq!(app.session.theme_choice(), ThemeChoice::Default);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn same_named_files_keep_separate_positions() {
    let dir = tempdir().unwrap();
    for (sub, text) in [("a", "let a = 1\nlet b = 2\n"), ("b", "b\n")] {
        std::fs::create_dir(dir.path().join(sub)).unwrap();
        std::fs::write(dir.path().join(sub).join("main.swift"), text).unwrap();
    }
    let open = |sub: &str| Flags {
        file: Some(dir.path().join(sub).join("main.swift")),
        state_dir: Some(dir.path().join("scenes")),
        ..Flags::default()
    };
    let config = Config::default();

    let mut app = App::open(open("a"), &config).await.unwrap();
    app.appear();
    app.update(parse("goto 2 5").unwrap());
    app.end_cycle();
    app.shutdown().await.unwrap();

    let mut app = App::open(open("b"), &config).await.unwrap();
    app.appear();
    assert_eq!(app.session.position(), &ViewPosition::default());
    app.shutdown().await.unwrap();

    let mut app = App::open(open("a"), &config).await.unwrap();
    app.appear();
    assert_eq!(app.session.position(), &ViewPosition::at(14));
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn untitled_sessions_persist_nothing() {
    let dir = tempdir().unwrap();
    let untitled = Flags {
        file: None,
        ..flags(dir.path())
    };

    let mut app = App::open(untitled, &Config::default()).await.unwrap();
    app.appear();
    app.update(HostMessage::Scroll(40.0));
    app.end_cycle();
    app.shutdown().await.unwrap();

    assert!(!dir.path().join("scenes").exists());
}

#[tokio::test]
async fn ephemeral_sessions_persist_nothing() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Demo.swift"), "x\ny\n").unwrap();
    let config = Config::default();
    let ephemeral = Flags {
        ephemeral: true,
        ..flags(dir.path())
    };

    let mut app = App::open(ephemeral.clone(), &config).await.unwrap();
    app.appear();
    app.update(HostMessage::Goto(TextLocation::new(2, 1).unwrap()));
    app.end_cycle();
    app.shutdown().await.unwrap();

    assert!(!dir.path().join("scenes").exists());
    let mut app = App::open(ephemeral, &config).await.unwrap();
    app.appear();
    assert_eq!(app.session.position(), &ViewPosition::default());
}

#[tokio::test]
async fn flags_override_config() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Demo.swift"), "").unwrap();

    let app = App::open(
        Flags {
            language: Some(Language::Haskell),
            theme: Some(ThemeChoice::Dark),
            ephemeral: true,
            ..flags(dir.path())
        },
        &Config::default(),
    )
    .await
    .unwrap();

    assert_eq!(app.session.language(), Language::Haskell);
    assert_eq!(app.session.theme_choice(), ThemeChoice::Dark);
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = App::open(flags(dir.path()), &Config::default()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn served_input_is_flushed_when_reading_fails() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Demo.swift"), "let a = 1\nlet b = 2\n").unwrap();
    let config = Config::default();

    // The second line isn't UTF-8, so reading it fails.
    let input: &[u8] = b"goto 2 5\n\xff\xfe\n";
    let app = App::open(flags(dir.path()), &config).await.unwrap();
    assert!(app.serve(input).await.is_err());

    let mut app = App::open(flags(dir.path()), &config).await.unwrap();
    app.appear();
    assert_eq!(app.session.position(), &ViewPosition::at(14));
}

#[tokio::test]
async fn served_input_stops_at_quit() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Demo.swift"), "abc\n").unwrap();
    let config = Config::default();

    let input: &[u8] = b"goto 1 3\nquit\ngoto 1 1\n";
    let app = App::open(flags(dir.path()), &config).await.unwrap();
    app.serve(input).await.unwrap();

    let mut app = App::open(flags(dir.path()), &config).await.unwrap();
    app.appear();
    assert_eq!(app.session.position(), &ViewPosition::at(2));
}
