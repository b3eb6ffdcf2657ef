//! # Codeview
//!
//! Host for a code view with anchored diagnostic messages.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open a document and drive it with line commands
//! cargo run -- path/to/Demo.swift
//!
//! # Don't persist the view position
//! cargo run -- --ephemeral path/to/Demo.swift
//! ```

use clap::Parser;
use codeview_core::{ColorScheme, Language, ThemeChoice};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use codeview_host::{Flags, run};

/// Codeview - diagnostics overlay host for a code view
#[derive(Parser, Debug)]
#[command(name = "codeview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Document to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Directory for persisted scene state
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Language (swift, haskell)
    #[arg(short, long)]
    language: Option<Language>,

    /// Theme (default, light, dark)
    #[arg(short, long)]
    theme: Option<ThemeChoice>,

    /// System appearance the default theme follows (light, dark)
    #[arg(long)]
    appearance: Option<ColorScheme>,

    /// Keep scene state in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Stdout belongs to the host view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level.to_string())),
        )
        .init();

    tracing::info!("Starting Codeview v{}", env!("CARGO_PKG_VERSION"));

    let flags = Flags {
        file: args.file,
        state_dir: args.state_dir,
        language: args.language,
        theme: args.theme,
        appearance: args.appearance,
        ephemeral: args.ephemeral,
    };

    run(flags).await
}
